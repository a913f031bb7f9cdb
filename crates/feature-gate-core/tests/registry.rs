// crates/feature-gate-core/tests/registry.rs
// ============================================================================
// Module: Version Registry Tests
// Description: Multi-version lookup and default-version fallback.
// ============================================================================
//! ## Overview
//! Ensures the two-argument query form resolves per version and falls back to
//! the configured default version for unknown names.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use feature_gate_core::ConfigurationDocument;
use feature_gate_core::VersionRegistry;
use serde_json::json;

fn document(name: &str, pipelines_enabled: bool) -> ConfigurationDocument {
    ConfigurationDocument::from_value(json!({
        "version": name,
        "name": name,
        "features": {
            "projects": {
                "enabled": true,
                "params": {},
                "children": {
                    "pipelines": { "enabled": pipelines_enabled, "params": { "max": 10 } }
                }
            }
        }
    }))
    .expect("document")
}

fn registry() -> VersionRegistry {
    let mut registry = VersionRegistry::new("enterprise");
    registry.insert("enterprise", document("enterprise", true));
    registry.insert("community", document("community", false));
    registry
}

#[test]
fn queries_resolve_against_the_named_version() {
    let registry = registry();
    assert!(registry.is_feature_enabled("enterprise", "projects.pipelines"));
    assert!(!registry.is_feature_enabled("community", "projects.pipelines"));
    assert_eq!(
        registry.feature_params("community", "projects.pipelines").and_then(|p| p.get("max")),
        Some(&json!(10))
    );
}

#[test]
fn unknown_versions_fall_back_to_the_default() {
    let registry = registry();
    for path in ["projects", "projects.pipelines", "projects.missing"] {
        let resolver = registry.resolver("enterprise").expect("default resolver");
        assert_eq!(
            registry.is_feature_enabled("anyVersionString", path),
            resolver.is_feature_enabled(path)
        );
        assert_eq!(
            registry.feature_config("anyVersionString", path),
            resolver.feature_config(path)
        );
    }
    assert_eq!(registry.default_version(), "enterprise");
    assert!(!registry.contains("anyVersionString"));
}

#[test]
fn empty_registry_answers_not_found() {
    let registry = VersionRegistry::new("enterprise");
    assert!(registry.resolver("enterprise").is_none());
    assert!(!registry.is_feature_enabled("enterprise", "projects"));
    assert!(registry.feature_config("enterprise", "projects").is_none());
    assert!(registry.available_versions().is_empty());
}

#[test]
fn insert_replaces_and_keeps_order() {
    let mut registry = registry();
    let replaced = registry.insert("enterprise", document("enterprise", false));
    assert!(replaced.is_some());
    assert!(!registry.is_feature_enabled("enterprise", "projects.pipelines"));
    assert_eq!(registry.available_versions(), vec!["enterprise", "community"]);
}
