// crates/feature-gate-core/tests/diff.rs
// ============================================================================
// Module: Version Comparison Tests
// Description: Added, removed, and modified features across documents.
// ============================================================================
//! ## Overview
//! Covers top-level and nested feature differences plus the Markdown report.

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

use feature_gate_core::AddedFeature;
use feature_gate_core::ConfigurationDocument;
use feature_gate_core::FeatureChange;
use feature_gate_core::compare_versions;
use serde_json::Value;
use serde_json::json;

fn doc(value: Value) -> ConfigurationDocument {
    ConfigurationDocument::from_value(value).expect("document")
}

fn base() -> ConfigurationDocument {
    doc(json!({
        "name": "base",
        "features": {
            "projects": {
                "enabled": true,
                "params": { "max": 5, "layout": { "columns": 2 } },
                "children": { "pipelines": { "enabled": true } }
            },
            "legacy": { "enabled": true }
        }
    }))
}

fn target() -> ConfigurationDocument {
    doc(json!({
        "name": "target",
        "features": {
            "projects": {
                "enabled": false,
                "params": { "layout": { "columns": 3 }, "theme": "dark" },
                "children": {
                    "pipelines": { "enabled": false },
                    "boards": { "enabled": true }
                }
            },
            "search": { "enabled": false }
        }
    }))
}

#[test]
fn identical_documents_have_an_empty_diff() {
    let diff = compare_versions(&base(), &base());
    assert!(diff.is_empty());
    assert_eq!(diff.to_markdown(), "");
}

#[test]
fn reports_top_level_and_nested_changes() {
    let diff = compare_versions(&base(), &target());
    assert_eq!(
        diff.added,
        vec![
            AddedFeature { feature: "search".to_string(), enabled: false },
            AddedFeature { feature: "projects.boards".to_string(), enabled: true },
        ]
    );
    assert_eq!(diff.removed, vec!["legacy".to_string()]);
    assert_eq!(
        diff.modified,
        vec![
            FeatureChange {
                feature: "projects".to_string(),
                changes: vec![
                    "enabled: true → false".to_string(),
                    "params.max: removed".to_string(),
                    "params.layout.columns: 2 → 3".to_string(),
                    "params.theme: added (\"dark\")".to_string(),
                ],
            },
            FeatureChange {
                feature: "projects.pipelines".to_string(),
                changes: vec!["enabled: true → false".to_string()],
            },
        ]
    );
}

#[test]
fn renders_markdown_sections() {
    let report = compare_versions(&base(), &target()).to_markdown();
    let expected = "\
## Added features
- search: disabled
- projects.boards: enabled

## Removed features
- legacy

## Modified features
### projects
  - enabled: true → false
  - params.max: removed
  - params.layout.columns: 2 → 3
  - params.theme: added (\"dark\")
### projects.pipelines
  - enabled: true → false
";
    assert_eq!(report, expected);
}
