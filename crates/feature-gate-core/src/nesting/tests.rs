// crates/feature-gate-core/src/nesting/tests.rs
// ============================================================================
// Module: Flattened Feature Adapter Unit Tests
// Description: Unit coverage for sibling-to-children conversion.
// Purpose: Ensure the adapter keeps metadata and moves only object members.
// Dependencies: feature-gate-core, serde_json
// ============================================================================

//! ## Overview
//! Exercises the flattened-to-nested conversion on hand-built feature maps.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions use panic-based helpers for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;

use super::nest_flattened_features;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn object(value: &Value) -> &serde_json::Map<String, Value> {
    value.as_object().expect("object literal")
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn sibling_objects_become_children() {
    let features = json!({
        "projects": {
            "enabled": true,
            "params": {},
            "pipelines": { "enabled": false, "params": { "max": 10 } }
        }
    });
    let nested = nest_flattened_features(object(&features));
    let projects = &nested["projects"];
    assert!(projects.enabled);
    let children = projects.children.as_ref().expect("children");
    let pipelines = &children["pipelines"];
    assert!(!pipelines.enabled);
    assert_eq!(pipelines.params.as_ref().expect("params")["max"], json!(10));
    assert!(pipelines.children.is_none());
}

#[test]
fn explicit_children_are_kept_before_flattened_ones() {
    let features = json!({
        "root": {
            "enabled": true,
            "late": { "enabled": true },
            "children": { "early": { "enabled": true } }
        }
    });
    let nested = nest_flattened_features(object(&features));
    let children = nested["root"].children.as_ref().expect("children");
    let keys: Vec<&str> = children.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["early", "late"]);
}

#[test]
fn scalar_members_stay_as_extra_fields() {
    let features = json!({
        "code": { "enabled": true, "note": "kept", "weight": 3 },
        "ignored": 7
    });
    let nested = nest_flattened_features(object(&features));
    assert!(!nested.contains_key("ignored"));
    let code = &nested["code"];
    assert!(code.children.is_none());
    assert_eq!(code.extra.get("note"), Some(&json!("kept")));
    assert_eq!(code.extra.get("weight"), Some(&json!(3)));
    assert!(code.params.is_none());
}

#[test]
fn non_boolean_enabled_reads_as_disabled() {
    let features = json!({ "flag": { "enabled": "yes" } });
    let nested = nest_flattened_features(object(&features));
    assert!(!nested["flag"].enabled);
}
