// crates/feature-gate-core/src/diff.rs
// ============================================================================
// Module: Version Comparison
// Description: Structural differences between two configuration documents.
// Purpose: Report added, removed, and modified features across versions.
// Dependencies: indexmap, serde, serde_json
// ============================================================================

//! ## Overview
//! [`compare_versions`] walks two [`ConfigurationDocument`]s feature by
//! feature. Nested `children` are compared with the same rules and reported
//! under dotted paths (`projects.pipelines`), so a child that only exists in
//! the target shows up in [`VersionDiff::added`] rather than as a change of its
//! parent.
//!
//! Change lines use a fixed vocabulary:
//! - `enabled: true → false`
//! - `params.<key>: added (<json>)`
//! - `params.<key>: removed`
//! - `params.<key>: <old json> → <new json>`
//!
//! Nested parameter objects are compared key by key with a dotted prefix.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::model::ConfigurationDocument;
use crate::model::FeatureInstance;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Feature present only in the target document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddedFeature {
    /// Dotted feature path.
    pub feature: String,
    /// Enable flag in the target document.
    pub enabled: bool,
}

/// Changes recorded for a feature present in both documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureChange {
    /// Dotted feature path.
    pub feature: String,
    /// Human-readable change lines.
    pub changes: Vec<String>,
}

/// Differences between a base and a target document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VersionDiff {
    /// Features only in the target.
    pub added: Vec<AddedFeature>,
    /// Features only in the base.
    pub removed: Vec<String>,
    /// Features in both whose state differs.
    pub modified: Vec<FeatureChange>,
}

impl VersionDiff {
    /// Returns true when the documents have identical feature state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    /// Renders the diff as a Markdown report.
    ///
    /// Empty sections are omitted; an empty diff renders as an empty string.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        if !self.added.is_empty() {
            out.push_str("## Added features\n");
            for entry in &self.added {
                let state = if entry.enabled { "enabled" } else { "disabled" };
                let _ = writeln!(out, "- {}: {state}", entry.feature);
            }
            out.push('\n');
        }
        if !self.removed.is_empty() {
            out.push_str("## Removed features\n");
            for feature in &self.removed {
                let _ = writeln!(out, "- {feature}");
            }
            out.push('\n');
        }
        if !self.modified.is_empty() {
            out.push_str("## Modified features\n");
            for entry in &self.modified {
                let _ = writeln!(out, "### {}", entry.feature);
                for change in &entry.changes {
                    let _ = writeln!(out, "  - {change}");
                }
            }
        }
        out
    }
}

// ============================================================================
// SECTION: Comparison
// ============================================================================

/// Compares the features of `base` and `target`.
#[must_use]
pub fn compare_versions(
    base: &ConfigurationDocument,
    target: &ConfigurationDocument,
) -> VersionDiff {
    let mut diff = VersionDiff::default();
    compare_feature_maps(&base.features, &target.features, "", &mut diff);
    diff
}

/// Compares two sibling feature maps under `prefix`.
fn compare_feature_maps(
    base: &IndexMap<String, FeatureInstance>,
    target: &IndexMap<String, FeatureInstance>,
    prefix: &str,
    diff: &mut VersionDiff,
) {
    for (key, feature) in target {
        if !base.contains_key(key) {
            diff.added.push(AddedFeature {
                feature: feature_path(prefix, key),
                enabled: feature.enabled,
            });
        }
    }
    for (key, base_feature) in base {
        let path = feature_path(prefix, key);
        let Some(target_feature) = target.get(key) else {
            diff.removed.push(path);
            continue;
        };
        let changes = compare_features(base_feature, target_feature);
        if !changes.is_empty() {
            diff.modified.push(FeatureChange {
                feature: path.clone(),
                changes,
            });
        }
        let empty = IndexMap::new();
        let base_children = base_feature.children.as_ref().unwrap_or(&empty);
        let target_children = target_feature.children.as_ref().unwrap_or(&empty);
        compare_feature_maps(base_children, target_children, &path, diff);
    }
}

/// Lists the own-state changes between two instances of one feature.
fn compare_features(base: &FeatureInstance, target: &FeatureInstance) -> Vec<String> {
    let mut changes = Vec::new();
    if base.enabled != target.enabled {
        changes.push(format!("enabled: {} → {}", base.enabled, target.enabled));
    }
    let empty = Map::new();
    let base_params = base.params.as_ref().unwrap_or(&empty);
    let target_params = target.params.as_ref().unwrap_or(&empty);
    compare_objects(base_params, target_params, "params", &mut changes);
    changes
}

/// Recursively compares two JSON objects, emitting one line per difference.
fn compare_objects(
    base: &Map<String, Value>,
    target: &Map<String, Value>,
    prefix: &str,
    changes: &mut Vec<String>,
) {
    let keys = base.keys().chain(target.keys().filter(|key| !base.contains_key(*key)));
    for key in keys {
        let full_key = format!("{prefix}.{key}");
        match (base.get(key), target.get(key)) {
            (None, Some(added)) => changes.push(format!("{full_key}: added ({added})")),
            (Some(_), None) => changes.push(format!("{full_key}: removed")),
            (Some(Value::Object(old)), Some(Value::Object(new))) => {
                compare_objects(old, new, &full_key, changes);
            }
            (Some(old), Some(new)) if old != new => {
                changes.push(format!("{full_key}: {old} → {new}"));
            }
            _ => {}
        }
    }
}

/// Joins a parent path and a feature key.
fn feature_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() { key.to_string() } else { format!("{prefix}.{key}") }
}
