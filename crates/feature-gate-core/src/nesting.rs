// crates/feature-gate-core/src/nesting.rs
// ============================================================================
// Module: Flattened Feature Adapter
// Description: Converts sibling-key child features into explicit `children`.
// Purpose: Bridge generated (flattened) documents to the resolver's shape.
// Dependencies: indexmap, serde_json
// ============================================================================

//! ## Overview
//! Generated schemas and default documents list child features as siblings of
//! `enabled` and `params`. The resolver descends only through `children`. This
//! adapter is the single, explicit conversion between the two shapes: every
//! member other than `enabled`, `params`, and `children` whose value is an
//! object becomes a child feature. Explicit `children` entries are kept and
//! merged ahead of flattened ones.

// ============================================================================
// SECTION: Imports
// ============================================================================

use indexmap::IndexMap;
use serde_json::Map;
use serde_json::Value;

use crate::model::FeatureInstance;

// ============================================================================
// SECTION: Adapter
// ============================================================================

/// Converts a flattened `features` map into nested [`FeatureInstance`]s.
///
/// Top-level entries that are not objects are not features and are skipped.
#[must_use]
pub fn nest_flattened_features(
    features: &Map<String, Value>,
) -> IndexMap<String, FeatureInstance> {
    let mut nested = IndexMap::with_capacity(features.len());
    for (key, value) in features {
        if let Value::Object(object) = value {
            nested.insert(key.clone(), nest_instance(object));
        }
    }
    nested
}

/// Converts one flattened feature object.
fn nest_instance(object: &Map<String, Value>) -> FeatureInstance {
    let mut instance = FeatureInstance {
        enabled: object.get("enabled").and_then(Value::as_bool).unwrap_or(false),
        ..FeatureInstance::default()
    };
    let mut children = IndexMap::new();
    if let Some(Value::Object(explicit)) = object.get("children") {
        children.extend(nest_flattened_features(explicit));
    }
    for (key, value) in object {
        match (key.as_str(), value) {
            ("enabled" | "children", _) => {}
            ("params", Value::Object(params)) => instance.params = Some(params.clone()),
            ("params", _) => {}
            (_, Value::Object(child)) => {
                children.insert(key.clone(), nest_instance(child));
            }
            _ => {
                instance.extra.insert(key.clone(), value.clone());
            }
        }
    }
    if !children.is_empty() {
        instance.children = Some(children);
    }
    instance
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
