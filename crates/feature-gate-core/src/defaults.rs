// crates/feature-gate-core/src/defaults.rs
// ============================================================================
// Module: Default Configuration Generator
// Description: Derives a baseline configuration document from a feature tree.
// Purpose: Seed new versions with every feature enabled and declared defaults.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! The generator walks a [`FeatureTree`] and emits, per node, `enabled: true`,
//! a `params` object holding each parameter's declared `default`, and the same
//! transformation of every child merged in as a *sibling* key. Parameters
//! without a declared default are left out; no value is inferred from the type.
//!
//! The flattened output mirrors the version schema produced by the schema
//! generator. Use [`default_nested_document`] for the `children` form that
//! [`FeatureResolver`](crate::FeatureResolver) walks.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

use crate::model::ConfigurationDocument;
use crate::model::FeatureNode;
use crate::model::FeatureTree;
use crate::nesting::nest_flattened_features;

// ============================================================================
// SECTION: Options
// ============================================================================

/// Version metadata stamped into generated default documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultDocumentOptions {
    /// Version display name.
    pub name: String,
    /// Version description.
    pub description: String,
}

impl Default for DefaultDocumentOptions {
    fn default() -> Self {
        Self {
            name: String::from("enterprise"),
            description: String::new(),
        }
    }
}

// ============================================================================
// SECTION: Generator
// ============================================================================

/// Builds the flattened default `features` map for a definition tree.
#[must_use]
pub fn default_features(tree: &FeatureTree) -> Map<String, Value> {
    let mut features = Map::with_capacity(tree.len());
    for (key, node) in tree {
        features.insert(key.clone(), Value::Object(default_node(node)));
    }
    features
}

/// Builds a flattened default configuration document.
///
/// The result has the shape `{ name, description, features }` and validates
/// against the version schema generated from the same tree.
#[must_use]
pub fn default_document(tree: &FeatureTree, options: &DefaultDocumentOptions) -> Value {
    let mut document = Map::new();
    document.insert(String::from("name"), Value::String(options.name.clone()));
    document.insert(String::from("description"), Value::String(options.description.clone()));
    document.insert(String::from("features"), Value::Object(default_features(tree)));
    Value::Object(document)
}

/// Builds a default configuration document in the nested `children` form.
#[must_use]
pub fn default_nested_document(
    tree: &FeatureTree,
    options: &DefaultDocumentOptions,
) -> ConfigurationDocument {
    let flattened = default_features(tree);
    ConfigurationDocument {
        version: None,
        name: options.name.clone(),
        description: Some(options.description.clone()),
        features: nest_flattened_features(&flattened),
    }
}

/// Builds the default object for a single node, children flattened in.
fn default_node(node: &FeatureNode) -> Map<String, Value> {
    let mut params = Map::new();
    for (key, spec) in &node.params {
        if let Some(default) = &spec.default {
            params.insert(key.clone(), default.clone());
        }
    }

    let mut object = Map::new();
    object.insert(String::from("enabled"), Value::Bool(true));
    object.insert(String::from("params"), Value::Object(params));
    for (key, child) in &node.children {
        object.insert(key.clone(), Value::Object(default_node(child)));
    }
    object
}
