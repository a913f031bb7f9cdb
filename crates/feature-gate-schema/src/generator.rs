// crates/feature-gate-schema/src/generator.rs
// ============================================================================
// Module: Version Schema Generator
// Description: Feature tree to version-document JSON Schema synthesis.
// Purpose: Describe valid configuration documents for a definition tree.
// Dependencies: feature-gate-core, serde_json
// ============================================================================

//! ## Overview
//! Every feature node becomes an object schema with two fixed properties,
//! `enabled` and `params`, followed by one property per child feature at the
//! same level. Children are never nested under a `children` key; the generated
//! shape matches the flattened documents produced by
//! [`feature_gate_core::default_document`].
//!
//! Parameters default to `"type": "string"` and take their key as title when
//! the definition omits them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use feature_gate_core::FeatureNode;
use feature_gate_core::FeatureTree;
use feature_gate_core::ParameterSpec;
use serde_json::Map;
use serde_json::Value;

use crate::compiler::JSON_SCHEMA_DRAFT_07;

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Builds the version-document schema for a definition tree.
#[must_use]
pub fn version_schema(tree: &FeatureTree) -> Value {
    let mut features = Map::new();
    features.insert(String::from("type"), string("object"));
    features.insert(String::from("title"), string("Feature list"));
    features.insert(String::from("properties"), Value::Object(feature_properties(tree)));
    features.insert(String::from("additionalProperties"), Value::Bool(false));

    let mut properties = Map::new();
    properties.insert(
        String::from("name"),
        Value::Object(annotated(
            "string",
            "Version name",
            "Version name, such as enterprise or community",
        )),
    );
    properties.insert(
        String::from("description"),
        Value::Object(annotated(
            "string",
            "Version description",
            "Detailed description of the version",
        )),
    );
    properties.insert(String::from("features"), Value::Object(features));

    let mut schema = Map::new();
    schema.insert(String::from("$schema"), string(JSON_SCHEMA_DRAFT_07));
    schema.insert(String::from("type"), string("object"));
    schema.insert(String::from("properties"), Value::Object(properties));
    schema.insert(
        String::from("required"),
        Value::Array(vec![string("name"), string("features")]),
    );
    schema.insert(String::from("additionalProperties"), Value::Bool(false));
    Value::Object(schema)
}

/// Builds one object schema per top-level feature, keyed by name.
#[must_use]
pub fn feature_properties(tree: &FeatureTree) -> Map<String, Value> {
    let mut properties = Map::with_capacity(tree.len());
    for (key, node) in tree {
        properties.insert(key.clone(), feature_schema(key, node));
    }
    properties
}

/// Builds the schema of one parameter.
///
/// Output keys are `type` (default `"string"`), `title` (default `key`),
/// `description`, then every other declared constraint.
#[must_use]
pub fn parameter_schema(key: &str, spec: &ParameterSpec) -> Value {
    let mut schema = Map::new();
    schema.insert(String::from("type"), string(spec.kind.as_deref().unwrap_or("string")));
    schema.insert(String::from("title"), string(spec.title.as_deref().unwrap_or(key)));
    if let Some(description) = &spec.description {
        schema.insert(String::from("description"), string(description));
    }
    if let Some(default) = &spec.default {
        schema.insert(String::from("default"), default.clone());
    }
    if let Some(minimum) = &spec.minimum {
        schema.insert(String::from("minimum"), minimum.clone());
    }
    if let Some(maximum) = &spec.maximum {
        schema.insert(String::from("maximum"), maximum.clone());
    }
    if let Some(values) = &spec.enum_values {
        schema.insert(String::from("enum"), Value::Array(values.clone()));
    }
    if let Some(descriptions) = &spec.enum_descriptions {
        schema.insert(
            String::from("enumDescriptions"),
            Value::Array(descriptions.iter().cloned().map(Value::String).collect()),
        );
    }
    for (field, value) in &spec.extra {
        schema.entry(field.clone()).or_insert_with(|| value.clone());
    }
    Value::Object(schema)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds the schema of one feature node, children flattened in.
fn feature_schema(key: &str, node: &FeatureNode) -> Value {
    let mut params = Map::with_capacity(node.params.len());
    for (param_key, spec) in &node.params {
        params.insert(param_key.clone(), parameter_schema(param_key, spec));
    }
    let mut params_schema = annotated("object", "Parameters", "Parameters of the feature");
    params_schema.insert(String::from("properties"), Value::Object(params));
    params_schema.insert(String::from("additionalProperties"), Value::Bool(false));

    let mut enabled = annotated("boolean", "Enabled", "Whether the feature is enabled");
    enabled.insert(String::from("default"), Value::Bool(true));

    let mut properties = Map::new();
    properties.insert(String::from("enabled"), Value::Object(enabled));
    properties.insert(String::from("params"), Value::Object(params_schema));
    for (child_key, child) in &node.children {
        properties.insert(child_key.clone(), feature_schema(child_key, child));
    }

    let mut schema = Map::new();
    schema.insert(String::from("type"), string("object"));
    schema.insert(String::from("title"), string(node.title.as_deref().unwrap_or(key)));
    if let Some(description) = &node.description {
        schema.insert(String::from("description"), string(description));
    }
    schema.insert(String::from("properties"), Value::Object(properties));
    Value::Object(schema)
}

/// Builds `{ type, title, description }`.
fn annotated(kind: &str, title: &str, description: &str) -> Map<String, Value> {
    let mut schema = Map::new();
    schema.insert(String::from("type"), string(kind));
    schema.insert(String::from("title"), string(title));
    schema.insert(String::from("description"), string(description));
    schema
}

/// Wraps a string slice as a JSON string.
fn string(text: &str) -> Value {
    Value::String(text.to_string())
}
