// crates/feature-gate-core/src/model.rs
// ============================================================================
// Module: Feature Model
// Description: Declared feature trees and concrete configuration documents.
// Purpose: Provide the canonical shapes shared by generators and resolvers.
// Dependencies: indexmap, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Two shapes live here. A [`FeatureTree`] is the *definition*: named
//! [`FeatureNode`]s with documentation metadata, typed [`ParameterSpec`]s, and
//! nested children. A [`ConfigurationDocument`] is the *instance*: a version's
//! concrete enable flags and parameter values, nested through explicit
//! `children` maps.
//!
//! Definition files commonly list child features as sibling keys of `title`
//! and `params`. [`FeatureNode`] accepts both that flattened spelling and an
//! explicit `children` object, merging them in encounter order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum nesting depth accepted for feature definition trees.
pub const MAX_FEATURE_DEPTH: usize = 64;

/// Keys a generated feature object reserves for its own state.
pub const RESERVED_FEATURE_KEYS: [&str; 3] = ["enabled", "params", "children"];

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while reading a feature definition tree.
///
/// # Invariants
/// - `path` is the dotted feature path of the offending node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// A node or the tree root was not a JSON object.
    #[error("feature definition `{path}` must be an object")]
    NotAnObject {
        /// Dotted path of the offending node.
        path: String,
    },
    /// A metadata field carried the wrong JSON type.
    #[error("feature definition `{path}` field `{field}` must be {expected}")]
    InvalidField {
        /// Dotted path of the offending node.
        path: String,
        /// Field name.
        field: String,
        /// Human-readable expectation.
        expected: &'static str,
    },
    /// The tree exceeded [`MAX_FEATURE_DEPTH`].
    #[error("feature definition `{path}` exceeds max depth {max_depth}")]
    TooDeep {
        /// Dotted path where the limit was hit.
        path: String,
        /// Maximum allowed depth.
        max_depth: usize,
    },
    /// An explicit child used a key reserved for the node's own state.
    #[error("feature definition `{path}` declares reserved child name `{name}`")]
    ReservedChildName {
        /// Dotted path of the parent node.
        path: String,
        /// Offending child name.
        name: String,
    },
}

/// Errors raised when a configuration document cannot be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// The document root was not a JSON object.
    #[error("configuration document must be an object")]
    NotAnObject,
    /// The `features` member was missing or not an object.
    #[error("configuration document `features` must be an object")]
    MissingFeatures,
    /// Any other shape violation reported by the decoder.
    #[error("invalid configuration document: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Definition Types
// ============================================================================

/// Root of a feature definition: top-level feature name to node.
pub type FeatureTree = IndexMap<String, FeatureNode>;

/// Declared parameter of a feature node.
///
/// Unknown constraint fields (`minLength`, `pattern`, ...) are preserved in
/// [`ParameterSpec::extra`] and copied into generated schemas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Semantic type (`string`, `number`, `boolean`, `array`, `object`).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Human-readable title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared default value (`null` is a real default).
    #[serde(default, deserialize_with = "present_value", skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Inclusive numeric lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Value>,
    /// Inclusive numeric upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Value>,
    /// Allowed literal values.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// Human-readable explanation per entry of `enum`.
    #[serde(rename = "enumDescriptions", default, skip_serializing_if = "Option::is_none")]
    pub enum_descriptions: Option<Vec<String>>,
    /// Additional declared constraint fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Declared feature node.
///
/// # Invariants
/// - `children` has the same shape recursively; an empty map marks a leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeatureNode {
    /// Human-readable title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Longer description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared enable flag (definitions default to enabled).
    pub enabled: bool,
    /// Optional semantic type tag carried by some definition files.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Declared default value for the node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Declared numeric lower bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Value>,
    /// Declared numeric upper bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Value>,
    /// Allowed literal values.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// Human-readable explanation per entry of `enum`.
    #[serde(rename = "enumDescriptions", skip_serializing_if = "Option::is_none")]
    pub enum_descriptions: Option<Vec<String>>,
    /// Parameters keyed by name.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub params: IndexMap<String, ParameterSpec>,
    /// Child features keyed by name.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub children: IndexMap<String, FeatureNode>,
}

impl FeatureNode {
    /// Returns true when the node has no child features.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Reads a node from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError`] when a metadata field has the wrong type or
    /// the subtree exceeds [`MAX_FEATURE_DEPTH`].
    pub fn from_value(value: &Value) -> Result<Self, DefinitionError> {
        read_node(value, "", 1)
    }
}

impl<'de> Deserialize<'de> for FeatureNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// Reads a feature definition tree from a JSON object.
///
/// # Errors
///
/// Returns [`DefinitionError`] when the root or any node is malformed.
pub fn feature_tree_from_value(value: &Value) -> Result<FeatureTree, DefinitionError> {
    let Value::Object(map) = value else {
        return Err(DefinitionError::NotAnObject {
            path: String::new(),
        });
    };
    let mut tree = FeatureTree::with_capacity(map.len());
    for (key, node) in map {
        tree.insert(key.clone(), read_node(node, key, 1)?);
    }
    Ok(tree)
}

// ============================================================================
// SECTION: Instance Types
// ============================================================================

/// Concrete feature state inside a configuration document.
///
/// Unknown members are kept in [`FeatureInstance::extra`] so the resolver can
/// return nodes untransformed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureInstance {
    /// Whether the feature is enabled (absent reads as disabled).
    #[serde(default)]
    pub enabled: bool,
    /// Parameter values, when the document declares any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,
    /// Nested child features.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<IndexMap<String, FeatureInstance>>,
    /// Members outside the canonical shape.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Concrete, versioned configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationDocument {
    /// Version identifier, when recorded in the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Version display name.
    #[serde(default)]
    pub name: String,
    /// Version description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Top-level features keyed by name.
    pub features: IndexMap<String, FeatureInstance>,
}

impl ConfigurationDocument {
    /// Decodes a configuration document from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] when the value is not a document object.
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        let Value::Object(map) = &value else {
            return Err(DocumentError::NotAnObject);
        };
        if !matches!(map.get("features"), Some(Value::Object(_))) {
            return Err(DocumentError::MissingFeatures);
        }
        serde_json::from_value(value).map_err(|err| DocumentError::Invalid(err.to_string()))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Deserializes a present field into `Some`, keeping explicit `null`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Joins a parent path and a key into a dotted path.
fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() { key.to_string() } else { format!("{parent}.{key}") }
}

/// Reads one definition node, recursing into explicit and flattened children.
fn read_node(value: &Value, path: &str, depth: usize) -> Result<FeatureNode, DefinitionError> {
    if depth > MAX_FEATURE_DEPTH {
        return Err(DefinitionError::TooDeep {
            path: path.to_string(),
            max_depth: MAX_FEATURE_DEPTH,
        });
    }
    let Value::Object(map) = value else {
        return Err(DefinitionError::NotAnObject {
            path: path.to_string(),
        });
    };

    let mut node = FeatureNode {
        enabled: true,
        ..FeatureNode::default()
    };
    for (key, field) in map {
        match key.as_str() {
            "title" => node.title = Some(read_string(field, path, key)?),
            "description" => node.description = Some(read_string(field, path, key)?),
            "type" => node.kind = Some(read_string(field, path, key)?),
            "enabled" => {
                node.enabled = field.as_bool().ok_or_else(|| invalid(path, key, "a boolean"))?;
            }
            "default" => node.default = Some(field.clone()),
            "min" => node.min = Some(read_number(field, path, key)?),
            "max" => node.max = Some(read_number(field, path, key)?),
            "enum" => {
                let values = field.as_array().ok_or_else(|| invalid(path, key, "an array"))?;
                node.enum_values = Some(values.clone());
            }
            "enumDescriptions" => {
                let values = field.as_array().ok_or_else(|| invalid(path, key, "an array"))?;
                let mut descriptions = Vec::with_capacity(values.len());
                for entry in values {
                    descriptions.push(read_string(entry, path, key)?);
                }
                node.enum_descriptions = Some(descriptions);
            }
            "params" => node.params = read_params(field, path)?,
            "children" => {
                let Value::Object(children) = field else {
                    return Err(invalid(path, key, "an object"));
                };
                for (child_key, child) in children {
                    if RESERVED_FEATURE_KEYS.contains(&child_key.as_str()) {
                        return Err(DefinitionError::ReservedChildName {
                            path: path.to_string(),
                            name: child_key.clone(),
                        });
                    }
                    let nested = child_path(path, child_key);
                    node.children.insert(child_key.clone(), read_node(child, &nested, depth + 1)?);
                }
            }
            _ => {
                if field.is_object() {
                    let nested = child_path(path, key);
                    node.children.insert(key.clone(), read_node(field, &nested, depth + 1)?);
                }
            }
        }
    }
    Ok(node)
}

/// Reads the `params` map of a node.
fn read_params(
    value: &Value,
    path: &str,
) -> Result<IndexMap<String, ParameterSpec>, DefinitionError> {
    let Value::Object(map) = value else {
        return Err(invalid(path, "params", "an object"));
    };
    let mut params = IndexMap::with_capacity(map.len());
    for (key, spec) in map {
        let parsed: ParameterSpec = serde_json::from_value(spec.clone())
            .map_err(|_| invalid(path, "params", "an object of parameter specs"))?;
        params.insert(key.clone(), parsed);
    }
    Ok(params)
}

/// Reads a string metadata field.
fn read_string(value: &Value, path: &str, field: &str) -> Result<String, DefinitionError> {
    value.as_str().map(str::to_string).ok_or_else(|| invalid(path, field, "a string"))
}

/// Reads a numeric metadata field.
fn read_number(value: &Value, path: &str, field: &str) -> Result<Value, DefinitionError> {
    if value.is_number() { Ok(value.clone()) } else { Err(invalid(path, field, "a number")) }
}

/// Builds an [`DefinitionError::InvalidField`] error.
fn invalid(path: &str, field: &str, expected: &'static str) -> DefinitionError {
    DefinitionError::InvalidField {
        path: path.to_string(),
        field: field.to_string(),
        expected,
    }
}
