// crates/feature-gate-core/src/resolver.rs
// ============================================================================
// Module: Feature Resolution Engine
// Description: Dotted-path enablement and parameter queries over a document.
// Purpose: Answer "is this nested feature on, and with what params?".
// Dependencies: indexmap, serde, serde_json
// ============================================================================

//! ## Overview
//! A [`FeatureResolver`] wraps one [`ConfigurationDocument`] and never mutates
//! it. Paths such as `"projects.pipelines"` are split on `.` and resolved by
//! descending through each node's `children` map. A missing segment, or a
//! non-final segment whose node has no `children`, resolves to "not found":
//! `None` or `false`, never an error. Missing optional features are the
//! common case, not an exceptional one.
//!
//! Aggregate views ([`FeatureResolver::enabled_features`],
//! [`FeatureResolver::version_info`]) are shallow: they consider top-level
//! features only.
//!
//! The resolver is `Send + Sync` and can be shared across readers. To react to
//! edits, build a new resolver from the updated document.

// ============================================================================
// SECTION: Imports
// ============================================================================

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::model::ConfigurationDocument;
use crate::model::DocumentError;
use crate::model::FeatureInstance;
use crate::nesting::nest_flattened_features;

// ============================================================================
// SECTION: Views
// ============================================================================

/// Top-level feature paired with its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnabledFeature<'a> {
    /// Top-level feature name.
    #[serde(rename = "featureName")]
    pub feature_name: &'a str,
    /// Feature state, serialized inline next to the name.
    #[serde(flatten)]
    pub feature: &'a FeatureInstance,
}

/// Summary of the wrapped document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    /// Version identifier, when recorded.
    pub version: Option<String>,
    /// Version display name.
    pub name: String,
    /// Number of enabled top-level features.
    pub enabled_features: usize,
    /// Number of top-level features.
    pub total_features: usize,
}

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Read-only query engine over a single configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureResolver {
    /// Document every query resolves against.
    document: ConfigurationDocument,
}

impl FeatureResolver {
    /// Wraps an already-decoded document.
    #[must_use]
    pub const fn new(document: ConfigurationDocument) -> Self {
        Self {
            document,
        }
    }

    /// Decodes a nested (`children`-form) document and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] when the value is not a configuration document.
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        ConfigurationDocument::from_value(value).map(Self::new)
    }

    /// Decodes a flattened document (children as sibling keys) and wraps it.
    ///
    /// The flattened features are converted with
    /// [`nest_flattened_features`] before any query runs.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] when the value is not a configuration document.
    pub fn from_flattened(value: Value) -> Result<Self, DocumentError> {
        let Value::Object(mut map) = value else {
            return Err(DocumentError::NotAnObject);
        };
        let Some(Value::Object(features)) = map.remove("features") else {
            return Err(DocumentError::MissingFeatures);
        };
        map.insert(String::from("features"), Value::Object(Map::new()));
        let mut document = ConfigurationDocument::from_value(Value::Object(map))?;
        document.features = nest_flattened_features(&features);
        Ok(Self::new(document))
    }

    /// Returns the wrapped document.
    #[must_use]
    pub const fn document(&self) -> &ConfigurationDocument {
        &self.document
    }

    /// Unwraps the document.
    #[must_use]
    pub fn into_document(self) -> ConfigurationDocument {
        self.document
    }

    /// Resolves a dotted path to its feature node, returned untransformed.
    #[must_use]
    pub fn feature_config(&self, path: &str) -> Option<&FeatureInstance> {
        let mut current = &self.document.features;
        let mut segments = path.split('.').peekable();
        while let Some(segment) = segments.next() {
            let feature = current.get(segment)?;
            if segments.peek().is_none() {
                return Some(feature);
            }
            current = feature.children.as_ref()?;
        }
        None
    }

    /// Returns whether the feature at `path` exists and is enabled.
    #[must_use]
    pub fn is_feature_enabled(&self, path: &str) -> bool {
        self.feature_config(path).is_some_and(|feature| feature.enabled)
    }

    /// Returns the params of the feature at `path`, if it declares any.
    #[must_use]
    pub fn feature_params(&self, path: &str) -> Option<&Map<String, Value>> {
        self.feature_config(path).and_then(|feature| feature.params.as_ref())
    }

    /// Returns whether `path` resolves to a feature.
    #[must_use]
    pub fn has_feature(&self, path: &str) -> bool {
        self.feature_config(path).is_some()
    }

    /// Returns the `children` map of the feature at `path`.
    #[must_use]
    pub fn child_features(&self, path: &str) -> Option<&IndexMap<String, FeatureInstance>> {
        self.feature_config(path).and_then(|feature| feature.children.as_ref())
    }

    /// Returns a single parameter value of the feature at `path`.
    #[must_use]
    pub fn feature_option(&self, path: &str, option: &str) -> Option<&Value> {
        self.feature_params(path).and_then(|params| params.get(option))
    }

    /// Returns whether the feature at `path` declares parameter `option`.
    #[must_use]
    pub fn has_feature_option(&self, path: &str, option: &str) -> bool {
        self.feature_option(path, option).is_some()
    }

    /// Lists enabled top-level features in document order.
    #[must_use]
    pub fn enabled_features(&self) -> Vec<EnabledFeature<'_>> {
        self.document
            .features
            .iter()
            .filter(|(_, feature)| feature.enabled)
            .map(|(name, feature)| EnabledFeature {
                feature_name: name,
                feature,
            })
            .collect()
    }

    /// Summarizes the document using top-level counts.
    #[must_use]
    pub fn version_info(&self) -> VersionInfo {
        VersionInfo {
            version: self.document.version.clone(),
            name: self.document.name.clone(),
            enabled_features: self.enabled_features().len(),
            total_features: self.document.features.len(),
        }
    }
}
