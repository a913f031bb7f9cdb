// crates/feature-gate-core/src/registry.rs
// ============================================================================
// Module: Version Registry
// Description: Maps version names to feature resolvers with explicit fallback.
// Purpose: Provide the (version, path) query form on top of per-version engines.
// Dependencies: indexmap, serde_json
// ============================================================================

//! ## Overview
//! A [`FeatureResolver`] only ever answers for the single document it wraps.
//! Multi-version lookup lives here: the registry owns one resolver per version
//! and a `default_version` chosen at construction. Queries for an unknown
//! version resolve against the default version's resolver, so
//! `registry.is_feature_enabled("anything", path)` and
//! `registry.is_feature_enabled(default, path)` agree.
//!
//! If no resolver is registered under the default version either, queries fall
//! through to "not found" (`None`/`false`).

// ============================================================================
// SECTION: Imports
// ============================================================================

use indexmap::IndexMap;
use serde_json::Map;
use serde_json::Value;

use crate::model::ConfigurationDocument;
use crate::model::FeatureInstance;
use crate::resolver::FeatureResolver;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Version name to resolver mapping.
#[derive(Debug, Clone, Default)]
pub struct VersionRegistry {
    /// Version used when a lookup names an unknown version.
    default_version: String,
    /// Resolvers keyed by version name, in insertion order.
    resolvers: IndexMap<String, FeatureResolver>,
}

impl VersionRegistry {
    /// Creates an empty registry with the given fallback version.
    #[must_use]
    pub fn new(default_version: impl Into<String>) -> Self {
        Self {
            default_version: default_version.into(),
            resolvers: IndexMap::new(),
        }
    }

    /// Returns the fallback version name.
    #[must_use]
    pub fn default_version(&self) -> &str {
        &self.default_version
    }

    /// Registers `document` under `version`, replacing any previous entry.
    ///
    /// Returns the replaced resolver, if any.
    pub fn insert(
        &mut self,
        version: impl Into<String>,
        document: ConfigurationDocument,
    ) -> Option<FeatureResolver> {
        self.resolvers.insert(version.into(), FeatureResolver::new(document))
    }

    /// Returns the resolver for `version`, falling back to the default version.
    #[must_use]
    pub fn resolver(&self, version: &str) -> Option<&FeatureResolver> {
        self.resolvers.get(version).or_else(|| self.resolvers.get(&self.default_version))
    }

    /// Lists registered versions in insertion order.
    #[must_use]
    pub fn available_versions(&self) -> Vec<&str> {
        self.resolvers.keys().map(String::as_str).collect()
    }

    /// Returns whether `version` was registered explicitly.
    #[must_use]
    pub fn contains(&self, version: &str) -> bool {
        self.resolvers.contains_key(version)
    }

    /// Returns whether `path` is enabled in `version`.
    #[must_use]
    pub fn is_feature_enabled(&self, version: &str, path: &str) -> bool {
        self.resolver(version).is_some_and(|resolver| resolver.is_feature_enabled(path))
    }

    /// Resolves `path` in `version`.
    #[must_use]
    pub fn feature_config(&self, version: &str, path: &str) -> Option<&FeatureInstance> {
        self.resolver(version).and_then(|resolver| resolver.feature_config(path))
    }

    /// Returns the params of `path` in `version`.
    #[must_use]
    pub fn feature_params(&self, version: &str, path: &str) -> Option<&Map<String, Value>> {
        self.resolver(version).and_then(|resolver| resolver.feature_params(path))
    }
}
