// crates/feature-gate-core/src/lib.rs
// ============================================================================
// Module: Feature Gate Core Library
// Description: Feature tree model, default configs, and feature resolution.
// Purpose: Single source of truth for feature definitions and version documents.
// Dependencies: indexmap, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `feature-gate-core` owns the shared data model for hierarchical product
//! features: the declared [`FeatureNode`] tree, the concrete
//! [`ConfigurationDocument`] authored per version, and the pure operations over
//! them. The [`FeatureResolver`] answers dotted-path enablement and parameter
//! queries, [`default_document`] seeds new versions from a definition tree, and
//! [`VersionRegistry`] provides explicit multi-version lookup.
//!
//! Every operation is a synchronous, deterministic walk over in-memory input.
//! Nothing here performs I/O; callers load and persist documents.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod defaults;
pub mod diff;
pub mod model;
pub mod nesting;
pub mod registry;
pub mod resolver;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use defaults::DefaultDocumentOptions;
pub use defaults::default_document;
pub use defaults::default_features;
pub use defaults::default_nested_document;
pub use diff::AddedFeature;
pub use diff::FeatureChange;
pub use diff::VersionDiff;
pub use diff::compare_versions;
pub use model::ConfigurationDocument;
pub use model::DefinitionError;
pub use model::DocumentError;
pub use model::FeatureInstance;
pub use model::FeatureNode;
pub use model::FeatureTree;
pub use model::MAX_FEATURE_DEPTH;
pub use model::ParameterSpec;
pub use model::RESERVED_FEATURE_KEYS;
pub use model::feature_tree_from_value;
pub use nesting::nest_flattened_features;
pub use registry::VersionRegistry;
pub use resolver::EnabledFeature;
pub use resolver::FeatureResolver;
pub use resolver::VersionInfo;
