// crates/feature-gate-config/src/lib.rs
// ============================================================================
// Module: Feature Gate Config Library
// Description: Canonical config model, loading, and validation.
// Purpose: Single source of truth for feature-gate.toml semantics.
// Dependencies: feature-gate-schema, serde, toml
// ============================================================================

//! ## Overview
//! `feature-gate-config` defines the configuration model shared by the
//! `feature-gate` tooling: where the typed definition and feature tree live,
//! where generated artifacts go, which version is the fallback, and where
//! structured events are logged. Loading is size-limited and validation fails
//! closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
