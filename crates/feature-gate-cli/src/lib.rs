// crates/feature-gate-cli/src/lib.rs
// ============================================================================
// Module: Feature Gate CLI Library
// Description: Shared helpers for the feature-gate binary.
// Purpose: Expose the structured event log to the binary and its tests.
// Dependencies: feature-gate-config, serde, serde_json
// ============================================================================

//! ## Overview
//! The `feature-gate` binary lives in `main.rs`. This library holds the
//! pieces that are worth testing on their own, currently the JSON-lines
//! [`events`] log.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod events;
