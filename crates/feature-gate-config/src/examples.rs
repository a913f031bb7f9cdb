// crates/feature-gate-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example `feature-gate.toml`. Every value matches the built-in
//! default except the logging sink.

/// Returns a canonical example `feature-gate.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[compiler]
source = "src/core/feature.d.ts"
root_interface = "IFeature"
output = "public/feature.schema.json"

[definitions]
path = "features.json"
schema_output = "version.schema.json"
defaults_output = "default-version.json"
default_name = "enterprise"
default_description = ""

[versions]
dir = "versions"
default_version = "enterprise"

[logging]
sink = "file"
path = "feature-gate.log"
"#,
    )
}
