// crates/feature-gate-schema/src/typedefs.rs
// ============================================================================
// Module: Type Definition Renderer
// Description: TypeScript `IVersion` text derived from a version schema.
// Purpose: Give application code a typed view of the feature list.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Renders the top-level features of a generated version schema as a
//! TypeScript type. Only enablement is typed; parameters stay untyped.
//! Feature keys that are not plain identifiers are emitted quoted.

use std::fmt::Write as _;

use serde_json::Value;

/// Renders the `IVersion` type for a version schema.
///
/// Missing or malformed `properties.features.properties` renders an empty
/// `features` block.
#[must_use]
pub fn type_definitions(version_schema: &Value) -> String {
    let mut out = String::from("export type IVersion = {\n");
    out.push_str("  // Version name\n");
    out.push_str("  name: string;\n");
    out.push_str("  // Version description\n");
    out.push_str("  description?: string;\n");
    out.push_str("  // Feature list\n");
    out.push_str("  features: {\n");
    if let Some(features) = version_schema
        .pointer("/properties/features/properties")
        .and_then(Value::as_object)
    {
        for (key, node) in features {
            let title = node.get("title").and_then(Value::as_str).unwrap_or(key);
            let _ = writeln!(out, "    // {title}");
            let _ = writeln!(out, "    {}: {{", property_key(key));
            out.push_str("      // Whether the feature is enabled\n");
            out.push_str("      enabled: boolean;\n");
            out.push_str("    };\n");
        }
    }
    out.push_str("  };\n");
    out.push_str("};\n");
    out
}

/// Quotes `key` unless it is a valid identifier.
fn property_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_ident = chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '$');
    if is_ident { key.to_string() } else { Value::String(key.to_string()).to_string() }
}
