// crates/feature-gate-schema/tests/proptest_doc_tags.rs
// ============================================================================
// Module: Doc Tag Property-Based Tests
// Description: Property tests for lenient tag interpretation.
// Purpose: Detect panics and lost values across generated tag text.
// ============================================================================

//! Property-based tests for doc comment tag parsing.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use feature_gate_schema::compile_definition;
use feature_gate_schema::doc::DocComment;
use feature_gate_schema::doc::parse_enum_tag;
use proptest::prelude::*;
use serde_json::Value;

proptest! {
    #[test]
    fn comma_lists_split_into_trimmed_strings(
        entries in prop::collection::vec("[a-z0-9]{1,6}", 1 .. 6),
    ) {
        let expected: Vec<Value> = entries.iter().cloned().map(Value::String).collect();
        prop_assert_eq!(parse_enum_tag(&entries.join(" , ")), expected.clone());
        let json = serde_json::to_string(&entries).expect("json");
        prop_assert_eq!(parse_enum_tag(&json), expected);
    }

    #[test]
    fn doc_parsing_never_panics(body in "[ -~\n]{0,200}") {
        let doc = DocComment::parse(&body);
        if let Some(title) = &doc.title {
            prop_assert!(!title.is_empty());
        }
    }

    #[test]
    fn compiler_never_panics_on_noise(source in "[ -~\n]{0,200}") {
        let _ = compile_definition(&source, "IFeature");
    }
}
