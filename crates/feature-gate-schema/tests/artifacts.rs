// crates/feature-gate-schema/tests/artifacts.rs
// ============================================================================
// Module: Schema Artifact Tests
// Description: Writing and verifying generated artifacts on disk.
// Purpose: Ensure stale or misplaced artifacts fail verification.
// ============================================================================
//! ## Overview
//! Round-trips generated bytes through a temporary directory and checks the
//! mismatch and path error cases.

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
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;
use std::path::Path;

use feature_gate_schema::ArtifactError;
use feature_gate_schema::pretty_json_bytes;
use feature_gate_schema::verify_artifact;
use feature_gate_schema::write_artifact;
use serde_json::json;

#[test]
fn pretty_bytes_keep_insertion_order() {
    let bytes = pretty_json_bytes(&json!({ "zeta": 1, "alpha": [true] })).expect("bytes");
    assert_eq!(
        String::from_utf8(bytes).expect("utf8"),
        "{\n  \"zeta\": 1,\n  \"alpha\": [\n    true\n  ]\n}\n"
    );
}

#[test]
fn write_creates_parents_and_verifies() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("generated").join("schema").join("feature.schema.json");
    let bytes = pretty_json_bytes(&json!({ "type": "object" })).expect("bytes");
    write_artifact(&path, &bytes).expect("write");
    assert_eq!(fs::read(&path).expect("read"), bytes);
    verify_artifact(&path, &bytes).expect("verify");
}

#[test]
fn stale_artifact_is_a_mismatch() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("version.schema.json");
    write_artifact(&path, b"{}\n").expect("write");
    let err = verify_artifact(&path, b"{ }\n").expect_err("stale");
    assert_eq!(err, ArtifactError::Mismatch(path));
}

#[test]
fn missing_artifact_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = verify_artifact(&dir.path().join("absent.json"), b"{}").expect_err("missing");
    assert!(matches!(err, ArtifactError::Io(_)));
}

#[test]
fn directory_and_empty_paths_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert_eq!(
        write_artifact(dir.path(), b"{}"),
        Err(ArtifactError::OutputPath(dir.path().to_path_buf()))
    );
    assert!(matches!(write_artifact(Path::new(""), b"{}"), Err(ArtifactError::OutputPath(_))));
}
