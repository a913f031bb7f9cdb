//! Config file loading tests for feature-gate-config.
// crates/feature-gate-config/tests/config_loading.rs
// =============================================================================
// Module: Config Loading Tests
// Description: Load feature-gate.toml files from disk.
// Purpose: Ensure size, encoding, and missing-file limits fail closed.
// =============================================================================

use std::fs;

use feature_gate_config::FeatureGateConfig;
use feature_gate_config::MAX_CONFIG_FILE_SIZE;

mod common;

use common::TestResult;
use common::assert_invalid;

#[test]
fn loads_explicit_path() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("feature-gate.toml");
    fs::write(&path, "[compiler]\nroot_interface = \"ISettings\"\n")
        .map_err(|err| err.to_string())?;
    let config = FeatureGateConfig::load(Some(&path)).map_err(|err| err.to_string())?;
    if config.compiler.root_interface != "ISettings" {
        return Err("root_interface not loaded".to_string());
    }
    Ok(())
}

#[test]
fn explicit_missing_file_is_an_error() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    assert_invalid(FeatureGateConfig::load(Some(&path)), "config io error")?;
    assert_invalid(FeatureGateConfig::load_or_default(Some(&path)), "config io error")
}

#[test]
fn oversized_file_is_rejected() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("feature-gate.toml");
    let padding = format!("# {}\n", "x".repeat(MAX_CONFIG_FILE_SIZE));
    fs::write(&path, padding).map_err(|err| err.to_string())?;
    assert_invalid(FeatureGateConfig::load(Some(&path)), "config file exceeds size limit")
}

#[test]
fn non_utf8_file_is_rejected() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("feature-gate.toml");
    fs::write(&path, [0xff, 0xfe, 0x00]).map_err(|err| err.to_string())?;
    assert_invalid(FeatureGateConfig::load(Some(&path)), "config file must be utf-8")
}

#[test]
fn invalid_values_fail_after_parse() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("feature-gate.toml");
    fs::write(&path, "[versions]\ndefault_version = \"a\\\\b\"\n").map_err(|err| err.to_string())?;
    assert_invalid(FeatureGateConfig::load(Some(&path)), "must not contain path separators")
}
