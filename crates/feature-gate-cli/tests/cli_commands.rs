// crates/feature-gate-cli/tests/cli_commands.rs
// ============================================================================
// Module: CLI Command Tests
// Description: End-to-end coverage of the feature-gate binary.
// Purpose: Ensure generate/check flows, queries, and failures behave on disk.
// ============================================================================

//! ## Overview
//! Runs the built `feature-gate` binary inside temporary project directories.
//! Each test writes its own fixtures; the implicit config file is absent unless
//! a test writes one.

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

use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::process::Output;

use serde_json::Value;
use serde_json::json;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn Error>>;

const DEFINITION: &str = r#"
export interface IFeature {
  /**
   * Enabled
   * Whether the feature is on.
   */
  enabled: boolean;
  /**
   * @enum ["dev", "prod"]
   * @default "dev"
   */
  mode?: string;
}
"#;

fn feature_tree() -> Value {
    json!({
        "projects": {
            "title": "Projects",
            "params": {
                "max": { "type": "number", "default": 10, "minimum": 1 }
            },
            "pipelines": {
                "title": "Pipelines",
                "params": { "runners": { "type": "number", "default": 2 } }
            }
        },
        "audit": { "title": "Audit log" }
    })
}

fn run(dir: &Path, args: &[&str]) -> Result<Output, Box<dyn Error>> {
    Ok(Command::new(env!("CARGO_BIN_EXE_feature-gate"))
        .args(args)
        .current_dir(dir)
        .env_remove("FEATURE_GATE_CONFIG")
        .output()?)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_json(path: &Path, value: &Value) -> TestResult {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)?;
    Ok(())
}

fn read_json(path: &Path) -> Result<Value, Box<dyn Error>> {
    Ok(serde_json::from_slice(&fs::read(path)?)?)
}

fn project_with_definition() -> Result<TempDir, Box<dyn Error>> {
    let dir = TempDir::new()?;
    let source = dir.path().join("src/core/feature.d.ts");
    fs::create_dir_all(source.parent().ok_or("source has no parent")?)?;
    fs::write(&source, DEFINITION)?;
    Ok(dir)
}

fn project_with_versions() -> Result<TempDir, Box<dyn Error>> {
    let dir = TempDir::new()?;
    write_json(
        &dir.path().join("versions/enterprise.json"),
        &json!({
            "name": "enterprise",
            "features": {
                "projects": {
                    "enabled": true,
                    "params": { "max": 50 },
                    "pipelines": { "enabled": true, "params": { "runners": 8 } }
                },
                "audit": { "enabled": true, "params": {} }
            }
        }),
    )?;
    write_json(
        &dir.path().join("versions/community.json"),
        &json!({
            "version": "community",
            "name": "community",
            "features": {
                "projects": {
                    "enabled": true,
                    "params": { "max": 5 },
                    "children": {
                        "pipelines": { "enabled": false, "params": { "runners": 1 } }
                    }
                }
            }
        }),
    )?;
    Ok(dir)
}

// ============================================================================
// SECTION: Compile
// ============================================================================

#[test]
fn compile_writes_schema_and_check_detects_drift() -> TestResult {
    let dir = project_with_definition()?;
    let output = run(dir.path(), &["compile"])?;
    assert!(output.status.success(), "compile failed: {}", stderr(&output));

    let artifact = dir.path().join("public/feature.schema.json");
    let schema = read_json(&artifact)?;
    assert_eq!(schema["title"], json!("IFeature"));
    assert_eq!(schema["required"], json!(["enabled"]));
    assert_eq!(schema["properties"]["enabled"]["title"], json!("Enabled"));
    assert_eq!(schema["properties"]["mode"]["enum"], json!(["dev", "prod"]));
    assert!(fs::read(&artifact)?.ends_with(b"}\n"));

    let check = run(dir.path(), &["compile", "--check"])?;
    assert!(check.status.success(), "check failed: {}", stderr(&check));
    assert!(stdout(&check).contains("artifact up to date"));

    fs::write(&artifact, b"{}\n")?;
    let drift = run(dir.path(), &["compile", "--check"])?;
    assert!(!drift.status.success());
    assert!(stderr(&drift).contains("artifact out of date"));
    Ok(())
}

#[test]
fn compile_without_root_interface_writes_nothing() -> TestResult {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("other.d.ts"), "interface Other { flag: boolean; }")?;
    let output =
        run(dir.path(), &["compile", "--source", "other.d.ts", "--out", "schema.json"])?;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("IFeature interface not found"));
    assert!(!dir.path().join("schema.json").exists());
    Ok(())
}

#[test]
fn compile_honours_root_override() -> TestResult {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("other.d.ts"), "interface Other { flag: boolean; }")?;
    let output = run(
        dir.path(),
        &["compile", "--source", "other.d.ts", "--root", "Other", "--out", "schema.json"],
    )?;
    assert!(output.status.success(), "compile failed: {}", stderr(&output));
    let schema = read_json(&dir.path().join("schema.json"))?;
    assert_eq!(schema["title"], json!("Other"));
    assert_eq!(schema["properties"]["flag"], json!({ "type": "boolean" }));
    Ok(())
}

#[test]
fn compile_reports_parse_errors() -> TestResult {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("broken.d.ts"), "interface IFeature { flag: ")?;
    let output = run(dir.path(), &["compile", "--source", "broken.d.ts"])?;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("broken.d.ts"));
    assert!(!dir.path().join("public/feature.schema.json").exists());
    Ok(())
}

// ============================================================================
// SECTION: Feature Tree Artifacts
// ============================================================================

#[test]
fn generated_defaults_validate_against_generated_schema() -> TestResult {
    let dir = TempDir::new()?;
    write_json(&dir.path().join("features.json"), &feature_tree())?;

    let schema = run(dir.path(), &["schema"])?;
    assert!(schema.status.success(), "schema failed: {}", stderr(&schema));
    let defaults = run(dir.path(), &["defaults"])?;
    assert!(defaults.status.success(), "defaults failed: {}", stderr(&defaults));

    let document = read_json(&dir.path().join("default-version.json"))?;
    assert_eq!(document["name"], json!("enterprise"));
    assert_eq!(
        document["features"]["projects"]["pipelines"],
        json!({ "enabled": true, "params": { "runners": 2 } })
    );

    let validate = run(
        dir.path(),
        &["validate", "--schema", "version.schema.json", "--document", "default-version.json"],
    )?;
    assert!(validate.status.success(), "validate failed: {}", stderr(&validate));
    assert!(stdout(&validate).contains("valid"));

    let check = run(dir.path(), &["defaults", "--check"])?;
    assert!(check.status.success(), "check failed: {}", stderr(&check));
    Ok(())
}

#[test]
fn nested_defaults_use_children() -> TestResult {
    let dir = TempDir::new()?;
    write_json(&dir.path().join("features.json"), &feature_tree())?;
    let output = run(dir.path(), &["defaults", "--nested", "--out", "nested.json"])?;
    assert!(output.status.success(), "defaults failed: {}", stderr(&output));

    let document = read_json(&dir.path().join("nested.json"))?;
    let projects = &document["features"]["projects"];
    assert_eq!(projects["children"]["pipelines"]["enabled"], json!(true));
    assert!(projects.get("pipelines").is_none());
    Ok(())
}

#[test]
fn validate_reports_instance_paths() -> TestResult {
    let dir = TempDir::new()?;
    write_json(&dir.path().join("features.json"), &feature_tree())?;
    let schema = run(dir.path(), &["schema"])?;
    assert!(schema.status.success(), "schema failed: {}", stderr(&schema));
    write_json(
        &dir.path().join("bad.json"),
        &json!({ "name": "x", "features": { "projects": { "enabled": "yes" } } }),
    )?;

    let args = ["validate", "--schema", "version.schema.json", "--document", "bad.json"];
    let output = run(dir.path(), &args)?;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("/features/projects/enabled"));
    Ok(())
}

#[test]
fn types_prints_version_declaration() -> TestResult {
    let dir = TempDir::new()?;
    write_json(&dir.path().join("features.json"), &feature_tree())?;
    let output = run(dir.path(), &["types"])?;
    assert!(output.status.success(), "types failed: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.starts_with("export type IVersion = {\n"));
    assert!(text.contains("    // Projects\n    projects: {\n"));
    assert!(text.contains("    // Audit log\n    audit: {\n"));
    Ok(())
}

#[test]
fn missing_definitions_fail() -> TestResult {
    let dir = TempDir::new()?;
    let output = run(dir.path(), &["schema"])?;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("features.json"));
    Ok(())
}

// ============================================================================
// SECTION: Queries
// ============================================================================

#[test]
fn query_resolves_flattened_and_nested_documents() -> TestResult {
    let dir = project_with_versions()?;

    let enabled = run(dir.path(), &["query", "enabled", "projects.pipelines"])?;
    assert!(enabled.status.success(), "query failed: {}", stderr(&enabled));
    assert_eq!(stdout(&enabled), "true\n");

    let nested = run(
        dir.path(),
        &["query", "enabled", "projects.pipelines", "--version", "community"],
    )?;
    assert_eq!(stdout(&nested), "false\n");

    let params = run(dir.path(), &["query", "params", "projects.pipelines"])?;
    assert_eq!(stdout(&params), "{\"runners\":8}\n");

    let option = run(dir.path(), &["query", "option", "projects", "max"])?;
    assert_eq!(stdout(&option), "50\n");

    let missing = run(dir.path(), &["query", "config", "projects.unknown"])?;
    assert!(missing.status.success());
    assert_eq!(stdout(&missing), "null\n");

    let has = run(dir.path(), &["query", "has", "audit", "--version", "community"])?;
    assert_eq!(stdout(&has), "false\n");
    Ok(())
}

#[test]
fn query_unknown_version_falls_back_to_default() -> TestResult {
    let dir = project_with_versions()?;
    let output = run(dir.path(), &["query", "info", "--version", "missing"])?;
    assert!(output.status.success(), "query failed: {}", stderr(&output));
    let info: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(
        info,
        json!({ "enabledFeatures": 2, "name": "enterprise", "totalFeatures": 2, "version": null })
    );
    Ok(())
}

#[test]
fn query_list_and_children() -> TestResult {
    let dir = project_with_versions()?;
    let list = run(dir.path(), &["query", "list"])?;
    assert_eq!(stdout(&list), "[\"community\",\"enterprise\"]\n");

    let children = run(dir.path(), &["query", "children", "projects"])?;
    let value: Value = serde_json::from_str(&stdout(&children))?;
    assert_eq!(value["pipelines"]["enabled"], json!(true));
    assert_eq!(value["pipelines"]["params"], json!({ "runners": 8 }));
    Ok(())
}

#[test]
fn query_without_default_document_fails() -> TestResult {
    let dir = project_with_versions()?;
    fs::remove_file(dir.path().join("versions/enterprise.json"))?;
    let output = run(dir.path(), &["query", "enabled", "projects", "--version", "missing"])?;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("`missing` not found"));
    Ok(())
}

// ============================================================================
// SECTION: Diff
// ============================================================================

#[test]
fn diff_renders_markdown_and_json() -> TestResult {
    let dir = project_with_versions()?;
    let markdown = run(dir.path(), &["diff", "community", "enterprise"])?;
    assert!(markdown.status.success(), "diff failed: {}", stderr(&markdown));
    let text = stdout(&markdown);
    assert!(text.contains("## Added features\n- audit: enabled\n"));
    assert!(text.contains("### projects\n  - params.max: 5 → 50\n"));
    assert!(text.contains("### projects.pipelines\n  - enabled: false → true\n"));

    let json_output = run(dir.path(), &["diff", "community", "enterprise", "--format", "json"])?;
    let report: Value = serde_json::from_str(&stdout(&json_output))?;
    assert_eq!(report["added"], json!([{ "feature": "audit", "enabled": true }]));
    assert_eq!(report["removed"], json!([]));
    Ok(())
}

#[test]
fn diff_of_identical_versions_is_empty() -> TestResult {
    let dir = project_with_versions()?;
    let output = run(dir.path(), &["diff", "enterprise", "enterprise"])?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "no feature differences\n");
    Ok(())
}

#[test]
fn diff_rejects_version_paths() -> TestResult {
    let dir = project_with_versions()?;
    let output = run(dir.path(), &["diff", "../enterprise", "community"])?;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("must not contain path separators"));
    Ok(())
}

// ============================================================================
// SECTION: Config and Events
// ============================================================================

#[test]
fn config_validate_requires_a_file() -> TestResult {
    let dir = TempDir::new()?;
    let missing = run(dir.path(), &["config", "validate"])?;
    assert!(!missing.status.success());

    fs::write(dir.path().join("feature-gate.toml"), "[versions]\ndefault_version = \"pro\"\n")?;
    let ok = run(dir.path(), &["config", "validate"])?;
    assert!(ok.status.success(), "config validate failed: {}", stderr(&ok));
    assert_eq!(stdout(&ok), "config ok\n");
    Ok(())
}

#[test]
fn invalid_config_fails_closed() -> TestResult {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("custom.toml"), "[compiler]\nroot_interface = \"1bad\"\n")?;
    let output = run(dir.path(), &["--config", "custom.toml", "config", "validate"])?;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("compiler.root_interface"));
    Ok(())
}

#[test]
fn configured_paths_and_file_events() -> TestResult {
    let dir = project_with_definition()?;
    fs::write(
        dir.path().join("feature-gate.toml"),
        "[compiler]\noutput = \"out/schema.json\"\n\n\
         [logging]\nsink = \"file\"\npath = \"events.log\"\n",
    )?;
    let output = run(dir.path(), &["compile"])?;
    assert!(output.status.success(), "compile failed: {}", stderr(&output));
    assert!(dir.path().join("out/schema.json").exists());

    let log = fs::read_to_string(dir.path().join("events.log"))?;
    let events: Vec<Value> =
        log.lines().map(serde_json::from_str).collect::<Result<_, _>>()?;
    let labels: Vec<&str> = events.iter().filter_map(|event| event["event"].as_str()).collect();
    assert_eq!(labels, vec!["compile_started", "artifact_written", "compile_completed"]);
    assert_eq!(events[2]["property_count"], json!(2));
    Ok(())
}
