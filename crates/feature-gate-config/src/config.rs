// crates/feature-gate-config/src/config.rs
// ============================================================================
// Module: Feature Gate Configuration
// Description: Configuration loading and validation for feature-gate tooling.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: feature-gate-schema, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The path is resolved from an explicit argument, then the
//! `FEATURE_GATE_CONFIG` environment variable, then `feature-gate.toml` in the
//! working directory. Every section is optional and falls back to defaults;
//! unknown keys are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use feature_gate_schema::DEFAULT_ROOT_INTERFACE;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "feature-gate.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "FEATURE_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of a version identifier.
pub(crate) const MAX_VERSION_NAME_LENGTH: usize = 128;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Feature gate tooling configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureGateConfig {
    /// Typed definition compiler settings.
    #[serde(default)]
    pub compiler: CompilerConfig,
    /// Feature tree and generated artifact settings.
    #[serde(default)]
    pub definitions: DefinitionsConfig,
    /// Version document settings.
    #[serde(default)]
    pub versions: VersionsConfig,
    /// Structured event log settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FeatureGateConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        Self::load_resolved(&resolved)
    }

    /// Loads configuration, falling back to defaults when no file exists.
    ///
    /// Defaults apply only when neither `path` nor [`CONFIG_ENV_VAR`] names a
    /// file and `feature-gate.toml` is absent; an explicitly named file must
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an existing or explicit config fails to
    /// load or validate.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        let implicit = path.is_none() && env::var_os(CONFIG_ENV_VAR).is_none();
        if implicit && !resolved.exists() {
            return Ok(Self::default());
        }
        Self::load_resolved(&resolved)
    }

    /// Parses configuration from TOML text and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        if content.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.compiler.validate()?;
        self.definitions.validate()?;
        self.versions.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Reads, parses, and validates the file at `resolved`.
    fn load_resolved(resolved: &Path) -> Result<Self, ConfigError> {
        validate_path(resolved)?;
        let bytes = fs::read(resolved).map_err(|err| ConfigError::Io(io_message(resolved, &err)))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }
}

/// Typed definition compiler settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerConfig {
    /// Typed definition source file.
    #[serde(default = "default_compiler_source")]
    pub source: PathBuf,
    /// Root interface compiled into the schema.
    #[serde(default = "default_root_interface")]
    pub root_interface: String,
    /// Schema artifact path.
    #[serde(default = "default_compiler_output")]
    pub output: PathBuf,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            source: default_compiler_source(),
            root_interface: default_root_interface(),
            output: default_compiler_output(),
        }
    }
}

impl CompilerConfig {
    /// Validates compiler settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_buf("compiler.source", &self.source)?;
        validate_path_buf("compiler.output", &self.output)?;
        if !is_identifier(&self.root_interface) {
            return Err(ConfigError::Invalid(format!(
                "compiler.root_interface must be an identifier: {}",
                self.root_interface
            )));
        }
        Ok(())
    }
}

/// Feature tree and generated artifact settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefinitionsConfig {
    /// Feature definition tree (JSON).
    #[serde(default = "default_definitions_path")]
    pub path: PathBuf,
    /// Version schema artifact path.
    #[serde(default = "default_schema_output")]
    pub schema_output: PathBuf,
    /// Default configuration artifact path.
    #[serde(default = "default_defaults_output")]
    pub defaults_output: PathBuf,
    /// Version name stamped into default configurations.
    #[serde(default = "default_version_name")]
    pub default_name: String,
    /// Version description stamped into default configurations.
    #[serde(default)]
    pub default_description: String,
}

impl Default for DefinitionsConfig {
    fn default() -> Self {
        Self {
            path: default_definitions_path(),
            schema_output: default_schema_output(),
            defaults_output: default_defaults_output(),
            default_name: default_version_name(),
            default_description: String::new(),
        }
    }
}

impl DefinitionsConfig {
    /// Validates definition settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_buf("definitions.path", &self.path)?;
        validate_path_buf("definitions.schema_output", &self.schema_output)?;
        validate_path_buf("definitions.defaults_output", &self.defaults_output)?;
        if self.default_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "definitions.default_name must be non-empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Version document settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionsConfig {
    /// Directory holding `<version>.json` documents.
    #[serde(default = "default_versions_dir")]
    pub dir: PathBuf,
    /// Version used when a requested version is unknown.
    #[serde(default = "default_version_name")]
    pub default_version: String,
}

impl Default for VersionsConfig {
    fn default() -> Self {
        Self {
            dir: default_versions_dir(),
            default_version: default_version_name(),
        }
    }
}

impl VersionsConfig {
    /// Validates version settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_buf("versions.dir", &self.dir)?;
        validate_version_name("versions.default_version", &self.default_version)
    }

    /// Returns the document path for `version` inside [`VersionsConfig::dir`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `version` is not a plain name.
    pub fn document_path(&self, version: &str) -> Result<PathBuf, ConfigError> {
        validate_version_name("version", version)?;
        Ok(self.dir.join(format!("{version}.json")))
    }
}

/// Structured event log settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Event sink selection.
    #[serde(default)]
    pub sink: LogSink,
    /// JSON-lines log path for the file sink.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl LoggingConfig {
    /// Validates logging settings.
    fn validate(&self) -> Result<(), ConfigError> {
        match (&self.sink, &self.path) {
            (LogSink::File, None) => Err(ConfigError::Invalid(
                "logging.sink = \"file\" requires logging.path".to_string(),
            )),
            (_, Some(path)) => validate_path_buf("logging.path", path),
            (_, None) => Ok(()),
        }
    }
}

/// Event sink kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogSink {
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to `logging.path`.
    File,
    /// Events are discarded.
    #[default]
    None,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a configured path against emptiness and length constraints.
fn validate_path_buf(field: &str, value: &Path) -> Result<(), ConfigError> {
    let text = value.to_string_lossy();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates a version name used as a file stem.
fn validate_version_name(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if value.len() > MAX_VERSION_NAME_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(ConfigError::Invalid(format!("{field} must not contain path separators")));
    }
    Ok(())
}

/// Returns whether `value` is an ASCII-leading identifier (`[A-Za-z_$][\w$]*`).
fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '$')
}

/// Formats an I/O failure with the path it concerns.
fn io_message(path: &Path, err: &io::Error) -> String {
    format!("{}: {err}", path.display())
}

/// Default typed definition source.
fn default_compiler_source() -> PathBuf {
    PathBuf::from("src/core/feature.d.ts")
}

/// Default root interface.
fn default_root_interface() -> String {
    DEFAULT_ROOT_INTERFACE.to_string()
}

/// Default schema artifact path.
fn default_compiler_output() -> PathBuf {
    PathBuf::from("public/feature.schema.json")
}

/// Default feature tree path.
fn default_definitions_path() -> PathBuf {
    PathBuf::from("features.json")
}

/// Default version schema artifact path.
fn default_schema_output() -> PathBuf {
    PathBuf::from("version.schema.json")
}

/// Default configuration artifact path.
fn default_defaults_output() -> PathBuf {
    PathBuf::from("default-version.json")
}

/// Default version directory.
fn default_versions_dir() -> PathBuf {
    PathBuf::from("versions")
}

/// Default version name.
fn default_version_name() -> String {
    String::from("enterprise")
}
