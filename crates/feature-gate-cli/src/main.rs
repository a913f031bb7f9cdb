// crates/feature-gate-cli/src/main.rs
// ============================================================================
// Module: Feature Gate CLI Entry Point
// Description: Command dispatcher for schema generation and feature queries.
// Purpose: Drive the compilers and the resolution engine from files on disk.
// Dependencies: clap, feature-gate-config, feature-gate-core, feature-gate-schema,
//               jsonschema, serde, serde_jcs, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The `feature-gate` binary is the only place that touches the filesystem.
//! It loads `feature-gate.toml`, reads typed definitions, feature trees, and
//! version documents under hard size limits, and hands them to the pure
//! library crates. Generated artifacts are written deterministically, or
//! compared byte-for-byte with `--check`. Query results are printed as
//! canonical JSON.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use feature_gate_cli::events::ArtifactEvent;
use feature_gate_cli::events::CompileEvent;
use feature_gate_cli::events::CompileEventParams;
use feature_gate_cli::events::CompileOutcome;
use feature_gate_cli::events::EventSink;
use feature_gate_cli::events::QueryEvent;
use feature_gate_cli::events::event_sink_from_config;
use feature_gate_config::FeatureGateConfig;
use feature_gate_config::VersionsConfig;
use feature_gate_core::ConfigurationDocument;
use feature_gate_core::DefaultDocumentOptions;
use feature_gate_core::FeatureResolver;
use feature_gate_core::FeatureTree;
use feature_gate_core::VersionRegistry;
use feature_gate_core::compare_versions;
use feature_gate_core::default_document;
use feature_gate_core::default_nested_document;
use feature_gate_core::feature_tree_from_value;
use feature_gate_schema::CompileError;
use feature_gate_schema::compile_definition;
use feature_gate_schema::lexer::MAX_SOURCE_BYTES;
use feature_gate_schema::pretty_json_bytes;
use feature_gate_schema::type_definitions;
use feature_gate_schema::verify_artifact;
use feature_gate_schema::version_schema;
use feature_gate_schema::write_artifact;
use jsonschema::Draft;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a JSON input (feature tree, version document, schema).
const MAX_JSON_INPUT_BYTES: usize = 8 * 1024 * 1024;
/// Maximum number of version documents loaded from the versions directory.
const MAX_VERSION_DOCUMENTS: usize = 1024;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "feature-gate", disable_help_subcommand = true)]
struct Cli {
    /// Config file path (defaults to feature-gate.toml or `FEATURE_GATE_CONFIG`).
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a typed interface definition into a JSON Schema.
    Compile(CompileCommand),
    /// Generate the version schema from a feature definition tree.
    Schema(SchemaCommand),
    /// Generate the default configuration from a feature definition tree.
    Defaults(DefaultsCommand),
    /// Print TypeScript declarations for the version schema.
    Types(TypesCommand),
    /// Query feature state in the version documents.
    Query {
        /// Selected query subcommand.
        #[command(subcommand)]
        command: QueryCommand,
    },
    /// Compare two version documents.
    Diff(DiffCommand),
    /// Validate a document against a generated schema.
    Validate(ValidateCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for `compile`.
#[derive(Args, Debug)]
struct CompileCommand {
    /// Typed definition source (overrides `compiler.source`).
    #[arg(long, value_name = "FILE")]
    source: Option<PathBuf>,
    /// Root interface name (overrides `compiler.root_interface`).
    #[arg(long, value_name = "NAME")]
    root: Option<String>,
    /// Artifact options.
    #[command(flatten)]
    artifact: ArtifactArgs,
}

/// Arguments for `schema`.
#[derive(Args, Debug)]
struct SchemaCommand {
    /// Feature definition source.
    #[command(flatten)]
    definitions: DefinitionsArgs,
    /// Artifact options.
    #[command(flatten)]
    artifact: ArtifactArgs,
}

/// Arguments for `defaults`.
#[derive(Args, Debug)]
struct DefaultsCommand {
    /// Feature definition source.
    #[command(flatten)]
    definitions: DefinitionsArgs,
    /// Artifact options.
    #[command(flatten)]
    artifact: ArtifactArgs,
    /// Emit the nested `children` form instead of flattened children.
    #[arg(long)]
    nested: bool,
}

/// Arguments for `types`.
#[derive(Args, Debug)]
struct TypesCommand {
    /// Feature definition source.
    #[command(flatten)]
    definitions: DefinitionsArgs,
}

/// Feature definition source override.
#[derive(Args, Debug, Clone)]
struct DefinitionsArgs {
    /// Feature tree JSON (overrides `definitions.path`).
    #[arg(long, value_name = "FILE")]
    definitions: Option<PathBuf>,
}

/// Output options shared by generating commands.
#[derive(Args, Debug, Clone)]
struct ArtifactArgs {
    /// Output path (overrides the configured artifact path).
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
    /// Compare with the on-disk artifact instead of writing it.
    #[arg(long)]
    check: bool,
}

/// Query subcommands.
#[derive(Subcommand, Debug)]
enum QueryCommand {
    /// Print whether a feature is enabled.
    Enabled(QueryPathArgs),
    /// Print the feature node at a path.
    Config(QueryPathArgs),
    /// Print the params of a feature.
    Params(QueryPathArgs),
    /// Print the child features of a feature.
    Children(QueryPathArgs),
    /// Print whether a path resolves to a feature.
    Has(QueryPathArgs),
    /// Print a single parameter value of a feature.
    #[command(name = "option")]
    FeatureOption(QueryOptionArgs),
    /// Print the version summary.
    Info(QueryVersionArgs),
    /// List loaded versions.
    List,
}

/// Version selection for queries.
#[derive(Args, Debug, Clone)]
struct QueryVersionArgs {
    /// Version to query (defaults to `versions.default_version`).
    #[arg(long, value_name = "VERSION")]
    version: Option<String>,
}

/// Arguments for path queries.
#[derive(Args, Debug)]
struct QueryPathArgs {
    /// Dotted feature path.
    #[arg(value_name = "PATH")]
    path: String,
    /// Version selection.
    #[command(flatten)]
    version: QueryVersionArgs,
}

/// Arguments for `query option`.
#[derive(Args, Debug)]
struct QueryOptionArgs {
    /// Dotted feature path.
    #[arg(value_name = "PATH")]
    path: String,
    /// Parameter name.
    #[arg(value_name = "OPTION")]
    option: String,
    /// Version selection.
    #[command(flatten)]
    version: QueryVersionArgs,
}

/// Arguments for `diff`.
#[derive(Args, Debug)]
struct DiffCommand {
    /// Base version name.
    #[arg(value_name = "BASE")]
    base: String,
    /// Target version name.
    #[arg(value_name = "TARGET")]
    target: String,
    /// Report format.
    #[arg(long, value_enum, default_value_t = DiffFormat::Markdown)]
    format: DiffFormat,
}

/// Output formats for `diff`.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum DiffFormat {
    /// Pretty JSON report.
    Json,
    /// Markdown report.
    Markdown,
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
struct ValidateCommand {
    /// JSON Schema artifact.
    #[arg(long, value_name = "FILE")]
    schema: PathBuf,
    /// JSON document to validate.
    #[arg(long, value_name = "FILE")]
    document: PathBuf,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a feature-gate.toml file.
    Validate,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let config_path = cli.config_path.as_deref();
    let config = FeatureGateConfig::load_or_default(config_path)
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    let events = event_sink_from_config(&config.logging)
        .map_err(|err| CliError::new(format!("failed to open event log: {err}")))?;
    let context = CommandContext {
        config: &config,
        events: events.as_ref(),
    };

    match cli.command {
        Commands::Compile(command) => command_compile(&context, &command),
        Commands::Schema(command) => command_schema(&context, &command),
        Commands::Defaults(command) => command_defaults(&context, &command),
        Commands::Types(command) => command_types(&context, &command),
        Commands::Query {
            command,
        } => command_query(&context, &command),
        Commands::Diff(command) => command_diff(&context, &command),
        Commands::Validate(command) => command_validate(&command),
        Commands::Config {
            command: ConfigCommand::Validate,
        } => command_config_validate(config_path),
    }
}

/// Loaded configuration and event sink shared by commands.
struct CommandContext<'a> {
    /// Loaded configuration.
    config: &'a FeatureGateConfig,
    /// Structured event sink.
    events: &'a dyn EventSink,
}

// ============================================================================
// SECTION: Compile Command
// ============================================================================

/// Compile failure with the label recorded in the event log.
struct CompileFailure {
    /// Normalized error kind label.
    kind: &'static str,
    /// User-facing error.
    error: CliError,
}

/// Executes `compile`.
fn command_compile(context: &CommandContext<'_>, command: &CompileCommand) -> CliResult<ExitCode> {
    let compiler = &context.config.compiler;
    let source = command.source.as_deref().unwrap_or(&compiler.source);
    let root = command.root.as_deref().unwrap_or(&compiler.root_interface);
    let output = command.artifact.out.as_deref().unwrap_or(&compiler.output);
    let record = |outcome, property_count, error_kind| {
        context.events.record_compile(&CompileEvent::new(&CompileEventParams {
            outcome,
            source,
            root_interface: root,
            output,
            property_count,
            error_kind,
        }));
    };

    record(CompileOutcome::Started, None, None);
    let schema = match compile_source(source, root) {
        Ok(schema) => schema,
        Err(failure) => {
            record(CompileOutcome::Failed, None, Some(failure.kind));
            return Err(failure.error);
        }
    };
    let property_count =
        schema.get("properties").and_then(Value::as_object).map_or(0, serde_json::Map::len);
    if let Err(err) = emit_artifact(context.events, &schema, output, command.artifact.check) {
        record(CompileOutcome::Failed, Some(property_count), Some("artifact"));
        return Err(err);
    }
    record(CompileOutcome::Completed, Some(property_count), None);
    Ok(ExitCode::SUCCESS)
}

/// Reads and compiles a typed definition source.
fn compile_source(source: &Path, root: &str) -> Result<Value, CompileFailure> {
    let text = read_text(source, MAX_SOURCE_BYTES).map_err(|error| CompileFailure {
        kind: "io",
        error,
    })?;
    compile_definition(&text, root).map_err(|err| {
        let kind = match &err {
            CompileError::DefinitionNotFound {
                ..
            } => "definition_not_found",
            CompileError::Parse(_) => "parse",
        };
        CompileFailure {
            kind,
            error: CliError::new(format!("{}: {err}", source.display())),
        }
    })
}

// ============================================================================
// SECTION: Feature Tree Commands
// ============================================================================

/// Executes `schema`.
fn command_schema(context: &CommandContext<'_>, command: &SchemaCommand) -> CliResult<ExitCode> {
    let tree = load_feature_tree(context.config, &command.definitions)?;
    let output =
        command.artifact.out.as_deref().unwrap_or(&context.config.definitions.schema_output);
    emit_artifact(context.events, &version_schema(&tree), output, command.artifact.check)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `defaults`.
fn command_defaults(
    context: &CommandContext<'_>,
    command: &DefaultsCommand,
) -> CliResult<ExitCode> {
    let definitions = &context.config.definitions;
    let tree = load_feature_tree(context.config, &command.definitions)?;
    let output = command.artifact.out.as_deref().unwrap_or(&definitions.defaults_output);
    let options = DefaultDocumentOptions {
        name: definitions.default_name.clone(),
        description: definitions.default_description.clone(),
    };
    if command.nested {
        let document = default_nested_document(&tree, &options);
        emit_artifact(context.events, &document, output, command.artifact.check)?;
    } else {
        let document = default_document(&tree, &options);
        emit_artifact(context.events, &document, output, command.artifact.check)?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes `types`.
fn command_types(context: &CommandContext<'_>, command: &TypesCommand) -> CliResult<ExitCode> {
    let tree = load_feature_tree(context.config, &command.definitions)?;
    let rendered = type_definitions(&version_schema(&tree));
    write_stdout_bytes(rendered.as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Loads the feature definition tree named by the flag or the config.
fn load_feature_tree(
    config: &FeatureGateConfig,
    args: &DefinitionsArgs,
) -> CliResult<FeatureTree> {
    let path = args.definitions.as_deref().unwrap_or(&config.definitions.path);
    let value = read_json(path)?;
    feature_tree_from_value(&value)
        .map_err(|err| CliError::new(format!("{}: {err}", path.display())))
}

// ============================================================================
// SECTION: Query Commands
// ============================================================================

/// Executes `query` subcommands.
fn command_query(context: &CommandContext<'_>, command: &QueryCommand) -> CliResult<ExitCode> {
    let registry = load_registry(&context.config.versions)?;
    match command {
        QueryCommand::List => {
            let versions = registry.available_versions();
            let event = QueryEvent::evaluated(registry.default_version(), None, "list", true);
            context.events.record_query(&event);
            write_canonical_json(&versions)?;
        }
        QueryCommand::Info(args) => {
            let (version, resolver) = select_version(&registry, args)?;
            context.events.record_query(&QueryEvent::evaluated(version, None, "info", true));
            write_canonical_json(&resolver.version_info())?;
        }
        QueryCommand::Enabled(args) => {
            let (version, resolver) = select_version(&registry, &args.version)?;
            let enabled = resolver.is_feature_enabled(&args.path);
            record_path_query(context, version, &args.path, "enabled", enabled);
            write_canonical_json(&enabled)?;
        }
        QueryCommand::Config(args) => {
            let (version, resolver) = select_version(&registry, &args.version)?;
            let feature = resolver.feature_config(&args.path);
            record_path_query(context, version, &args.path, "config", feature.is_some());
            write_canonical_json(&feature)?;
        }
        QueryCommand::Params(args) => {
            let (version, resolver) = select_version(&registry, &args.version)?;
            let params = resolver.feature_params(&args.path);
            record_path_query(context, version, &args.path, "params", params.is_some());
            write_canonical_json(&params)?;
        }
        QueryCommand::Children(args) => {
            let (version, resolver) = select_version(&registry, &args.version)?;
            let children = resolver.child_features(&args.path);
            record_path_query(context, version, &args.path, "children", children.is_some());
            write_canonical_json(&children)?;
        }
        QueryCommand::Has(args) => {
            let (version, resolver) = select_version(&registry, &args.version)?;
            let found = resolver.has_feature(&args.path);
            record_path_query(context, version, &args.path, "has", found);
            write_canonical_json(&found)?;
        }
        QueryCommand::FeatureOption(args) => {
            let (version, resolver) = select_version(&registry, &args.version)?;
            let value = resolver.feature_option(&args.path, &args.option);
            record_path_query(context, version, &args.path, "option", value.is_some());
            write_canonical_json(&value)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Records a `query_evaluated` event for a path query.
fn record_path_query(
    context: &CommandContext<'_>,
    version: &str,
    path: &str,
    operation: &'static str,
    found: bool,
) {
    context.events.record_query(&QueryEvent::evaluated(version, Some(path), operation, found));
}

/// Resolves the requested version, falling back to the registry default.
fn select_version<'a>(
    registry: &'a VersionRegistry,
    args: &'a QueryVersionArgs,
) -> CliResult<(&'a str, &'a FeatureResolver)> {
    let requested = args.version.as_deref().unwrap_or_else(|| registry.default_version());
    let version =
        if registry.contains(requested) { requested } else { registry.default_version() };
    let resolver = registry.resolver(requested).ok_or_else(|| {
        CliError::new(format!(
            "version `{requested}` not found and default version `{}` is not loaded",
            registry.default_version()
        ))
    })?;
    Ok((version, resolver))
}

/// Loads every `<version>.json` document in the versions directory.
///
/// Documents may use either the flattened or the nested `children` form.
fn load_registry(versions: &VersionsConfig) -> CliResult<VersionRegistry> {
    let entries = fs::read_dir(&versions.dir).map_err(|err| {
        CliError::new(format!("failed to read versions dir {}: {err}", versions.dir.display()))
    })?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|err| {
                CliError::new(format!(
                    "failed to read versions dir {}: {err}",
                    versions.dir.display()
                ))
            })?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    if paths.len() > MAX_VERSION_DOCUMENTS {
        return Err(CliError::new(format!(
            "versions dir holds {} documents (max {MAX_VERSION_DOCUMENTS})",
            paths.len()
        )));
    }
    paths.sort();

    let mut registry = VersionRegistry::new(versions.default_version.clone());
    for path in paths {
        let Some(version) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let document = read_version_document(&path)?;
        registry.insert(version, document);
    }
    Ok(registry)
}

/// Reads a version document in flattened or nested form.
fn read_version_document(path: &Path) -> CliResult<ConfigurationDocument> {
    let value = read_json(path)?;
    FeatureResolver::from_flattened(value)
        .map(FeatureResolver::into_document)
        .map_err(|err| CliError::new(format!("{}: {err}", path.display())))
}

// ============================================================================
// SECTION: Diff and Validate Commands
// ============================================================================

/// Executes `diff`.
fn command_diff(context: &CommandContext<'_>, command: &DiffCommand) -> CliResult<ExitCode> {
    let versions = &context.config.versions;
    let base_path = versions.document_path(&command.base).map_err(config_error)?;
    let target_path = versions.document_path(&command.target).map_err(config_error)?;
    let base = read_version_document(&base_path)?;
    let target = read_version_document(&target_path)?;
    let diff = compare_versions(&base, &target);
    let output = match command.format {
        DiffFormat::Json => {
            pretty_json_bytes(&diff).map_err(|err| CliError::new(err.to_string()))?
        }
        DiffFormat::Markdown if diff.is_empty() => b"no feature differences\n".to_vec(),
        DiffFormat::Markdown => diff.to_markdown().into_bytes(),
    };
    write_stdout_bytes(&output).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `validate`.
fn command_validate(command: &ValidateCommand) -> CliResult<ExitCode> {
    let schema = read_json(&command.schema)?;
    let document = read_json(&command.document)?;
    let validator =
        jsonschema::options().with_draft(Draft::Draft7).build(&schema).map_err(|err| {
            CliError::new(format!("{}: invalid schema: {err}", command.schema.display()))
        })?;
    let errors: Vec<String> = validator
        .iter_errors(&document)
        .map(|err| {
            let location = err.instance_path().to_string();
            let location = if location.is_empty() { String::from("/") } else { location };
            format!("{location}: {err}")
        })
        .collect();
    if errors.is_empty() {
        write_stdout_line(&format!("{}: valid", command.document.display()))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }
    for error in &errors {
        write_stderr_line(error).map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    Ok(ExitCode::FAILURE)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Executes `config validate`.
///
/// Unlike the other commands, a missing implicit config file is an error here.
fn command_config_validate(config_path: Option<&Path>) -> CliResult<ExitCode> {
    let _config = FeatureGateConfig::load(config_path)
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    write_stdout_line("config ok").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Maps a config error raised outside loading.
fn config_error(err: feature_gate_config::ConfigError) -> CliError {
    CliError::new(err.to_string())
}

// ============================================================================
// SECTION: Artifact Helpers
// ============================================================================

/// Writes `value` as an artifact, or verifies it when `check` is set.
fn emit_artifact<T: Serialize>(
    events: &dyn EventSink,
    value: &T,
    path: &Path,
    check: bool,
) -> CliResult<()> {
    let bytes = pretty_json_bytes(value).map_err(|err| CliError::new(err.to_string()))?;
    let message = if check {
        verify_artifact(path, &bytes).map_err(|err| CliError::new(err.to_string()))?;
        format!("artifact up to date: {}", path.display())
    } else {
        write_artifact(path, &bytes).map_err(|err| CliError::new(err.to_string()))?;
        events.record_artifact(&ArtifactEvent::written(path, bytes.len()));
        format!("wrote {}", path.display())
    };
    write_stdout_line(&message).map_err(|err| CliError::new(output_error("stdout", &err)))
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

/// Reads a bounded file and maps failures to user-facing errors.
fn read_input(path: &Path, max_bytes: usize) -> CliResult<Vec<u8>> {
    read_bytes_with_limit(path, max_bytes).map_err(|err| match err {
        ReadLimitError::Io(err) => {
            CliError::new(format!("failed to read {}: {err}", path.display()))
        }
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(format!(
            "{} is too large: {size} bytes (max {limit})",
            path.display()
        )),
    })
}

/// Reads a UTF-8 text file under a size limit.
fn read_text(path: &Path, max_bytes: usize) -> CliResult<String> {
    let bytes = read_input(path, max_bytes)?;
    String::from_utf8(bytes)
        .map_err(|_| CliError::new(format!("{} must be utf-8", path.display())))
}

/// Reads and parses a JSON file under [`MAX_JSON_INPUT_BYTES`].
fn read_json(path: &Path) -> CliResult<Value> {
    let bytes = read_input(path, MAX_JSON_INPUT_BYTES)?;
    serde_json::from_slice(&bytes)
        .map_err(|err| CliError::new(format!("{}: invalid json: {err}", path.display())))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes canonical JSON to stdout with a trailing newline.
fn write_canonical_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut bytes = serde_jcs::to_vec(value)
        .map_err(|err| CliError::new(format!("failed to serialize output: {err}")))?;
    bytes.push(b'\n');
    write_stdout_bytes(&bytes).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output stream failure.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
