// crates/feature-gate-cli/src/events.rs
// ============================================================================
// Module: CLI Event Log
// Description: Structured JSON-lines events for compile, artifact, and query work.
// Purpose: Record what the CLI did without coupling to a logging backend.
// Dependencies: feature-gate-config, serde, serde_json
// ============================================================================

//! ## Overview
//! Each event is a flat `Serialize` struct carrying an `event` label and a
//! `timestamp_ms`. Sinks encode one event per line. The sink is chosen from
//! the `[logging]` table; the default discards everything so regular command
//! output stays clean.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use feature_gate_config::LogSink;
use feature_gate_config::LoggingConfig;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome of a schema compile run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileOutcome {
    /// The compile is about to run.
    Started,
    /// The schema was produced.
    Completed,
    /// The compile failed.
    Failed,
}

impl CompileOutcome {
    /// Returns the event label for this outcome.
    const fn label(self) -> &'static str {
        match self {
            Self::Started => "compile_started",
            Self::Completed => "compile_completed",
            Self::Failed => "compile_failed",
        }
    }
}

/// Compile lifecycle event payload.
#[derive(Debug, Clone, Serialize)]
pub struct CompileEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Typed definition source path.
    pub source: String,
    /// Root interface name.
    pub root_interface: String,
    /// Schema artifact path.
    pub output: String,
    /// Number of compiled properties, once known.
    pub property_count: Option<usize>,
    /// Normalized error kind label on failure.
    pub error_kind: Option<&'static str>,
}

/// Inputs required to construct a compile event.
pub struct CompileEventParams<'a> {
    /// Lifecycle stage.
    pub outcome: CompileOutcome,
    /// Typed definition source path.
    pub source: &'a Path,
    /// Root interface name.
    pub root_interface: &'a str,
    /// Schema artifact path.
    pub output: &'a Path,
    /// Number of compiled properties, once known.
    pub property_count: Option<usize>,
    /// Normalized error kind label on failure.
    pub error_kind: Option<&'static str>,
}

/// Artifact write event payload.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Artifact path.
    pub path: String,
    /// Bytes written.
    pub bytes: usize,
}

/// Feature query event payload.
#[derive(Debug, Clone, Serialize)]
pub struct QueryEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Version the query resolved against.
    pub version: String,
    /// Dotted feature path, when the operation takes one.
    pub path: Option<String>,
    /// Query operation label.
    pub operation: &'static str,
    /// Whether the query found what it looked for.
    pub found: bool,
}

impl CompileEvent {
    /// Creates a compile event with a consistent timestamp.
    #[must_use]
    pub fn new(params: &CompileEventParams<'_>) -> Self {
        Self {
            event: params.outcome.label(),
            timestamp_ms: timestamp_ms(),
            source: params.source.display().to_string(),
            root_interface: params.root_interface.to_string(),
            output: params.output.display().to_string(),
            property_count: params.property_count,
            error_kind: params.error_kind,
        }
    }
}

impl ArtifactEvent {
    /// Creates an `artifact_written` event.
    #[must_use]
    pub fn written(path: &Path, bytes: usize) -> Self {
        Self {
            event: "artifact_written",
            timestamp_ms: timestamp_ms(),
            path: path.display().to_string(),
            bytes,
        }
    }
}

impl QueryEvent {
    /// Creates a `query_evaluated` event.
    #[must_use]
    pub fn evaluated(
        version: &str,
        path: Option<&str>,
        operation: &'static str,
        found: bool,
    ) -> Self {
        Self {
            event: "query_evaluated",
            timestamp_ms: timestamp_ms(),
            version: version.to_string(),
            path: path.map(str::to_string),
            operation,
            found,
        }
    }
}

/// Milliseconds since the Unix epoch, zero if the clock is before it.
fn timestamp_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Event sink for CLI activity.
pub trait EventSink: Send + Sync {
    /// Record a compile lifecycle event.
    fn record_compile(&self, event: &CompileEvent);

    /// Record an artifact write.
    fn record_artifact(&self, _event: &ArtifactEvent) {}

    /// Record a feature query.
    fn record_query(&self, _event: &QueryEvent) {}
}

/// Event sink that logs JSON lines to stderr.
pub struct StderrEventSink;

impl StderrEventSink {
    /// Writes one event line to stderr.
    fn emit<T: Serialize>(event: &T) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

impl EventSink for StderrEventSink {
    fn record_compile(&self, event: &CompileEvent) {
        Self::emit(event);
    }

    fn record_artifact(&self, event: &ArtifactEvent) {
        Self::emit(event);
    }

    fn record_query(&self, event: &QueryEvent) {
        Self::emit(event);
    }
}

/// Event sink that appends JSON lines to a file.
pub struct FileEventSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileEventSink {
    /// Opens the event log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one event line and flushes.
    fn emit<T: Serialize>(&self, event: &T) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

impl EventSink for FileEventSink {
    fn record_compile(&self, event: &CompileEvent) {
        self.emit(event);
    }

    fn record_artifact(&self, event: &ArtifactEvent) {
        self.emit(event);
    }

    fn record_query(&self, event: &QueryEvent) {
        self.emit(event);
    }
}

/// No-op event sink.
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn record_compile(&self, _event: &CompileEvent) {}
}

// ============================================================================
// SECTION: Construction
// ============================================================================

/// Builds the sink selected by the `[logging]` table.
///
/// # Errors
///
/// Returns an error when the file sink cannot open its log, or when the file
/// sink has no path configured.
pub fn event_sink_from_config(config: &LoggingConfig) -> io::Result<Box<dyn EventSink>> {
    match config.sink {
        LogSink::None => Ok(Box::new(NoopEventSink)),
        LogSink::Stderr => Ok(Box::new(StderrEventSink)),
        LogSink::File => {
            let path = config.path.as_deref().ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "logging.path is required")
            })?;
            Ok(Box::new(FileEventSink::new(path)?))
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
