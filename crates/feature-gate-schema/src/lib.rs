// crates/feature-gate-schema/src/lib.rs
// ============================================================================
// Module: Feature Gate Schema Library
// Description: Typed-definition compiler and feature-tree schema generators.
// Purpose: Derive JSON Schema artifacts from feature definitions.
// Dependencies: feature-gate-core, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Two directions feed the same artifacts:
//! - [`compile_definition`] parses a typed interface declaration and emits a
//!   draft-07 schema of its properties, annotated from doc comments.
//! - [`version_schema`] turns an in-memory
//!   [`FeatureTree`](feature_gate_core::FeatureTree) into the schema of a
//!   version document, with child features flattened next to `enabled` and
//!   `params`.
//!
//! [`type_definitions`] renders a TypeScript view of a version schema, and the
//! [`artifact`] module writes and verifies outputs deterministically.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod artifact;
pub mod ast;
pub mod compiler;
pub mod doc;
pub mod generator;
pub mod lexer;
pub mod parser;
pub mod typedefs;

// ============================================================================
// SECTION: Errors
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while tokenizing or parsing typed source.
///
/// # Invariants
/// - `position` fields are byte offsets into the original input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input exceeded the size limit.
    #[error("typed source exceeds size limit: {actual_bytes} bytes (max {max_bytes})")]
    InputTooLarge {
        /// Maximum allowed bytes.
        max_bytes: usize,
        /// Actual input length in bytes.
        actual_bytes: usize,
    },
    /// A block comment was not closed.
    #[error("unterminated comment starting at {position}")]
    UnterminatedComment {
        /// Byte offset of the opening `/*`.
        position: usize,
    },
    /// A string or template literal was not closed.
    #[error("unterminated string literal starting at {position}")]
    UnterminatedString {
        /// Byte offset of the opening quote.
        position: usize,
    },
    /// Unexpected token encountered during parsing.
    #[error("unexpected token `{found}` at {position}, expected {expected}")]
    UnexpectedToken {
        /// Human-friendly expectation summary.
        expected: &'static str,
        /// The token that was actually seen.
        found: String,
        /// Byte offset of the token.
        position: usize,
    },
    /// Numeric literal type failed to parse.
    #[error("invalid number `{raw}` at {position}")]
    InvalidNumber {
        /// The raw numeric text.
        raw: String,
        /// Byte offset of the literal.
        position: usize,
    },
    /// Types nested deeper than the parser limit.
    #[error("type nesting exceeds limit: depth {actual_depth} (max {max_depth}) at {position}")]
    NestingTooDeep {
        /// Maximum allowed nesting depth.
        max_depth: usize,
        /// Depth reached when the error occurred.
        actual_depth: usize,
        /// Byte offset where the limit was hit.
        position: usize,
    },
}

/// Errors raised while compiling a typed definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The root interface is not declared at the top level of the source.
    #[error("{name} interface not found")]
    DefinitionNotFound {
        /// Requested root interface name.
        name: String,
    },
    /// The source could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors raised when writing or verifying artifacts.
///
/// # Invariants
/// - [`ArtifactError::OutputPath`] and [`ArtifactError::Mismatch`] include the
///   offending path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArtifactError {
    /// IO failure while reading or writing.
    #[error("io error: {0}")]
    Io(String),
    /// Serialization failure while rendering.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// Output path invalid.
    #[error("invalid output path: {0}")]
    OutputPath(PathBuf),
    /// On-disk artifact differs from the generated bytes.
    #[error("artifact out of date: {0}")]
    Mismatch(PathBuf),
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use artifact::pretty_json_bytes;
pub use artifact::verify_artifact;
pub use artifact::write_artifact;
pub use compiler::DEFAULT_ROOT_INTERFACE;
pub use compiler::JSON_SCHEMA_DRAFT_07;
pub use compiler::compile_definition;
pub use compiler::compile_interface;
pub use generator::feature_properties;
pub use generator::parameter_schema;
pub use generator::version_schema;
pub use parser::parse_source;
pub use typedefs::type_definitions;
