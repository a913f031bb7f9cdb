// crates/feature-gate-schema/src/artifact.rs
// ============================================================================
// Module: Schema Artifacts
// Description: Deterministic serialization, writing, and verification.
// Purpose: Persist generated documents byte-for-byte reproducibly.
// Dependencies: serde, serde_json, std
// ============================================================================

//! ## Overview
//! Artifacts are pretty-printed JSON with a trailing newline. Key order is the
//! insertion order of the generating code, so re-running a generator over the
//! same input reproduces the same bytes and [`verify_artifact`] can compare
//! on-disk files exactly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::ArtifactError;

// ============================================================================
// SECTION: Serialization
// ============================================================================

/// Serializes `value` as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns [`ArtifactError::Serialization`] when serialization fails.
pub fn pretty_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, ArtifactError> {
    let mut bytes = serde_json::to_vec_pretty(value)
        .map_err(|err| ArtifactError::Serialization(err.to_string()))?;
    bytes.push(b'\n');
    Ok(bytes)
}

// ============================================================================
// SECTION: Filesystem
// ============================================================================

/// Writes artifact bytes to `path`, creating parent directories.
///
/// # Errors
///
/// Returns [`ArtifactError::OutputPath`] for an empty or directory path and
/// [`ArtifactError::Io`] when writing fails.
pub fn write_artifact(path: &Path, bytes: &[u8]) -> Result<(), ArtifactError> {
    ensure_file_path(path)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|err| ArtifactError::Io(err.to_string()))?;
    }
    fs::write(path, bytes).map_err(|err| ArtifactError::Io(err.to_string()))
}

/// Checks that the file at `path` holds exactly `expected`.
///
/// # Errors
///
/// Returns [`ArtifactError::Mismatch`] when the contents differ and
/// [`ArtifactError::Io`] when the file cannot be read.
pub fn verify_artifact(path: &Path, expected: &[u8]) -> Result<(), ArtifactError> {
    ensure_file_path(path)?;
    let actual = fs::read(path).map_err(|err| ArtifactError::Io(err.to_string()))?;
    if actual == expected {
        Ok(())
    } else {
        Err(ArtifactError::Mismatch(path.to_path_buf()))
    }
}

/// Rejects empty paths and existing directories.
fn ensure_file_path(path: &Path) -> Result<(), ArtifactError> {
    if path.as_os_str().is_empty() || path.is_dir() {
        return Err(ArtifactError::OutputPath(path.to_path_buf()));
    }
    Ok(())
}
