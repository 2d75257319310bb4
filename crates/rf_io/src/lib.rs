//! crates/rf_io/src/lib.rs
//! Local-file I/O for the reach-frequency engine.
//!
//! - Plan files: JSON, strictly typed, offline paths only (`loader`)
//! - Canonical JSON bytes + atomic writes (`canonical_json`)
//! - SHA-256 digests over canonical bytes (`hasher`)
//! - Result / run-record artifacts (`artifacts`)
//!
//! Shared error type (`IoError`) with `From` conversions used across modules.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for rf_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Reading an input file failed.
    #[error("read error: {0}")]
    Read(#[source] std::io::Error),

    /// Writing an artifact failed.
    #[error("write error: {0}")]
    Write(#[source] std::io::Error),

    /// JSON serialization/deserialization errors with a pointer-like location hint.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Rejected path (URL-like, missing parent, not a file).
    #[error("path error: {0}")]
    Path(String),

    /// Input exceeds a hard size limit.
    #[error("limit exceeded: {0}")]
    Limit(String),

    /// Hashing-related errors.
    #[error("hash error: {0}")]
    Hash(String),
}

pub type IoResult<T> = Result<T, IoError>;

/// Bare `?` on std I/O is treated as a read failure; writers map explicitly.
impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Read(e)
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps line/column, not a pointer; report the position.
        IoError::Json {
            pointer: format!("line {} column {}", e.line(), e.column()),
            msg: e.to_string(),
        }
    }
}

/// Returns true if `s` looks like a URL (any `<scheme>://`, including `file://`).
#[inline]
pub fn looks_like_url_strict(s: &str) -> bool {
    s.trim().contains("://")
}

pub mod artifacts;
pub mod canonical_json;
pub mod hasher;
pub mod loader;
