//! Error types for memdb
//!
//! Persistence code returns these; the `Store` boolean API converts them
//! at its boundary.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{Key, Value, MAX_NESTING};

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for memdb persistence operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {}", .0.display())]
    MissingFile(PathBuf),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    /// Malformed content on restore. `line` is 1-based for stream files and
    /// `None` for snapshots.
    #[error("Parse error{}: {source}", line_suffix(.line))]
    Parse {
        line: Option<usize>,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A value nests deeper than a restore could read back
    #[error("Value under key {key} nests {depth} levels deep (limit {limit})")]
    TooDeep {
        key: String,
        depth: usize,
        limit: usize,
    },
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map(|l| format!(" at line {}", l)).unwrap_or_default()
}

impl StoreError {
    /// Reject a value that would save but fail to restore
    pub(crate) fn check_nesting(key: &Key, value: &Value) -> Result<()> {
        let depth = value.depth();
        if depth > MAX_NESTING {
            return Err(StoreError::TooDeep {
                key: key.to_text(),
                depth,
                limit: MAX_NESTING,
            });
        }
        Ok(())
    }

    /// Classify an encode-side serde_json error, keeping I/O failures as I/O
    pub(crate) fn encode(err: serde_json::Error) -> Self {
        if err.is_io() {
            StoreError::Io(err.into())
        } else {
            StoreError::Serialization(err)
        }
    }

    /// Classify a decode-side serde_json error, keeping I/O failures as I/O
    pub(crate) fn decode(err: serde_json::Error, line: Option<usize>) -> Self {
        if err.is_io() {
            StoreError::Io(err.into())
        } else {
            StoreError::Parse { line, source: err }
        }
    }

    /// Line number of a stream parse failure, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            StoreError::Parse { line, .. } => *line,
            _ => None,
        }
    }
}
