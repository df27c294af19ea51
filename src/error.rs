//! Errors raised while locating, extracting and loading data files.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during an ETL run.
#[derive(Debug, Error)]
pub enum EtlError {
    #[error("Malformed record in {path:?} (line {line}): {reason}")]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Store write failed on {target}: {source}")]
    StoreWrite {
        target: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Cannot open store at {path:?}: {source}")]
    Connectivity {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid file pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },
}

impl EtlError {
    pub fn malformed(path: &Path, line: usize, reason: impl Into<String>) -> Self {
        EtlError::MalformedRecord {
            path: path.to_path_buf(),
            line,
            reason: reason.into(),
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        EtlError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Maps a rusqlite failure on `target` (a table or the transaction) into a
    /// store write error.
    pub fn store(target: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| EtlError::StoreWrite { target, source }
    }
}
