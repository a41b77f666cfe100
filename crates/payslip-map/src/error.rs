//! Mapping store error types.

use std::path::PathBuf;
use thiserror::Error;

use payslip_model::ModelError;

/// Mapping store operation error.
///
/// Loading never produces one of these: an unreadable configuration falls
/// back to defaults. Only mutations and saves fail.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Rejected mapping input.
    #[error("invalid mapping: {0}")]
    InvalidMapping(#[from] ModelError),

    /// File I/O error.
    #[error("failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("failed to serialize payslip configuration")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("failed to complete save of {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for mapping store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
