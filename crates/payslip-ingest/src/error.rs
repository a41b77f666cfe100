//! Error types for payroll sheet ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a payroll sheet.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Sheet file not found.
    #[error("sheet file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Sheet has no non-blank rows.
    #[error("sheet is empty: {path}")]
    EmptySheet { path: PathBuf },

    /// Explicit header row is past the end of the sheet.
    #[error("header row {row} is out of range in {path} ({available} non-blank rows)")]
    HeaderRowOutOfRange {
        path: PathBuf,
        row: usize,
        available: usize,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/FIXED.csv"),
        };
        assert_eq!(err.to_string(), "sheet file not found: /path/to/FIXED.csv");
    }
}
