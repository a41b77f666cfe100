//! Payslip composition and output errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while composing or writing payslips.
///
/// Only the first three are composition failures; every other problem in a
/// row (a missing earnings column, text in an amount cell) just drops the
/// affected line.
#[derive(Debug, Error)]
pub enum PayslipError {
    /// The sheet name routes to neither layout.
    #[error("unsupported payslip variant: {name}")]
    UnsupportedVariant { name: String },

    /// A required identity or footer column is absent from the row.
    #[error("missing required column: {column}")]
    MissingColumn { column: String },

    /// A required column holds a value that cannot be rendered.
    #[error("invalid value in column {column}: {value:?}")]
    InvalidValue { column: String, value: String },

    /// Writing a payslip file failed.
    #[error("failed to write payslip file: {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PayslipError {
    /// True for errors tied to one row's data rather than the whole run.
    pub fn is_row_error(&self) -> bool {
        matches!(self, Self::MissingColumn { .. } | Self::InvalidValue { .. })
    }

    /// Short failure kind, safe to log without employee values.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedVariant { .. } => "unsupported variant",
            Self::MissingColumn { .. } => "missing column",
            Self::InvalidValue { .. } => "invalid value",
            Self::Write { .. } => "write failed",
        }
    }

    /// Row column the failure is about, if any.
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::MissingColumn { column } | Self::InvalidValue { column, .. } => Some(column),
            Self::UnsupportedVariant { .. } | Self::Write { .. } => None,
        }
    }
}

/// Result alias for payslip operations.
pub type Result<T> = std::result::Result<T, PayslipError>;
