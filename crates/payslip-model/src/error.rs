use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unsupported payslip variant: {name}")]
    UnsupportedVariant { name: String },
    #[error("unknown mapping category: {name} (expected earnings or deductions)")]
    UnknownCategory { name: String },
    #[error("display name must not be empty")]
    EmptyDisplayName,
    #[error("column name must not be empty")]
    EmptyColumnName,
}

pub type Result<T> = std::result::Result<T, ModelError>;
