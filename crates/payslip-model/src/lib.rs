//! Data model for payslip generation.
//!
//! Rows, variants and mapping entries shared by the ingest, mapping and
//! report crates.

#![deny(unsafe_code)]

pub mod error;
pub mod mapping;
pub mod redact;
pub mod row;
pub mod settings;
pub mod variant;

pub use error::{ModelError, Result};
pub use mapping::{
    DisplayName, MappingEntry, NEXT_COLUMN_TOKEN, PREV_COLUMN_TOKEN, RelativeRef, SecondColumn,
    SourceColumns,
};
pub use redact::{
    REDACTED_VALUE, Redacted, log_data_enabled, redact_value, set_log_data_enabled,
};
pub use row::{CellValue, EmployeeRow, normalize_column_name};
pub use settings::{
    DEFAULT_ORGANIZATION, PayslipSettings, month_label, normalize_month_label,
};
pub use variant::{Category, Variant};
