//! Payslip text layout.
//!
//! Turns an employee row plus the configured mappings into a fixed-width
//! plain-text payslip:
//!
//! - **Line formatting**: mapped items with no usable value are dropped
//! - **Two-column body**: earnings left, deductions right, in mapping order
//! - **Variant layouts**: FIXED and FTC identity blocks and footers
//! - **Bulk runs**: parallel composition, results in row order
//! - **Text output**: one file per payslip or one combined file

#![deny(unsafe_code)]

mod bulk;
mod composer;
mod error;
mod fields;
mod format;
mod layout;
mod sink;

pub use bulk::{BulkPolicy, BulkReport, GeneratedPayslip, RowFailure, employee_label};
pub use composer::{PayslipComposer, columns, compose, generate_payslip, resolve_variant};
pub use error::{PayslipError, Result};
pub use fields::{amount_field, date_field, identifier_field, text_field};
pub use format::{
    DEDUCTIONS_STYLE, EARNINGS_STYLE, LineStyle, format_amount, format_line, format_lines,
};
pub use layout::{LEFT_COLUMN_WIDTH, combine};
pub use sink::{
    DEFAULT_OUTPUT_DIR, PAGE_BREAK, combined_file_name, payslip_file_name, safe_file_stem,
    write_combined, write_payslip_files, write_payslip_files_with,
};
