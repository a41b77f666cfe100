//! Payroll sheet ingestion.
//!
//! Reads CSV exports of payroll workbook sheets into ordered
//! [`EmployeeRow`](payslip_model::EmployeeRow)s.
//!
//! - **Header detection**: title rows above the header are skipped
//! - **Cell typing**: numbers (with thousands separators), ISO dates, text, empty
//! - **Sheet name**: taken from the file stem, used for variant routing
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use payslip_ingest::read_sheet;
//!
//! let sheet = read_sheet(Path::new("FIXED April.csv"))?;
//! println!("{} rows in {}", sheet.len(), sheet.name);
//! ```

#![deny(unsafe_code)]

mod cell;
mod error;
mod sheet;

pub use cell::{parse_cell, parse_number};
pub use error::{IngestError, Result};
pub use sheet::{IngestOptions, Sheet, read_sheet, read_sheet_with_options};
