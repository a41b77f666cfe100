//! Bulk generation over a whole sheet.
//!
//! Rows are composed in parallel with rayon; results always come back in
//! input order so file numbering and progress output stay deterministic.

use rayon::prelude::*;
use tracing::{debug, info, trace, warn};

use payslip_model::{EmployeeRow, Redacted};

use crate::composer::{PayslipComposer, columns, compose, resolve_variant};
use crate::error::{PayslipError, Result};

/// What to do when a single row fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BulkPolicy {
    /// Log the failure and keep going.
    #[default]
    SkipFailed,
    /// Stop at the first failing row.
    AbortOnError,
}

/// A payslip generated from one row.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPayslip {
    /// Zero-based row index within the sheet.
    pub index: usize,
    /// Employee name used for file naming.
    pub employee: String,
    pub text: String,
}

/// A row that did not produce a payslip.
#[derive(Debug)]
pub struct RowFailure {
    pub index: usize,
    pub error: PayslipError,
}

/// Outcome of a bulk run.
#[derive(Debug, Default)]
pub struct BulkReport {
    pub generated: Vec<GeneratedPayslip>,
    pub failures: Vec<RowFailure>,
}

impl BulkReport {
    pub fn total(&self) -> usize {
        self.generated.len() + self.failures.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Name printed in file names; falls back to the row number.
pub fn employee_label(row: &EmployeeRow, index: usize) -> String {
    row.get(columns::NAME)
        .map(ToString::to_string)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("row {}", index + 1))
}

/// Cell text quoted by a failure is only logged redacted, at `trace`.
fn log_failure(index: usize, error: &PayslipError) {
    debug!(
        row = index + 1,
        kind = error.kind(),
        column = error.column().unwrap_or("-"),
        "row failed"
    );
    trace!(row = index + 1, error = %Redacted(error), "row failure detail");
}

impl PayslipComposer {
    /// Composes every row, returning one result per row in input order.
    ///
    /// An unsupported sheet name fails before any row is touched.
    pub fn generate_each(
        &self,
        rows: &[EmployeeRow],
        sheet_name: &str,
    ) -> Result<Vec<Result<String>>> {
        let variant = resolve_variant(sheet_name)?;
        let mappings = self.mappings(variant);
        Ok(rows
            .par_iter()
            .map(|row| compose(row, variant, mappings, self.settings()))
            .collect())
    }

    /// Composes every row and applies `policy` to failures.
    pub fn generate_bulk(
        &self,
        rows: &[EmployeeRow],
        sheet_name: &str,
        policy: BulkPolicy,
    ) -> Result<BulkReport> {
        let results = self.generate_each(rows, sheet_name)?;
        let mut report = BulkReport::default();
        for (index, (row, result)) in rows.iter().zip(results).enumerate() {
            match result {
                Ok(text) => report.generated.push(GeneratedPayslip {
                    index,
                    employee: employee_label(row, index),
                    text,
                }),
                Err(error) if policy == BulkPolicy::AbortOnError => {
                    log_failure(index, &error);
                    warn!(row = index + 1, kind = error.kind(), "aborting bulk generation");
                    return Err(error);
                }
                Err(error) => {
                    log_failure(index, &error);
                    warn!(row = index + 1, kind = error.kind(), "skipping payslip");
                    report.failures.push(RowFailure { index, error });
                }
            }
        }
        info!(
            sheet = sheet_name,
            generated = report.generated.len(),
            failed = report.failures.len(),
            "bulk generation finished"
        );
        Ok(report)
    }
}
