use std::path::PathBuf;

use payslip_model::Variant;

/// A row that produced no payslip.
#[derive(Debug, Clone)]
pub struct RowIssue {
    /// One-based data row.
    pub row: usize,
    pub message: String,
}

/// Outcome of `payslip generate`.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    pub sheet_name: String,
    pub variant: Variant,
    pub month: String,
    pub rows: usize,
    pub generated: usize,
    /// Files written; empty when printing to stdout.
    pub outputs: Vec<PathBuf>,
    pub issues: Vec<RowIssue>,
}

impl GenerateResult {
    pub fn has_errors(&self) -> bool {
        !self.issues.is_empty()
    }
}
