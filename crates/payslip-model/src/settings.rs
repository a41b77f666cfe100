//! Values the composer reads besides the row itself.

use chrono::{Datelike, NaiveDate};

/// Organization line printed when none is configured.
pub const DEFAULT_ORGANIZATION: &str = "COATS THREAD EXPORTS (PVT) LTD - OPERATOR EMPLOYEES";

/// Header settings threaded into every composition call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayslipSettings {
    /// First header line.
    pub organization: String,
    /// Free-text pay period such as `"MAY 2025"`.
    pub month: String,
}

impl PayslipSettings {
    pub fn new(organization: impl Into<String>, month: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            month: month.into(),
        }
    }

    /// Settings for the given month under the default organization.
    pub fn for_month(month: impl Into<String>) -> Self {
        Self::new(DEFAULT_ORGANIZATION, month)
    }
}

/// Normalizes free-text month input: upper-case, single spaces.
pub fn normalize_month_label(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Month label for a calendar date, e.g. `"MAY 2025"`.
pub fn month_label(date: NaiveDate) -> String {
    format!("{} {}", date.format("%B"), date.year()).to_uppercase()
}
