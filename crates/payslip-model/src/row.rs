//! Employee rows as read from a payroll sheet.
//!
//! A row keeps its columns in sheet order. Order matters: relative column
//! references ("the column after NORMAL OT") are resolved by position.

use std::fmt;

use chrono::NaiveDate;

/// A single scalar cell from a payroll sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Date(NaiveDate),
    Empty,
}

impl CellValue {
    /// Returns the numeric value, or `None` for anything that is not a number.
    ///
    /// Text is never parsed here; rows are typed once at ingest.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(value) => value.is_nan(),
            Self::Date(_) => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Empty => Ok(()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

/// Normalizes a column name for lookup: trims, collapses inner whitespace,
/// and upper-cases ASCII letters.
///
/// Payroll sheets carry names like `"EMP NO "` or `"EPF  NO"`; both sides of
/// a lookup go through this function so such variations still match.
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_uppercase()
}

/// One payroll record: an ordered mapping from column name to cell value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeRow {
    columns: Vec<String>,
    keys: Vec<String>,
    values: Vec<CellValue>,
}

impl EmployeeRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column at the end of the row.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        let column = column.into();
        self.keys.push(normalize_column_name(&column));
        self.columns.push(column);
        self.values.push(value.into());
    }

    /// Builder form of [`Self::push`].
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.push(column, value);
        self
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in sheet order, as they appeared in the source.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Position of a column in sheet order. The first matching column wins
    /// when a sheet repeats a header.
    pub fn position(&self, column: &str) -> Option<usize> {
        let key = normalize_column_name(column);
        self.keys.iter().position(|candidate| *candidate == key)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.position(column).and_then(|idx| self.values.get(idx))
    }

    pub fn value_at(&self, index: usize) -> Option<&CellValue> {
        self.values.get(index)
    }
}

impl<K, V> FromIterator<(K, V)> for EmployeeRow
where
    K: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (column, value) in iter {
            row.push(column, value);
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_spacing_and_case() {
        let row = EmployeeRow::new()
            .with("EMP NO ", 1042.0)
            .with("EPF  NO", 77.0)
            .with("netpay", 100.0);

        assert_eq!(row.position("EMP NO"), Some(0));
        assert_eq!(row.get("EPF NO"), Some(&CellValue::Number(77.0)));
        assert!(row.contains("NETPAY"));
        assert!(!row.contains("NET PAY"));
    }

    #[test]
    fn first_duplicate_column_wins() {
        let row = EmployeeRow::new().with("A", 1.0).with("a", 2.0);
        assert_eq!(row.get("A"), Some(&CellValue::Number(1.0)));
        assert_eq!(row.value_at(1), Some(&CellValue::Number(2.0)));
    }

    #[test]
    fn iteration_keeps_sheet_order() {
        let row: EmployeeRow = vec![("B", 2.0), ("A", 1.0), ("C", 3.0)]
            .into_iter()
            .collect();
        let names: Vec<&str> = row.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn empty_cells() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::Text("  ".into()).is_empty());
        assert!(CellValue::Number(f64::NAN).is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
    }
}
