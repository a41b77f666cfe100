//! Resolution of mapping entries against an employee row.
//!
//! Missing columns, text in a numeric slot and NaN all resolve to `0.0`.
//! Resolution never fails; an unusable value simply cannot produce a line.

use std::fmt;

use tracing::trace;

use payslip_model::{
    CellValue, EmployeeRow, MappingEntry, Redacted, SecondColumn, SourceColumns,
};

/// Numeric value(s) behind one mapping entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedAmounts {
    Single(f64),
    Double(f64, f64),
}

impl ResolvedAmounts {
    pub fn primary(self) -> f64 {
        match self {
            Self::Single(value) | Self::Double(value, _) => value,
        }
    }

    /// True when at least one value is usable (numeric and non-zero).
    pub fn has_valid_value(self) -> bool {
        match self {
            Self::Single(value) => is_valid_amount(value),
            Self::Double(first, second) => is_valid_amount(first) || is_valid_amount(second),
        }
    }
}

impl fmt::Display for ResolvedAmounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(value) => write!(f, "{value}"),
            Self::Double(first, second) => write!(f, "{first}, {second}"),
        }
    }
}

/// A value is valid iff it is a finite, non-zero number.
pub fn is_valid_amount(value: f64) -> bool {
    value.is_finite() && value != 0.0
}

/// Numeric content of a cell, `0.0` for anything that is not a finite number.
pub fn cell_amount(cell: Option<&CellValue>) -> f64 {
    cell.and_then(CellValue::as_number)
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Resolves one or two amounts for the given source columns.
pub fn resolve(row: &EmployeeRow, columns: &SourceColumns) -> ResolvedAmounts {
    match columns {
        SourceColumns::Single(column) => ResolvedAmounts::Single(cell_amount(row.get(column))),
        SourceColumns::Double(first, second) => {
            let primary = cell_amount(row.get(first));
            let secondary = match second {
                SecondColumn::Named(name) => cell_amount(row.get(name)),
                SecondColumn::Relative(relative) => {
                    let cell = row
                        .position(first)
                        .and_then(|idx| idx.checked_add_signed(relative.offset()))
                        .and_then(|idx| row.value_at(idx));
                    cell_amount(cell)
                }
            };
            ResolvedAmounts::Double(primary, secondary)
        }
    }
}

/// Resolves a mapping entry.
pub fn resolve_entry(row: &EmployeeRow, entry: &MappingEntry) -> ResolvedAmounts {
    let amounts = resolve(row, &entry.columns);
    trace!(
        name = %entry.name,
        columns = %entry.columns,
        amounts = %Redacted(amounts),
        valid = amounts.has_valid_value(),
        "resolved mapping"
    );
    amounts
}

#[cfg(test)]
mod tests {
    use super::*;
    use payslip_model::RelativeRef;

    fn ot_row() -> EmployeeRow {
        EmployeeRow::new()
            .with("EMP NO", 1001.0)
            .with("COL_A", 10.0)
            .with("Unnamed: 2", 3.5)
            .with("NOTE", "n/a")
    }

    #[test]
    fn next_column_resolves_by_position() {
        let row = ot_row();
        let amounts = resolve(&row, &SourceColumns::relative("COL_A", RelativeRef::NextColumn));
        assert_eq!(amounts, ResolvedAmounts::Double(10.0, 3.5));
    }

    #[test]
    fn previous_column_resolves_by_position() {
        let row = ot_row();
        let amounts = resolve(&row, &SourceColumns::relative("COL_A", RelativeRef::PrevColumn));
        assert_eq!(amounts, ResolvedAmounts::Double(10.0, 1001.0));
    }

    #[test]
    fn relative_out_of_range_is_zero() {
        let row = EmployeeRow::new().with("COL_A", 10.0);
        assert_eq!(
            resolve(&row, &SourceColumns::relative("COL_A", RelativeRef::NextColumn)),
            ResolvedAmounts::Double(10.0, 0.0)
        );
        assert_eq!(
            resolve(&row, &SourceColumns::relative("COL_A", RelativeRef::PrevColumn)),
            ResolvedAmounts::Double(10.0, 0.0)
        );
        assert_eq!(
            resolve(&row, &SourceColumns::relative("MISSING", RelativeRef::NextColumn)),
            ResolvedAmounts::Double(0.0, 0.0)
        );
    }

    #[test]
    fn text_and_missing_are_zero() {
        let row = ot_row();
        assert_eq!(
            resolve(&row, &SourceColumns::single("NOTE")),
            ResolvedAmounts::Single(0.0)
        );
        assert_eq!(
            resolve(&row, &SourceColumns::double("MISSING", "COL_A")),
            ResolvedAmounts::Double(0.0, 10.0)
        );
    }

    #[test]
    fn amounts_display_plain_values() {
        assert_eq!(ResolvedAmounts::Single(45678.0).to_string(), "45678");
        assert_eq!(ResolvedAmounts::Double(10.0, 3.5).to_string(), "10, 3.5");
    }

    #[test]
    fn validity() {
        assert!(is_valid_amount(-45.0));
        assert!(!is_valid_amount(0.0));
        assert!(!is_valid_amount(-0.0));
        assert!(!is_valid_amount(f64::NAN));
        assert!(ResolvedAmounts::Double(0.0, 2.0).has_valid_value());
        assert!(!ResolvedAmounts::Double(0.0, 0.0).has_valid_value());
    }
}
