//! Required row fields for the identity block and footer.
//!
//! Unlike mapped items these never fall back silently: an absent column,
//! or a value that cannot be shown in its slot, fails the payslip.

use chrono::NaiveDate;

use payslip_map::cell_amount;
use payslip_model::{CellValue, EmployeeRow};

use crate::error::{PayslipError, Result};

/// Text formats accepted for a date held as text.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];

fn required<'a>(row: &'a EmployeeRow, column: &str) -> Result<&'a CellValue> {
    row.get(column).ok_or_else(|| PayslipError::MissingColumn {
        column: column.to_string(),
    })
}

fn invalid(column: &str, value: &CellValue) -> PayslipError {
    PayslipError::InvalidValue {
        column: column.to_string(),
        value: value.to_string(),
    }
}

fn display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Free text as printed; empty cells print nothing.
pub fn text_field(row: &EmployeeRow, column: &str) -> Result<String> {
    let value = required(row, column)?;
    Ok(match value {
        CellValue::Empty => String::new(),
        CellValue::Number(number) if number.is_nan() => String::new(),
        CellValue::Text(text) => text.trim().to_string(),
        CellValue::Date(date) => display_date(*date),
        CellValue::Number(_) => value.to_string(),
    })
}

/// A date as `dd/mm/yyyy`. Text that is not a recognizable date is printed
/// unchanged.
pub fn date_field(row: &EmployeeRow, column: &str) -> Result<String> {
    let value = required(row, column)?;
    Ok(match value {
        CellValue::Date(date) => display_date(*date),
        CellValue::Text(text) => {
            let text = text.trim();
            let date_part = text.split_whitespace().next().unwrap_or(text);
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
                .map_or_else(|| text.to_string(), display_date)
        }
        CellValue::Empty => String::new(),
        CellValue::Number(number) if number.is_nan() => String::new(),
        CellValue::Number(_) => value.to_string(),
    })
}

/// A numeric identifier shown without decimals (`1042.0` prints `1042`).
pub fn identifier_field(row: &EmployeeRow, column: &str) -> Result<String> {
    let value = required(row, column)?;
    let number = match value {
        CellValue::Number(number) => Some(*number),
        CellValue::Text(text) => text.trim().parse::<f64>().ok(),
        CellValue::Date(_) | CellValue::Empty => None,
    };
    match number {
        Some(number) if number.is_finite() => Ok(integer_text(number)),
        _ => Err(invalid(column, value)),
    }
}

fn integer_text(number: f64) -> String {
    let whole = number.trunc();
    if whole == 0.0 {
        "0".to_string()
    } else {
        format!("{whole:.0}")
    }
}

/// A footer amount. Empty cells count as zero; text does not.
pub fn amount_field(row: &EmployeeRow, column: &str) -> Result<f64> {
    let value = required(row, column)?;
    match value {
        CellValue::Number(number) if number.is_finite() => Ok(*number),
        _ if value.is_empty() => Ok(0.0),
        _ => Err(invalid(column, value)),
    }
}

/// Integer part of an optional amount column, zero when absent or unusable.
pub fn optional_integer(row: &EmployeeRow, column: &str) -> String {
    integer_text(cell_amount(row.get(column)))
}
