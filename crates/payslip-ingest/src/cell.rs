//! Typing of raw CSV cells.

use chrono::{NaiveDate, NaiveDateTime};

use payslip_model::CellValue;

/// Spellings spreadsheet exports use for a missing value.
const NULL_MARKERS: [&str; 4] = ["nan", "none", "null", "nat"];

pub(crate) fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Types one raw cell: number, ISO date, text, or empty.
pub fn parse_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty()
        || NULL_MARKERS
            .iter()
            .any(|marker| trimmed.eq_ignore_ascii_case(marker))
    {
        return CellValue::Empty;
    }
    if let Some(number) = parse_number(trimmed) {
        return CellValue::Number(number);
    }
    if let Some(date) = parse_iso_date(trimmed) {
        return CellValue::Date(date);
    }
    CellValue::Text(trimmed.to_string())
}

/// Parses a plain or thousands-grouped number such as `-1,234.50`.
///
/// Commas are only accepted as three-digit group separators, so text like
/// `"1,2"` stays text. Non-finite values are rejected.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if !trimmed.contains(',') {
        return trimmed.parse::<f64>().ok().filter(|v| v.is_finite());
    }
    let unsigned = trimmed.trim_start_matches(['-', '+']);
    if trimmed.len() - unsigned.len() > 1 {
        return None;
    }
    let integer = unsigned.split('.').next().unwrap_or_default();
    let mut groups = integer.split(',');
    let first = groups.next().unwrap_or_default();
    if first.is_empty() || first.len() > 3 || !first.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if !groups.all(|group| group.len() == 3 && group.chars().all(|c| c.is_ascii_digit())) {
        return None;
    }
    trimmed
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|dt| dt.date())
}
