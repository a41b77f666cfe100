use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use payslip_model::EmployeeRow;

use crate::cell::{normalize_cell, parse_cell, parse_number};
use crate::error::{IngestError, Result};

/// How many leading rows are probed when looking for the header.
const HEADER_PROBE_ROWS: usize = 10;

/// Options for reading a payroll sheet.
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    /// Zero-based index of the header among non-blank rows. Detected when `None`.
    pub header_row: Option<usize>,
}

/// A payroll sheet: its name, header row and typed data rows.
#[derive(Debug, Clone)]
pub struct Sheet {
    /// Sheet name; for CSV files the file stem.
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<EmployeeRow>,
}

impl Sheet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn normalize_header(raw: &str, index: usize) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    if normalized.is_empty() {
        // Spreadsheet exports leave the hours column next to an amount unnamed.
        format!("Unnamed: {index}")
    } else {
        normalized
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct RowStats {
    total: usize,
    non_empty: usize,
    numeric: usize,
    alpha: usize,
}

impl RowStats {
    fn non_empty_ratio(self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.non_empty as f64 / self.total as f64
        }
    }

    fn numeric_share(self) -> f64 {
        if self.non_empty == 0 {
            0.0
        } else {
            self.numeric as f64 / self.non_empty as f64
        }
    }

    fn alpha_share(self) -> f64 {
        if self.non_empty == 0 {
            0.0
        } else {
            self.alpha as f64 / self.non_empty as f64
        }
    }
}

fn row_stats(row: &[String], width: usize) -> RowStats {
    let mut stats = RowStats {
        total: width.max(row.len()),
        ..RowStats::default()
    };
    for cell in row {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            continue;
        }
        stats.non_empty += 1;
        if parse_number(trimmed).is_some() {
            stats.numeric += 1;
        }
        if trimmed.chars().any(|ch| ch.is_ascii_alphabetic()) {
            stats.alpha += 1;
        }
    }
    stats
}

/// Title rows ("FIXED APRIL 2025") fill one or two cells; the header fills
/// most of the row with words.
fn is_header_like(stats: RowStats) -> bool {
    stats.non_empty_ratio() >= 0.5 && stats.alpha_share() >= 0.5 && stats.numeric_share() <= 0.2
}

fn detect_header_row(rows: &[Vec<String>]) -> usize {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    rows.iter()
        .take(HEADER_PROBE_ROWS)
        .position(|row| is_header_like(row_stats(row, width)))
        .unwrap_or(0)
}

/// Reads a CSV payroll sheet, detecting the header row.
pub fn read_sheet(path: &Path) -> Result<Sheet> {
    read_sheet_with_options(path, &IngestOptions::default())
}

/// Reads a CSV payroll sheet.
///
/// Blank rows are skipped. Rows shorter than the header are padded with
/// empty cells; extra trailing cells are dropped.
pub fn read_sheet_with_options(path: &Path, options: &IngestOptions) -> Result<Sheet> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(path, &e))?;

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, &e))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    if raw_rows.is_empty() {
        return Err(IngestError::EmptySheet {
            path: path.to_path_buf(),
        });
    }

    let header_index = match options.header_row {
        Some(row) if row >= raw_rows.len() => {
            return Err(IngestError::HeaderRowOutOfRange {
                path: path.to_path_buf(),
                row,
                available: raw_rows.len(),
            });
        }
        Some(row) => row,
        None => detect_header_row(&raw_rows),
    };
    let headers: Vec<String> = raw_rows[header_index]
        .iter()
        .enumerate()
        .map(|(idx, value)| normalize_header(value, idx))
        .collect();

    let rows: Vec<EmployeeRow> = raw_rows
        .iter()
        .skip(header_index + 1)
        .map(|record| {
            headers
                .iter()
                .enumerate()
                .map(|(idx, header)| {
                    let raw = record.get(idx).map(String::as_str).unwrap_or("");
                    (header.clone(), parse_cell(raw))
                })
                .collect()
        })
        .collect();

    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_string();
    debug!(
        sheet = %name,
        header_row = header_index,
        columns = headers.len(),
        rows = rows.len(),
        "sheet loaded"
    );
    Ok(Sheet {
        name,
        headers,
        rows,
    })
}

fn csv_error(path: &Path, error: &csv::Error) -> IngestError {
    if let csv::ErrorKind::Io(io) = error.kind() {
        return IngestError::FileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(io.kind(), io.to_string()),
        };
    }
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect()
    }

    #[test]
    fn header_detection_skips_title_row() {
        let raw = rows(&[
            &["FIXED APRIL 2025", "", "", ""],
            &["EMP NO", "NAME", "BASIC SAL", "NORMAL OT"],
            &["1001", "A PERERA", "45000", "1200"],
        ]);
        assert_eq!(detect_header_row(&raw), 1);
    }

    #[test]
    fn header_detection_defaults_to_first_row() {
        let raw = rows(&[&["1", "2"], &["3", "4"]]);
        assert_eq!(detect_header_row(&raw), 0);
    }

    #[test]
    fn blank_headers_get_positional_names() {
        assert_eq!(normalize_header("  ", 7), "Unnamed: 7");
        assert_eq!(normalize_header(" EPF  NO ", 2), "EPF NO");
    }
}
