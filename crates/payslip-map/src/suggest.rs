//! Checks configured columns against a sheet's headers.
//!
//! Mapped items whose column is absent silently drop off every payslip, so
//! the CLI reports them up front with the closest header as a hint.

use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;

use payslip_model::{Category, DisplayName, SecondColumn, SourceColumns, normalize_column_name};

use crate::document::VariantMappings;

/// Minimum similarity for a header to be offered as a suggestion.
const SUGGESTION_MIN_SCORE: f64 = 0.85;

/// A configured column that the sheet does not have.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingColumn {
    pub category: Category,
    pub name: DisplayName,
    pub column: String,
    pub suggestion: Option<String>,
}

/// Closest header to `column`, if any scores above the threshold.
pub fn suggest_column(column: &str, headers: &[String]) -> Option<String> {
    let target = normalize_column_name(column);
    headers
        .iter()
        .map(|header| {
            let score = jaro_similarity(target.chars(), normalize_column_name(header).chars());
            (header, score)
        })
        .filter(|(_, score)| *score >= SUGGESTION_MIN_SCORE)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(header, _)| header.clone())
}

fn named_columns(columns: &SourceColumns) -> Vec<&str> {
    match columns {
        SourceColumns::Single(column) => vec![column.as_str()],
        SourceColumns::Double(first, SecondColumn::Named(second)) => {
            vec![first.as_str(), second.as_str()]
        }
        SourceColumns::Double(first, SecondColumn::Relative(_)) => vec![first.as_str()],
    }
}

/// Lists every configured column missing from `headers`, in mapping order.
pub fn missing_columns(mappings: &VariantMappings, headers: &[String]) -> Vec<MissingColumn> {
    let keys: Vec<String> = headers.iter().map(|h| normalize_column_name(h)).collect();
    let mut missing = Vec::new();
    for category in Category::ALL {
        for entry in mappings.category(category) {
            for column in named_columns(&entry.columns) {
                if keys.contains(&normalize_column_name(column)) {
                    continue;
                }
                missing.push(MissingColumn {
                    category,
                    name: entry.name.clone(),
                    column: column.to_string(),
                    suggestion: suggest_column(column, headers),
                });
            }
        }
    }
    missing
}
