//! Two-column body: earnings on the left, deductions on the right.

/// Width the left side is padded to (label plus amount area).
pub const LEFT_COLUMN_WIDTH: usize = 37;

/// Merges both sides row by row. The shorter side is padded with empty
/// cells; neither side is reordered.
pub fn combine(left: &[String], right: &[String], spacer: usize) -> Vec<String> {
    let rows = left.len().max(right.len());
    let gap = " ".repeat(spacer);
    let width = LEFT_COLUMN_WIDTH;
    (0..rows)
        .map(|idx| {
            let l = left.get(idx).map_or("", String::as_str);
            let r = right.get(idx).map_or("", String::as_str);
            format!("{l:<width$}{gap}{r}")
        })
        .collect()
}
