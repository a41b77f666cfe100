//! Line formatter: one mapped item rendered as a fixed-width text line.
//!
//! Whether a line appears is decided from the resolved numbers before any
//! text is produced. A line whose values are all zero or unusable is not
//! formatted at all.

use payslip_map::{ResolvedAmounts, resolve_entry};
use payslip_model::{Category, DisplayName, EmployeeRow, MappingEntry};

/// Column widths of one body side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    pub label_width: usize,
    pub primary_width: usize,
    /// Width of the second value of a double-column item.
    pub secondary_width: usize,
}

/// Earnings side: amount plus a narrow hours/rate figure.
pub const EARNINGS_STYLE: LineStyle = LineStyle {
    label_width: 20,
    primary_width: 12,
    secondary_width: 5,
};

/// Deductions side: amount plus a full-width balance figure.
pub const DEDUCTIONS_STYLE: LineStyle = LineStyle {
    label_width: 15,
    primary_width: 12,
    secondary_width: 12,
};

impl LineStyle {
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Earnings => EARNINGS_STYLE,
            Category::Deductions => DEDUCTIONS_STYLE,
        }
    }

    /// Renders a line unconditionally. Labels longer than the label width
    /// are cut.
    pub fn render(&self, label: &str, amounts: ResolvedAmounts) -> String {
        let lw = self.label_width;
        let pw = self.primary_width;
        match amounts {
            ResolvedAmounts::Single(value) => {
                format!("{label:<lw$.lw$}{:>pw$}", format_amount(value))
            }
            ResolvedAmounts::Double(first, second) => {
                let sw = self.secondary_width;
                format!(
                    "{label:<lw$.lw$}{:>pw$}{:>sw$}",
                    format_amount(first),
                    format_amount(second)
                )
            }
        }
    }
}

/// Two decimals with thousands separators, e.g. `1,234.50`.
///
/// Non-finite input renders as zero.
pub fn format_amount(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let fixed = format!("{:.2}", value.abs());
    let (digits, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{}.{fraction}", group_thousands(digits))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats one item, or `None` when none of its values is valid.
pub fn format_line(style: LineStyle, name: &DisplayName, amounts: ResolvedAmounts) -> Option<String> {
    amounts
        .has_valid_value()
        .then(|| style.render(&name.render(), amounts))
}

/// Resolves and formats every entry of one side, keeping entry order.
pub fn format_lines<'a, I>(row: &EmployeeRow, category: Category, entries: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a MappingEntry>,
{
    let style = LineStyle::for_category(category);
    entries
        .into_iter()
        .filter_map(|entry| format_line(style, &entry.name, resolve_entry(row, entry)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn amounts_have_grouping_and_two_decimals() {
        assert_eq!(format_amount(1234.5), "1,234.50");
        assert_eq!(format!("{:>12}", format_amount(1234.5)), "    1,234.50");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(-0.0), "0.00");
        assert_eq!(format_amount(50.0), "50.00");
        assert_eq!(format_amount(-45.0), "-45.00");
        assert_eq!(format_amount(1_234_567.25), "1,234,567.25");
        assert_eq!(format_amount(f64::NAN), "0.00");
    }

    #[test]
    fn single_line_layout() {
        let line = format_line(
            DEDUCTIONS_STYLE,
            &DisplayName::label("WELFARE"),
            ResolvedAmounts::Single(150.0),
        );
        assert_eq!(line.as_deref(), Some("WELFARE              150.00"));
    }

    #[test]
    fn double_line_layout() {
        let line = format_line(
            EARNINGS_STYLE,
            &DisplayName::pair("NORMAL", "OT"),
            ResolvedAmounts::Double(1200.0, 3.5),
        );
        assert_eq!(line.as_deref(), Some("NORMAL OT               1,200.00 3.50"));
    }

    #[test]
    fn long_labels_are_cut() {
        let line = DEDUCTIONS_STYLE.render("EDUCATIONAL ASSISTANT", ResolvedAmounts::Single(10.0));
        assert!(line.starts_with("EDUCATIONAL ASS "));
        assert_eq!(line.len(), 27);
    }

    #[test]
    fn zero_lines_are_suppressed() {
        let name = DisplayName::label("MEDICAL");
        assert_eq!(format_line(EARNINGS_STYLE, &name, ResolvedAmounts::Single(0.0)), None);
        assert_eq!(
            format_line(EARNINGS_STYLE, &name, ResolvedAmounts::Double(0.0, f64::NAN)),
            None
        );
        assert!(format_line(EARNINGS_STYLE, &name, ResolvedAmounts::Double(0.0, 2.0)).is_some());
    }

    proptest! {
        #[test]
        fn formatted_amount_reads_back(cents in -10_000_000_000i64..10_000_000_000i64) {
            let value = cents as f64 / 100.0;
            let text = format_amount(value);
            let parsed: f64 = text.replace(',', "").parse().unwrap();
            prop_assert!((parsed - value).abs() < 0.006);
            let digits = text.trim_start_matches('-').split('.').next().unwrap().replace(',', "");
            prop_assert_eq!(text.trim_start_matches('-').len(), digits.len() + 3 + (digits.len() - 1) / 3);
        }

        #[test]
        fn line_present_iff_a_value_is_valid(first in -1.0e6f64..1.0e6, second in -1.0e6f64..1.0e6, zero_first: bool) {
            let first = if zero_first { 0.0 } else { first };
            let amounts = ResolvedAmounts::Double(first, second);
            let line = format_line(EARNINGS_STYLE, &DisplayName::label("X"), amounts);
            prop_assert_eq!(line.is_some(), first != 0.0 || second != 0.0);
        }
    }
}
