//! Built-in line items for the two payroll sheets.
//!
//! These are the earnings and deductions the payroll workbooks have always
//! carried. A fresh configuration is empty; `install_preset` copies one of
//! these lists into the store.

use payslip_model::{Category, DisplayName, MappingEntry, RelativeRef, SourceColumns, Variant};

struct PresetItem {
    label: &'static str,
    column: &'static str,
    /// Hours/rate/balance column sitting right after the amount column.
    with_next: bool,
}

const fn item(label: &'static str, column: &'static str) -> PresetItem {
    PresetItem {
        label,
        column,
        with_next: false,
    }
}

const fn paired(label: &'static str, column: &'static str) -> PresetItem {
    PresetItem {
        label,
        column,
        with_next: true,
    }
}

const FIXED_EARNINGS: &[PresetItem] = &[
    item("BASIC SAL", "BASIC SAL"),
    item("B.R ALLOWA", "B.R ALLOWA"),
    item("MEDICAL", "MEDICAL"),
    item("ACTING AL", "ACTING AL2"),
    item("INCENTIVE", "INCENTIVE"),
    item("SHIFT ALLO", "SHIFT ALLO"),
    item("DISCRETIONARY INC", "Dis cre- Fuel"),
    paired("NORMAL OT", "NORMAL OT"),
    paired("TRIPPLE OT", "TRIPPLE OT"),
    paired("DOUBBLE OT", "DOUBBLE OT"),
    item("FIRST AID", "FIRST AID"),
    item("FIRE TEAM", "FIRE TEAM"),
    item("RELOCATION", "RELOCATION"),
    item("SOSU ALLOW", "SOSU ALLOW"),
    item("NO PAY COR", "NO PAY COR"),
    item("FE NIG SHI", "FE NIG SHI"),
    item("BALANCE LEAVE", "BALANCE LEAVE"),
    item("SPEC SOSU", "SPEC SOSU"),
    item("TAX REFUD", "TAX REFUD"),
    item("Sunday Wages", "Sunday Wages"),
    paired("Arrears Double OT", "Arrears Double OT"),
];

const FIXED_DEDUCTIONS: &[PresetItem] = &[
    item("EPF YEE", "EPF YEE"),
    item("NO PAY", "NO PAY"),
    item("LATE MINUTE", "Late Minute"),
    item("WELFARE", "WELFARE"),
    item("SPORTS CLU", "SPORTS CLU"),
    item("FAIR FIRST", "FAIR FIRST"),
    item("UNION ICE", "UNION ICE"),
    paired("FES ADVANC", "FES ADVANC"),
    paired("MOTOR CYCL", "MOTOR CYCL"),
    paired("MOTOR CINT", "MOTOR CINT"),
    item("P.L.D.C.Sampath", "P.L.D.C.Sampath"),
    item("APIT TAX", "APIT TAX"),
    paired("WIJAYA RADIO", "WIJAYA RADIO"),
    paired("EDUCATIONAL ASSISTANT", "EDUCATIONAL ASSISTANT"),
    item("MOCY GURANTER", "MOCY GURANTER"),
    item("MOCY GURANTER INT", "MOCY GURANTER INT"),
];

const FTC_EARNINGS: &[PresetItem] = &[
    item("B.R ALLOWA", "B.R ALLOWA"),
    item("BASIC SAL", "BASIC SAL"),
    item("MEDICAL", "MEDICAL"),
    item("ACTING AL", "ACTING AL2"),
    item("INCENTIVE", "INCENTIVE"),
    item("SHIFT ALLO", "SHIFT ALLO"),
    paired("NORMAL OT", "NORMAL OT"),
    paired("TRIPPLE OT", "TRIPPLE OT"),
    paired("DOUBBLE OT", "DOUBBLE OT"),
    item("FIRST AID", "FIRST AID"),
    item("FIRE TEAM", "FIRE TEAM"),
    item("RELOCATION", "RELOCATION"),
    item("SOSU ALLOW", "SOSU ALLOW"),
    item("Sunday Wages", "Sunday Wages"),
    paired("Arrears Double OT", "Arrears Double OT"),
];

const FTC_DEDUCTIONS: &[PresetItem] = &[
    item("EPF YEE", "EPF YEE"),
    item("NO PAY", "NO PAY"),
    item("WELFARE", "WELFARE"),
    item("SPORTS CLU", "SPORTS CLU"),
    item("FAIR FIRST", "FAIR FIRST"),
    item("UNION ICE", "UNION ICE"),
    item("FES ADVANC", "FES ADVANC"),
    item("MOTOR CYCL", "MOTOR CYCL"),
    item("MOTOR CINT", "MOTOR CINT"),
    item("P.L.D.C.Sampath", "P.L.D.C.Sampath"),
    item("APIT TAX", "APIT TAX"),
    item("WIJAYA RADIO", "WIJAYA RADIO"),
    item("EDUCATIONAL ASSISTANT", "EDUCATIONAL ASSISTANT"),
    item("FOOT CYCLE LOAN", "FOOT CYCLE LOAN"),
    item("Singer", "Singer"),
];

fn preset_items(variant: Variant, category: Category) -> &'static [PresetItem] {
    match (variant, category) {
        (Variant::Fixed, Category::Earnings) => FIXED_EARNINGS,
        (Variant::Fixed, Category::Deductions) => FIXED_DEDUCTIONS,
        (Variant::Ftc, Category::Earnings) => FTC_EARNINGS,
        (Variant::Ftc, Category::Deductions) => FTC_DEDUCTIONS,
    }
}

/// Built-in entries for one scope, in payslip order.
pub fn preset_entries(variant: Variant, category: Category) -> Vec<MappingEntry> {
    preset_items(variant, category)
        .iter()
        .map(|item| MappingEntry {
            name: DisplayName::label(item.label),
            columns: if item.with_next {
                SourceColumns::relative(item.column, RelativeRef::NextColumn)
            } else {
                SourceColumns::single(item.column)
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_sizes() {
        assert_eq!(preset_entries(Variant::Fixed, Category::Earnings).len(), 21);
        assert_eq!(preset_entries(Variant::Fixed, Category::Deductions).len(), 16);
        assert_eq!(preset_entries(Variant::Ftc, Category::Earnings).len(), 15);
        assert_eq!(preset_entries(Variant::Ftc, Category::Deductions).len(), 15);
    }

    #[test]
    fn preset_entries_are_valid_and_unique() {
        for variant in Variant::ALL {
            for category in Category::ALL {
                let entries = preset_entries(variant, category);
                for (idx, entry) in entries.iter().enumerate() {
                    entry.validate().unwrap();
                    assert!(
                        entries[..idx].iter().all(|other| other.name != entry.name),
                        "duplicate {} in {variant} {category}",
                        entry.name
                    );
                }
            }
        }
    }

    #[test]
    fn overtime_reads_the_following_column() {
        let earnings = preset_entries(Variant::Fixed, Category::Earnings);
        let normal_ot = earnings
            .iter()
            .find(|e| e.name == DisplayName::label("NORMAL OT"))
            .unwrap();
        assert_eq!(
            normal_ot.columns,
            SourceColumns::relative("NORMAL OT", RelativeRef::NextColumn)
        );
    }
}
