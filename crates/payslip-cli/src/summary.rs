use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use payslip_map::{MissingColumn, VariantMappings};
use payslip_model::Category;

use crate::types::GenerateResult;

pub fn print_summary(result: &GenerateResult) {
    println!("Sheet: {} ({})", result.sheet_name, result.variant);
    println!("Month: {}", result.month);
    if let Some(first) = result.outputs.first() {
        let location = if result.outputs.len() == 1 {
            first.display().to_string()
        } else {
            first
                .parent()
                .map(|dir| dir.display().to_string())
                .unwrap_or_default()
        };
        println!("Output: {location}");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Generated"),
        header_cell("Failed"),
        header_cell("Files"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(result.rows),
        Cell::new(result.generated)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        count_cell(result.issues.len(), Color::Red),
        count_cell(result.outputs.len(), Color::Cyan),
    ]);
    println!("{table}");

    if result.issues.is_empty() {
        return;
    }
    let mut issues = Table::new();
    issues.set_header(vec![header_cell("Row"), header_cell("Error")]);
    apply_table_style(&mut issues);
    align_column(&mut issues, 0, CellAlignment::Right);
    for issue in &result.issues {
        issues.add_row(vec![Cell::new(issue.row), Cell::new(&issue.message).fg(Color::Red)]);
    }
    println!();
    println!("Skipped rows:");
    println!("{issues}");
}

pub fn print_mappings(variant: &str, mappings: &VariantMappings) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("#"),
        header_cell("Name"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for category in Category::ALL {
        let entries = mappings.category(category);
        if entries.is_empty() {
            table.add_row(vec![category_cell(category), dim_cell("-"), dim_cell("none"), dim_cell("-")]);
            continue;
        }
        for (idx, entry) in entries.iter().enumerate() {
            let columns = if entry.columns.is_double() {
                Cell::new(&entry.columns).fg(Color::Yellow)
            } else {
                Cell::new(&entry.columns)
            };
            table.add_row(vec![
                category_cell(category),
                Cell::new(idx + 1),
                Cell::new(entry.name.render()),
                columns,
            ]);
        }
    }
    println!("Variant: {variant}");
    println!("{table}");
}

pub fn print_columns(headers: &[String]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Column")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (idx, header) in headers.iter().enumerate() {
        let cell = if header.starts_with("Unnamed: ") {
            dim_cell(header)
        } else {
            Cell::new(header)
        };
        table.add_row(vec![Cell::new(idx + 1), cell]);
    }
    println!("{table}");
}

pub fn print_missing(missing: &[MissingColumn]) {
    if missing.is_empty() {
        println!("All mapped columns are present.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Name"),
        header_cell("Missing column"),
        header_cell("Did you mean"),
    ]);
    apply_table_style(&mut table);
    for item in missing {
        let suggestion = match &item.suggestion {
            Some(header) => Cell::new(header).fg(Color::Green),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            category_cell(item.category),
            Cell::new(item.name.render()),
            Cell::new(&item.column).fg(Color::Red),
            suggestion,
        ]);
    }
    println!("Missing columns:");
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn category_cell(category: Category) -> Cell {
    match category {
        Category::Earnings => Cell::new(category).fg(Color::Green),
        Category::Deductions => Cell::new(category).fg(Color::Magenta),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
