use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span, trace, warn};

use payslip_cli::logging::redact_value;
use payslip_ingest::{IngestOptions, Sheet, read_sheet_with_options};
use payslip_map::{MappingStore, missing_columns};
use payslip_model::{
    Category, DisplayName, PayslipSettings, SourceColumns, Variant, normalize_month_label,
};
use payslip_report::{
    BulkPolicy, PayslipComposer, combined_file_name, resolve_variant, write_combined,
    write_payslip_files_with,
};

use crate::cli::{
    ColumnsArgs, GenerateArgs, MappingAddArgs, MappingRemoveArgs, MappingTarget, SettingAction,
    SheetArgs,
};
use crate::summary::{print_columns, print_mappings, print_missing};
use crate::types::{GenerateResult, RowIssue};

fn load_sheet(args: &SheetArgs) -> Result<(Sheet, String)> {
    let options = IngestOptions {
        header_row: args.header_row.map(|line| line.saturating_sub(1)),
    };
    let sheet = read_sheet_with_options(&args.sheet, &options)
        .with_context(|| format!("read {}", args.sheet.display()))?;
    let sheet_name = args.variant.clone().unwrap_or_else(|| sheet.name.clone());
    Ok((sheet, sheet_name))
}

fn progress_bar(len: usize, message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("{msg:>12} [{bar:30}] {pos}/{len}") {
        bar.set_style(style.progress_chars("=> "));
    }
    bar.set_message(message);
    bar
}

pub fn run_generate(store: &MappingStore, args: &GenerateArgs) -> Result<GenerateResult> {
    let (sheet, sheet_name) = load_sheet(&args.sheet)?;
    let span = info_span!("generate", sheet = %sheet_name);
    let _guard = span.enter();
    let variant = resolve_variant(&sheet_name)?;

    let composer = PayslipComposer::new(store, effective_settings(store, args.month.as_deref()));

    for item in missing_columns(composer.mappings(variant), &sheet.headers) {
        warn!(
            category = %item.category,
            name = %item.name,
            column = %item.column,
            suggestion = item.suggestion.as_deref().unwrap_or("-"),
            "mapped column not in sheet"
        );
    }

    let (rows, offset) = match args.row {
        Some(row) if (1..=sheet.rows.len()).contains(&row) => (&sheet.rows[row - 1..row], row - 1),
        Some(row) => bail!("row {row} out of range (sheet has {} rows)", sheet.rows.len()),
        None => (&sheet.rows[..], 0),
    };
    let policy = if args.fail_fast {
        BulkPolicy::AbortOnError
    } else {
        BulkPolicy::SkipFailed
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("composing {} payslips", rows.len()));
    spinner.enable_steady_tick(Duration::from_millis(100));
    let report = composer.generate_bulk(rows, &sheet_name, policy);
    spinner.finish_and_clear();
    let mut report = report.with_context(|| format!("generate payslips for {sheet_name}"))?;
    for payslip in &mut report.generated {
        payslip.index += offset;
        trace!(
            row = payslip.index + 1,
            employee = redact_value(&payslip.employee),
            "generated payslip"
        );
    }

    let outputs = if args.stdout {
        for payslip in &report.generated {
            println!("{}\n", payslip.text);
        }
        Vec::new()
    } else if args.combined {
        let path = args.output_dir.join(combined_file_name(&sheet_name));
        vec![write_combined(&path, &report.generated)?]
    } else {
        let bar = progress_bar(report.generated.len(), "writing");
        let outputs = write_payslip_files_with(&args.output_dir, &report.generated, |_| {
            bar.inc(1);
        })?;
        bar.finish_and_clear();
        outputs
    };

    let issues = report
        .failures
        .iter()
        .map(|failure| RowIssue {
            row: failure.index + offset + 1,
            message: failure.error.to_string(),
        })
        .collect();
    info!(
        generated = report.generated.len(),
        files = outputs.len(),
        "payslip run complete"
    );
    Ok(GenerateResult {
        sheet_name,
        variant,
        month: composer.settings().month.clone(),
        rows: rows.len(),
        generated: report.generated.len(),
        outputs,
        issues,
    })
}

pub fn run_columns(store: &MappingStore, args: &ColumnsArgs) -> Result<()> {
    let (sheet, sheet_name) = load_sheet(&args.sheet)?;
    println!("Sheet: {sheet_name} ({} rows)", sheet.rows.len());
    print_columns(&sheet.headers);
    let variant = resolve_variant(&sheet_name)?;
    let mappings = store.get_mappings(variant.as_str());
    print_missing(&missing_columns(&mappings, &sheet.headers));
    Ok(())
}

pub fn run_mapping_list(store: &MappingStore, variant: Option<&str>) -> Result<()> {
    match variant {
        Some(name) => {
            let variant = parse_variant(name)?;
            print_mappings(variant.as_str(), &store.get_mappings(variant.as_str()));
        }
        None => {
            for name in store.variants() {
                print_mappings(name, &store.get_mappings(name));
            }
        }
    }
    Ok(())
}

pub fn run_mapping_add(store: &mut MappingStore, args: &MappingAddArgs) -> Result<()> {
    let (variant, category, name) = mapping_target(&args.target)?;
    let columns = SourceColumns::parse(&args.column, args.second.as_deref())?;
    println!("{variant} {category}: {} <- {columns}", name.render());
    store
        .add_mapping(variant.as_str(), category, name, columns)
        .context("save mapping")?;
    Ok(())
}

pub fn run_mapping_remove(store: &mut MappingStore, args: &MappingRemoveArgs) -> Result<()> {
    let (variant, category, name) = mapping_target(&args.target)?;
    let removed = store
        .remove_mapping(variant.as_str(), category, &name)
        .context("save mapping")?;
    if removed {
        println!("Removed {variant} {category}: {}", name.render());
    } else {
        println!("No {variant} {category} mapping named {}", name.render());
    }
    Ok(())
}

pub fn run_month(store: &mut MappingStore, action: Option<&SettingAction>) -> Result<()> {
    match action {
        None | Some(SettingAction::Show) => {}
        Some(SettingAction::Set { value }) => store
            .set_payslip_month(Some(&value.join(" ")))
            .context("save payslip month")?,
        Some(SettingAction::Clear) => store
            .set_payslip_month(None)
            .context("save payslip month")?,
    }
    let source = if store.document().payslip_month.is_some() {
        "configured"
    } else {
        "current month"
    };
    println!("{} ({source})", store.payslip_month());
    Ok(())
}

pub fn run_organization(store: &mut MappingStore, action: Option<&SettingAction>) -> Result<()> {
    match action {
        None | Some(SettingAction::Show) => {}
        Some(SettingAction::Set { value }) => store
            .set_organization(Some(&value.join(" ")))
            .context("save organization")?,
        Some(SettingAction::Clear) => store
            .set_organization(None)
            .context("save organization")?,
    }
    println!("{}", store.organization());
    Ok(())
}

pub fn run_preset_install(store: &mut MappingStore, variant: &str) -> Result<()> {
    let variant = parse_variant(variant)?;
    store
        .install_preset(variant)
        .with_context(|| format!("install {variant} preset"))?;
    print_mappings(variant.as_str(), &store.get_mappings(variant.as_str()));
    Ok(())
}

/// Header settings after applying a one-off month override.
fn effective_settings(store: &MappingStore, month: Option<&str>) -> PayslipSettings {
    let mut settings = store.settings();
    if let Some(month) = month {
        settings.month = normalize_month_label(month);
    }
    settings
}

fn parse_variant(name: &str) -> Result<Variant> {
    name.parse::<Variant>()
        .map_err(|error| anyhow!("{error} (expected FIXED or FTC)"))
}

fn mapping_target(target: &MappingTarget) -> Result<(Variant, Category, DisplayName)> {
    let variant = parse_variant(&target.variant)?;
    let category: Category = target.category.parse()?;
    let name = match &target.sub_label {
        Some(second) => DisplayName::pair(target.name.as_str(), second.as_str()),
        None => DisplayName::label(target.name.as_str()),
    };
    Ok((variant, category, name))
}
