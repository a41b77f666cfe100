//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "payslip",
    version,
    about = "Generate fixed-width payslips from payroll sheets",
    long_about = "Generate fixed-width text payslips from payroll sheet exports (CSV).\n\n\
                  Earnings and deductions lines come from configurable column mappings\n\
                  kept per payslip variant (FIXED, FTC)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Mapping configuration file.
    #[arg(
        long = "config",
        value_name = "PATH",
        default_value = payslip_map::DEFAULT_CONFIG_FILE,
        global = true
    )]
    pub config: PathBuf,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow employee values (names, amounts) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate payslips for the rows of a payroll sheet.
    Generate(GenerateArgs),

    /// List a sheet's columns and check the configured mappings against them.
    Columns(ColumnsArgs),

    /// Show or edit earnings/deductions mappings.
    #[command(subcommand)]
    Mapping(MappingCommand),

    /// Show or set the pay period printed in the header.
    Month(SettingArgs),

    /// Show or set the organization line printed in the header.
    Organization(SettingArgs),

    /// Install built-in mappings.
    #[command(subcommand)]
    Preset(PresetCommand),
}

#[derive(Args)]
pub struct SheetArgs {
    /// Payroll sheet exported as CSV.
    #[arg(value_name = "CSV")]
    pub sheet: PathBuf,

    /// Payslip variant or sheet name (default: the CSV file name).
    #[arg(long = "variant", value_name = "NAME")]
    pub variant: Option<String>,

    /// One-based line of the header row (default: detected).
    #[arg(long = "header-row", value_name = "N")]
    pub header_row: Option<usize>,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub sheet: SheetArgs,

    /// Only generate the payslip for this one-based data row.
    #[arg(long = "row", value_name = "N")]
    pub row: Option<usize>,

    /// Output directory for payslip files.
    #[arg(long = "output-dir", value_name = "DIR", default_value = payslip_report::DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Write a single file with one payslip per page.
    #[arg(long = "combined")]
    pub combined: bool,

    /// Print payslips to stdout instead of writing files.
    #[arg(long = "stdout", conflicts_with = "combined")]
    pub stdout: bool,

    /// Stop at the first row that cannot be generated.
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Pay period for this run only (default: configured month).
    #[arg(long = "month", value_name = "TEXT")]
    pub month: Option<String>,
}

#[derive(Args)]
pub struct ColumnsArgs {
    #[command(flatten)]
    pub sheet: SheetArgs,
}

#[derive(Subcommand)]
pub enum MappingCommand {
    /// List mappings of one or all variants.
    List {
        /// Variant to list (default: all).
        #[arg(value_name = "VARIANT")]
        variant: Option<String>,
    },
    /// Add or replace a mapping.
    Add(MappingAddArgs),
    /// Remove a mapping.
    Remove(MappingRemoveArgs),
}

#[derive(Args)]
pub struct MappingTarget {
    /// Payslip variant (FIXED, FTC).
    #[arg(value_name = "VARIANT")]
    pub variant: String,

    /// earnings or deductions.
    #[arg(value_name = "CATEGORY")]
    pub category: String,

    /// Label printed on the payslip.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Second part of a two-part label.
    #[arg(long = "sub-label", value_name = "TEXT")]
    pub sub_label: Option<String>,
}

#[derive(Args)]
pub struct MappingAddArgs {
    #[command(flatten)]
    pub target: MappingTarget,

    /// Source column holding the amount.
    #[arg(value_name = "COLUMN")]
    pub column: String,

    /// Second source column, or next/prev for the neighbouring column.
    #[arg(value_name = "SECOND")]
    pub second: Option<String>,
}

#[derive(Args)]
pub struct MappingRemoveArgs {
    #[command(flatten)]
    pub target: MappingTarget,
}

#[derive(Args)]
pub struct SettingArgs {
    #[command(subcommand)]
    pub action: Option<SettingAction>,
}

#[derive(Subcommand)]
pub enum SettingAction {
    /// Print the current value.
    Show,
    /// Store a new value.
    Set {
        #[arg(value_name = "TEXT", num_args = 1.., required = true)]
        value: Vec<String>,
    },
    /// Restore the default.
    Clear,
}

#[derive(Subcommand)]
pub enum PresetCommand {
    /// Replace a variant's mappings with the built-in items.
    Install {
        /// FIXED or FTC.
        #[arg(value_name = "VARIANT")]
        variant: String,
    },
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate() {
        let cli = Cli::try_parse_from([
            "payslip",
            "generate",
            "FIXED April.csv",
            "--row",
            "3",
            "--fail-fast",
            "--config",
            "cfg.json",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("cfg.json"));
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.sheet.sheet, PathBuf::from("FIXED April.csv"));
        assert_eq!(args.row, Some(3));
        assert!(args.fail_fast);
        assert_eq!(args.output_dir, PathBuf::from("payslips"));
    }

    #[test]
    fn parses_mapping_add_with_relative_second() {
        let cli = Cli::try_parse_from([
            "payslip", "mapping", "add", "FIXED", "earnings", "NORMAL OT", "NORMAL OT", "next",
        ])
        .unwrap();
        let Command::Mapping(MappingCommand::Add(args)) = cli.command else {
            panic!("expected mapping add");
        };
        assert_eq!(args.target.name, "NORMAL OT");
        assert_eq!(args.second.as_deref(), Some("next"));
    }

    #[test]
    fn month_set_joins_words() {
        let cli = Cli::try_parse_from(["payslip", "month", "set", "june", "2025"]).unwrap();
        let Command::Month(SettingArgs {
            action: Some(SettingAction::Set { value }),
        }) = cli.command
        else {
            panic!("expected month set");
        };
        assert_eq!(value.join(" "), "june 2025");
    }

    #[test]
    fn stdout_conflicts_with_combined() {
        assert!(Cli::try_parse_from(["payslip", "generate", "a.csv", "--stdout", "--combined"]).is_err());
    }
}
