//! Payslip generator CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use payslip_cli::logging::{LogConfig, LogFormat, init_logging};
use payslip_map::MappingStore;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, MappingCommand, PresetCommand};
use crate::commands::{
    run_columns, run_generate, run_mapping_add, run_mapping_list, run_mapping_remove, run_month,
    run_organization, run_preset_install,
};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let mut store = MappingStore::open(&cli.config);
    let outcome = match &cli.command {
        Command::Generate(args) => run_generate(&store, args).map(|result| {
            print_summary(&result);
            if result.has_errors() { 1 } else { 0 }
        }),
        Command::Columns(args) => run_columns(&store, args).map(|()| 0),
        Command::Mapping(MappingCommand::List { variant }) => {
            run_mapping_list(&store, variant.as_deref()).map(|()| 0)
        }
        Command::Mapping(MappingCommand::Add(args)) => {
            run_mapping_add(&mut store, args).map(|()| 0)
        }
        Command::Mapping(MappingCommand::Remove(args)) => {
            run_mapping_remove(&mut store, args).map(|()| 0)
        }
        Command::Month(args) => run_month(&mut store, args.action.as_ref()).map(|()| 0),
        Command::Organization(args) => {
            run_organization(&mut store, args.action.as_ref()).map(|()| 0)
        }
        Command::Preset(PresetCommand::Install { variant }) => {
            run_preset_install(&mut store, variant).map(|()| 0)
        }
    };
    let exit_code = match outcome {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        ..LogConfig::default()
    }
    .with_format(format)
    .with_log_file(cli.log_file.clone())
    .with_log_data(cli.log_data);
    if let Some(level) = cli.log_level {
        config = config.with_level(match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        });
    }
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
