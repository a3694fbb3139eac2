//! Breast cancer therapy recommender CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use breastcan_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use breastcan_cli::commands::{run_login, run_mutations, run_recommend, run_report, run_signup};
use breastcan_cli::logging::{LogConfig, LogFormat, init_logging};
use breastcan_cli::summary::print_mutation_table;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Recommend(args) => run_recommend(args).map(|output| println!("{output}")),
        Command::Mutations(args) => run_mutations(args).map(|table| print_mutation_table(&table)),
        Command::Signup(args) => {
            run_signup(args).map(|()| println!("Account created for {}.", args.username.trim()))
        }
        Command::Login(args) => run_login(args).map(|session| {
            println!("Welcome, Dr. {}.", session.username());
            session.logout();
        }),
        Command::Report(args) => {
            run_report(args).map(|path| println!("Report written to {}", path.display()))
        }
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
