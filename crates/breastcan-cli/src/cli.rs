//! CLI argument definitions for the therapy recommender.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "breastcan",
    version,
    about = "Breast cancer therapy recommender",
    long_about = "Evaluate a patient's clinical snapshot against the therapy rule table.\n\n\
                  Produces a categorized recommendation (surgery, endocrine, HER2, \
                  chemotherapy, mutation-targeted therapy) and exports text reports \
                  for authenticated clinicians."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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

    /// Allow patient names and identifiers to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Evaluate a clinical snapshot (JSON) and print the recommendation.
    Recommend(RecommendArgs),

    /// List the mutations the therapy table knows about.
    Mutations(TableArgs),

    /// Register a new clinician account.
    Signup(AccountArgs),

    /// Check a clinician's credentials.
    Login(AccountArgs),

    /// Evaluate a snapshot as a logged-in clinician and write a text report.
    Report(ReportArgs),
}

/// Engine inputs shared by every evaluating command.
#[derive(Args, Clone, Default)]
pub struct EngineArgs {
    /// TOML file overriding the engine thresholds.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// CSV mutation table replacing the built-in one.
    #[arg(long = "mutation-table", value_name = "CSV")]
    pub mutation_table: Option<PathBuf>,
}

#[derive(Args, Clone, Default)]
pub struct TableArgs {
    /// CSV mutation table replacing the built-in one.
    #[arg(long = "mutation-table", value_name = "CSV")]
    pub mutation_table: Option<PathBuf>,
}

#[derive(Args, Clone)]
pub struct RecommendArgs {
    /// Snapshot JSON file, or `-` for stdin.
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormatArg,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Args, Clone)]
pub struct AccountArgs {
    /// Credential file (JSON).
    #[arg(long = "users", value_name = "FILE", default_value = "users.json")]
    pub users: PathBuf,

    #[arg(long = "username")]
    pub username: String,

    #[arg(long = "password")]
    pub password: String,
}

#[derive(Args, Clone)]
pub struct ReportArgs {
    /// Snapshot JSON file, or `-` for stdin.
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    #[command(flatten)]
    pub account: AccountArgs,

    #[arg(long = "patient-name")]
    pub patient_name: String,

    #[arg(long = "patient-id")]
    pub patient_id: String,

    /// Directory for the report file (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Text,
    Json,
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
