//! CLI argument parsing using clap derive API
//!
//! Purely declarative: no side effects or I/O happen here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Default configuration path, silently skipped when absent.
pub const DEFAULT_CONFIG_PATH: &str = "buildlog.toml";

/// buildlog -- per-package pass/fail reports for concatenated build pipeline logs.
///
/// Use `buildlog <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "buildlog", version, about, long_about = None)]
pub struct Cli {
    /// Path to the buildlog.toml configuration file.
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format (defaults to `report.output_format` from the config).
    #[arg(long, global = true)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputFormat {
    /// Resolve the format from a validated config value.
    pub fn from_config(value: &str) -> Self {
        match value {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a build log and print the pass/fail report.
    Report(ReportArgs),

    /// List the phases detected for each package.
    Phases(PhasesArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- report ----

/// Parse a build log and print the per-package report.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Path to the build log.
    pub log: PathBuf,

    /// List only packages that failed.
    #[arg(long)]
    pub failed_only: bool,

    /// Do not print error blocks under the table.
    #[arg(long)]
    pub no_errors: bool,
}

// ---- phases ----

/// Print the detected phase outline of every package.
#[derive(Args, Debug)]
pub struct PhasesArgs {
    /// Path to the build log.
    pub log: PathBuf,
}

// ---- config ----

/// Manage buildlog configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, report).
        #[arg(long)]
        section: Option<String>,
    },
}
