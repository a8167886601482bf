//! buildlog CLI entry point

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::path::Path;

use anyhow::Result;
use clap::Parser;

use buildlog_core::config::BuildLogConfig;
use buildlog_core::error::{BuildLogError, ConfigError};

use crate::cli::{Cli, Commands, ConfigAction, DEFAULT_CONFIG_PATH, OutputFormat};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match load_config(&cli.config).await {
        Ok(config) => config,
        // `config validate` reports the problem itself
        Err(_) if is_config_validate(&cli.command) => BuildLogConfig::default(),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    };

    if let Some(level) = &cli.log_level {
        config.general.log_level = level.clone();
    }
    if let Err(e) = logging::init_tracing(&config.general) {
        eprintln!("warning: {e}");
    }

    let format = cli
        .output
        .unwrap_or_else(|| OutputFormat::from_config(&config.report.output_format));
    let writer = OutputWriter::new(format);

    tracing::debug!(config = %cli.config.display(), ?format, "buildlog starting");

    let result = match cli.command {
        Commands::Report(args) => commands::report::execute(args, &config.report, &writer).await,
        Commands::Phases(args) => commands::phases::execute(args, &writer).await,
        Commands::Config(args) => {
            commands::config::execute(args, &cli.config, &config, &writer).await
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }

    Ok(())
}

/// Load the configuration file with env overrides.
///
/// A missing file at the default path falls back to defaults plus env overrides;
/// a missing file the user named explicitly is an error.
async fn load_config(path: &Path) -> Result<BuildLogConfig, CliError> {
    match BuildLogConfig::load(path).await {
        Ok(config) => Ok(config),
        Err(BuildLogError::Config(ConfigError::FileNotFound { .. }))
            if path == Path::new(DEFAULT_CONFIG_PATH) =>
        {
            Ok(BuildLogConfig::from_env()?)
        }
        Err(e) => Err(e.into()),
    }
}

fn is_config_validate(command: &Commands) -> bool {
    matches!(command, Commands::Config(args) if matches!(args.action, ConfigAction::Validate))
}
