//! freezecut - remove frozen segments from videos
//!
//! Runs ffmpeg's `freezedetect` filter over the input, computes the
//! complement of the frozen regions and stream-copies those segments into
//! a new file. Nothing is re-encoded.
//!
//! # Usage
//!
//! ```bash
//! freezecut trim lecture.mp4
//! freezecut trim lecture.mp4 -o short.mp4 --noise -60 --duration 2
//! freezecut detect lecture.mp4 --json
//! freezecut version
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use freezecut::cli::{commands, Cli, Commands};
use freezecut::config::Settings;
use freezecut::utils::logging::{init_logging, LogLevel};

/// Main entry point for the freezecut CLI
fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(level) = &cli.log_level {
        settings.log_level = level.clone();
    }
    let mut level = settings.log_level().context("Invalid log level")?;
    if cli.command.is_quiet() && cli.log_level.is_none() {
        level = level.at_least(LogLevel::Warn);
    }
    init_logging(level, cli.json_logs);

    debug!("Effective settings: {:?}", settings);

    match cli.command {
        Commands::Trim(args) => {
            info!("Executing trim command");
            commands::trim(args, &settings)?;
        }
        Commands::Detect(args) => {
            info!("Executing detect command");
            commands::detect(args, &settings)?;
        }
        Commands::Version => commands::version(&settings)?,
    }

    Ok(())
}
