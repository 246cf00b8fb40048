//! CLI module for freezecut
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// freezecut - remove frozen stretches from videos
///
/// Finds regions where the picture stops changing and stream-copies
/// everything else into a new file, without re-encoding.
#[derive(Parser, Debug)]
#[command(name = "freezecut")]
#[command(about = "Remove frozen segments from videos without re-encoding")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "FREEZECUT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Config file (default: ./freezecut.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Remove frozen segments from a video
    Trim(args::TrimArgs),
    /// List frozen segments without writing anything
    Detect(args::DetectArgs),
    /// Show version and external tool information
    Version,
}

impl Commands {
    /// True when the command was asked to keep the terminal silent
    pub fn is_quiet(&self) -> bool {
        matches!(self, Commands::Trim(args) if args.quiet)
    }
}
