//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Detection tunables and tool overrides shared by `trim` and `detect`
#[derive(Args, Debug, Clone, Default)]
pub struct ToolArgs {
    /// Noise tolerance in dB (default: -70)
    #[arg(short, long, allow_hyphen_values = true, value_name = "DB")]
    pub noise: Option<f64>,

    /// Minimum freeze duration in seconds (default: 1.0)
    #[arg(short, long, value_name = "SECONDS")]
    pub duration: Option<f64>,

    /// ffmpeg executable
    #[arg(long, env = "FREEZECUT_FFMPEG", value_name = "PATH")]
    pub ffmpeg: Option<String>,

    /// ffprobe executable
    #[arg(long, env = "FREEZECUT_FFPROBE", value_name = "PATH")]
    pub ffprobe: Option<String>,
}

/// Arguments for the trim command
#[derive(Args, Debug)]
pub struct TrimArgs {
    /// Input video file path
    pub input: PathBuf,

    /// Output file path (default: <input stem>-trimmed.<ext> next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub tool: ToolArgs,

    /// Detect and plan only; write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress the progress bar and summary
    #[arg(short, long, conflicts_with = "json")]
    pub quiet: bool,

    /// Print progress and the result as JSON lines on stdout
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the detect command
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Input video file path
    pub input: PathBuf,

    #[command(flatten)]
    pub tool: ToolArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
