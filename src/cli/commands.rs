//! Command implementations

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::app::{Analysis, AppContainer, TrimOutcome, TrimRequest};
use crate::cli::args::{DetectArgs, ToolArgs, TrimArgs};
use crate::config::Settings;
use crate::engine::progress::{ConsoleProgress, JsonProgress};
use crate::engine::runner::ProcessRunner;
use crate::ports::ProgressReporter;
use crate::utils::path::default_output_path;
use crate::utils::time::{format_duration, format_filesize};

/// Execute the trim command
pub fn trim(args: TrimArgs, settings: &Settings) -> Result<()> {
    let settings = with_tool_args(settings, &args.tool)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, &settings.suffix));

    info!("Input: {}", args.input.display());
    info!("Output: {}", output.display());

    let reporter: Option<Box<dyn ProgressReporter>> = if args.json {
        Some(Box::new(JsonProgress::stdout()))
    } else if args.quiet {
        None
    } else {
        Some(Box::new(ConsoleProgress::stderr()))
    };

    let container = AppContainer::from_settings(&settings);
    let mut interactor = container.trim_interactor(reporter);
    let request = TrimRequest {
        input: args.input.clone(),
        output,
        detection: settings.detection(),
        dry_run: args.dry_run,
    };

    let outcome = interactor
        .run(&request)
        .with_context(|| format!("Failed to trim {}", args.input.display()))?;

    if args.json {
        let json = serde_json::to_string(&outcome).context("Failed to serialize trim result")?;
        println!("{}", json);
    } else if !args.quiet {
        display_outcome(&outcome);
    }

    Ok(())
}

/// Execute the detect command
pub fn detect(args: DetectArgs, settings: &Settings) -> Result<()> {
    let settings = with_tool_args(settings, &args.tool)?;
    let container = AppContainer::from_settings(&settings);
    let mut interactor = container.trim_interactor(None);

    let analysis = interactor
        .analyze(&args.input, &settings.detection())
        .with_context(|| format!("Failed to analyze {}", args.input.display()))?;

    if args.json {
        let json = serde_json::to_string_pretty(&analysis)
            .context("Failed to serialize analysis to JSON")?;
        println!("{}", json);
    } else {
        display_analysis(&analysis);
    }

    Ok(())
}

/// Execute the version command
pub fn version(settings: &Settings) -> Result<()> {
    println!("freezecut {}", env!("CARGO_PKG_VERSION"));

    let runner = ProcessRunner::new();
    for program in [&settings.ffmpeg_path, &settings.ffprobe_path] {
        let argv = vec![program.clone(), "-version".to_string()];
        match runner.capture(&argv) {
            Ok(stdout) => {
                let banner = stdout.lines().next().unwrap_or("").trim();
                println!("{}: {}", program, banner);
            }
            Err(e) => {
                warn!("{} is not usable: {}", program, e);
                println!("{}: not found", program);
            }
        }
    }

    Ok(())
}

/// Layer command-line tunables over the loaded settings and validate the result
fn with_tool_args(settings: &Settings, tool: &ToolArgs) -> Result<Settings> {
    let mut settings = settings.clone();
    if let Some(noise) = tool.noise {
        settings.noise_db = noise;
    }
    if let Some(duration) = tool.duration {
        settings.min_duration = duration;
    }
    if let Some(ffmpeg) = &tool.ffmpeg {
        settings.ffmpeg_path = ffmpeg.clone();
    }
    if let Some(ffprobe) = &tool.ffprobe {
        settings.ffprobe_path = ffprobe.clone();
    }
    settings.validate().context("Invalid settings")?;
    Ok(settings)
}

fn display_outcome(outcome: &TrimOutcome) {
    match outcome {
        TrimOutcome::Copied { output, dry_run } => {
            println!("No freeze regions detected.");
            if *dry_run {
                println!("Dry run: would copy the original to {}", output.display());
            } else {
                println!("Original copied to: {}", output.display());
            }
        }
        TrimOutcome::DryRun { analysis, segments } => {
            display_summary(analysis);
            println!("Dry run: {} segment(s) planned, nothing written", segments);
        }
        TrimOutcome::Trimmed {
            analysis,
            output,
            output_size,
        } => {
            display_summary(analysis);
            println!("Output size: {}", format_filesize(*output_size));
            println!("Trimmed video saved to: {}", output.display());
        }
    }
}

fn display_analysis(analysis: &Analysis) {
    println!("File: {}", analysis.input.display());
    if analysis.freezes.is_empty() {
        println!("No freeze regions detected.");
        return;
    }

    println!("Freeze regions:");
    for (index, region) in analysis.freezes.iter().enumerate() {
        println!(
            "  {:>3}. {} ({})",
            index + 1,
            region,
            format_duration(region.length())
        );
    }
    display_summary(analysis);
}

fn display_summary(analysis: &Analysis) {
    let summary = &analysis.summary;
    println!("Original duration: {}", format_duration(summary.duration));
    println!(
        "Removed: {} freeze region(s), {} ({:.1}%)",
        summary.freeze_count,
        format_duration(summary.removed_seconds),
        summary.removed_percent()
    );
    println!(
        "Kept: {} segment(s), {} ({:.1}%)",
        summary.keep_count,
        format_duration(summary.kept_seconds),
        summary.kept_percent()
    );
}
