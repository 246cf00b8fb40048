//! Freeze detection and duration probing over external tools

use std::path::Path;

use tracing::{debug, info, warn};

use crate::domain::model::*;
use crate::engine::progress::ProgressRelay;
use crate::engine::runner::{ProcessRunner, RunOutput};
use crate::error::FreezecutResult;
use crate::ports::ProgressReporter;
use crate::utils::path::ensure_exists;

pub mod parser;

use parser::{parse_duration_text, ParseEvent, ParserState};

/// Outcome of a process run whose diagnostic stream went through the line parser
#[derive(Debug, Clone)]
pub struct ParsedRun {
    pub output: RunOutput,
    pub freezes: Vec<FreezeRegion>,
}

/// Run `argv` with a fresh [`ParserState`], relaying progress ticks as they are parsed.
///
/// The relay is started before the spawn and finished after the process
/// exits, whether or not it succeeded. A successful run with a known
/// duration always ends on 100; a failed one ends on its last tick.
pub fn run_parsed(
    runner: &ProcessRunner,
    argv: &[String],
    relay: &mut ProgressRelay<'_>,
) -> FreezecutResult<ParsedRun> {
    let mut state = ParserState::new();
    let mut freezes = Vec::new();

    relay.start();
    let result = runner.run(argv, |line| match state.feed(line) {
        Some(ParseEvent::DurationFound(duration)) => {
            debug!("Stream duration: {:.3}s", duration);
        }
        Some(ParseEvent::ProgressTick(percent)) => relay.emit(percent),
        Some(ParseEvent::FreezeRegionFound(region)) => {
            debug!("Freeze region: {}", region);
            freezes.push(region);
        }
        None => {}
    });
    let output = match result {
        Ok(output) => output,
        Err(e) => {
            relay.finish();
            return Err(e);
        }
    };

    // The last elapsed-time marker usually trails the duration slightly
    if output.success && state.duration().is_some() && relay.last() != Some(100) {
        relay.emit(100);
    }
    relay.finish();

    if let Some(start) = state.pending_start() {
        debug!("Discarding unterminated freeze starting at {:.3}s", start);
    }
    if state.duration().is_none() {
        warn!("No duration banner seen; progress was not reported");
    }

    Ok(ParsedRun { output, freezes })
}

/// Argument vector for the freeze probe: decode with freezedetect into a null sink
pub fn freeze_probe_args(ffmpeg: &str, input: &Path, settings: &DetectionSettings) -> Vec<String> {
    vec![
        ffmpeg.to_string(),
        "-hide_banner".to_string(),
        "-nostdin".to_string(),
        "-i".to_string(),
        input.to_string_lossy().into_owned(),
        "-vf".to_string(),
        settings.filter_expr(),
        "-an".to_string(),
        "-f".to_string(),
        "null".to_string(),
        "-".to_string(),
    ]
}

/// Argument vector for the duration probe: print `format=duration` as a bare number
pub fn duration_probe_args(ffprobe: &str, input: &Path) -> Vec<String> {
    vec![
        ffprobe.to_string(),
        "-v".to_string(),
        "error".to_string(),
        "-show_entries".to_string(),
        "format=duration".to_string(),
        "-of".to_string(),
        "default=noprint_wrappers=1:nokey=1".to_string(),
        input.to_string_lossy().into_owned(),
    ]
}

/// Detect freeze regions in `input`, reporting analysis progress to `progress`
pub fn detect_freezes(
    runner: &ProcessRunner,
    ffmpeg: &str,
    input: &Path,
    settings: &DetectionSettings,
    progress: &mut dyn ProgressReporter,
) -> FreezecutResult<Vec<FreezeRegion>> {
    ensure_exists(input)?;
    info!(
        "Detecting freezes in {} (noise {}dB, min {}s)",
        input.display(),
        settings.noise_db,
        settings.min_duration
    );

    let argv = freeze_probe_args(ffmpeg, input, settings);
    let mut relay = ProgressRelay::new(TrimPhase::Analyzing, progress);
    let run = run_parsed(runner, &argv, &mut relay)?;
    run.output.into_checked(ffmpeg)?;

    info!("Found {} freeze region(s)", run.freezes.len());
    Ok(run.freezes)
}

/// Probe the total duration of `input`; unparseable output yields `0.0`
pub fn probe_duration(
    runner: &ProcessRunner,
    ffprobe: &str,
    input: &Path,
) -> FreezecutResult<TimeSeconds> {
    ensure_exists(input)?;
    let text = runner.capture(&duration_probe_args(ffprobe, input))?;
    let duration = parse_duration_text(&text);
    if duration <= 0.0 {
        warn!(
            "Could not read a duration for {} (got {:?}); using 0",
            input.display(),
            text.trim()
        );
    }
    Ok(duration)
}
