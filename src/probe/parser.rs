//! Line-oriented parser for ffmpeg's diagnostic stream
//!
//! Each line is fed through [`ParserState::feed`], which carries the only
//! state the parser needs: the pending freeze start and the run's duration.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::model::{FreezeRegion, TimeSeconds};

static DURATION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Duration:\s*(\d{2}:\d{2}:\d{2}\.\d+)").unwrap());
static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"time=(\d{2}:\d{2}:\d{2}\.\d+)").unwrap());
static FREEZE_START_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"freeze_start:\s*([\d.]+)").unwrap());
static FREEZE_END_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"freeze_end:\s*([\d.]+)").unwrap());

/// Something recognised on a single diagnostic line
#[derive(Debug, Clone, PartialEq)]
pub enum ParseEvent {
    /// First `Duration:` banner of the run
    DurationFound(TimeSeconds),
    /// Elapsed-time marker converted to a percentage of the duration
    ProgressTick(u8),
    /// A freeze end paired with the pending freeze start
    FreezeRegionFound(FreezeRegion),
}

/// Parser state threaded through one process run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParserState {
    pending_start: Option<TimeSeconds>,
    duration: Option<TimeSeconds>,
}

impl ParserState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Duration from the run's banner, once seen
    pub fn duration(&self) -> Option<TimeSeconds> {
        self.duration
    }

    /// Freeze start still waiting for its end marker
    pub fn pending_start(&self) -> Option<TimeSeconds> {
        self.pending_start
    }

    /// Consume one line, returning at most one event.
    ///
    /// Lines that match nothing leave the state untouched. A freeze start
    /// overwrites any earlier pending start, and a freeze end without a
    /// pending start is ignored.
    pub fn feed(&mut self, line: &str) -> Option<ParseEvent> {
        if self.duration.is_none() {
            if let Some(duration) = timestamp_marker(&DURATION_PATTERN, line) {
                self.duration = Some(duration);
                return Some(ParseEvent::DurationFound(duration));
            }
        }

        if let Some(duration) = self.duration {
            if let Some(elapsed) = timestamp_marker(&TIME_PATTERN, line) {
                return Some(ParseEvent::ProgressTick(progress_percent(elapsed, duration)));
            }
        }

        if let Some(start) = seconds_marker(&FREEZE_START_PATTERN, line) {
            self.pending_start = Some(start);
            return None;
        }

        if let Some(end) = seconds_marker(&FREEZE_END_PATTERN, line) {
            let start = self.pending_start.take()?;
            return match FreezeRegion::new(start, end) {
                Ok(region) => Some(ParseEvent::FreezeRegionFound(region)),
                Err(e) => {
                    tracing::debug!("Dropping freeze marker pair: {}", e);
                    None
                }
            };
        }

        None
    }
}

/// Parse `HH:MM:SS.mmm` into seconds. Minutes and seconds are not range checked.
pub fn parse_timestamp(text: &str) -> Option<TimeSeconds> {
    let mut parts = text.trim().splitn(3, ':');
    let hours: f64 = parts.next()?.parse().ok()?;
    let minutes: f64 = parts.next()?.parse().ok()?;
    let seconds: f64 = parts.next()?.parse().ok()?;
    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}

/// Parse ffprobe's bare duration output. Anything non-numeric becomes `0.0`.
pub fn parse_duration_text(output: &str) -> TimeSeconds {
    output
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|seconds| seconds.is_finite())
        .unwrap_or(0.0)
}

/// `round(elapsed / duration * 100)` clamped into `[0, 100]`
pub fn progress_percent(elapsed: TimeSeconds, duration: TimeSeconds) -> u8 {
    let percent = (elapsed / duration * 100.0).round();
    if percent.is_nan() {
        0
    } else {
        percent.clamp(0.0, 100.0) as u8
    }
}

fn timestamp_marker(pattern: &Regex, line: &str) -> Option<TimeSeconds> {
    parse_timestamp(&pattern.captures(line)?[1])
}

fn seconds_marker(pattern: &Regex, line: &str) -> Option<TimeSeconds> {
    pattern.captures(line)?[1].parse().ok()
}
