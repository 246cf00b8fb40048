// Domain models - Core types and data structures

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{FreezecutError, FreezecutResult};
use crate::utils::time::format_timestamp;

/// Seconds on one video's timeline
pub type TimeSeconds = f64;

/// Default noise tolerance handed to freezedetect, in dB
pub const DEFAULT_NOISE_DB: f64 = -70.0;

/// Default minimum freeze length, in seconds
pub const DEFAULT_MIN_DURATION: f64 = 1.0;

/// Interval of near-static video reported by the freeze probe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FreezeRegion {
    pub start: TimeSeconds,
    pub end: TimeSeconds,
}

impl FreezeRegion {
    /// Create a freeze region, rejecting empty or inverted intervals
    pub fn new(start: TimeSeconds, end: TimeSeconds) -> FreezecutResult<Self> {
        if !(start < end) {
            return Err(FreezecutError::invalid_regions(format!(
                "freeze region start ({start}) must be less than end ({end})"
            )));
        }
        Ok(Self { start, end })
    }

    /// Length of the region in seconds
    pub fn length(&self) -> TimeSeconds {
        self.end - self.start
    }
}

impl fmt::Display for FreezeRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            format_timestamp(self.start),
            format_timestamp(self.end)
        )
    }
}

/// Interval of video to retain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeepRegion {
    pub start: TimeSeconds,
    pub end: TimeSeconds,
}

impl KeepRegion {
    /// Create a keep region, rejecting empty or inverted intervals
    pub fn new(start: TimeSeconds, end: TimeSeconds) -> FreezecutResult<Self> {
        if !(start < end) {
            return Err(FreezecutError::invalid_regions(format!(
                "keep region start ({start}) must be less than end ({end})"
            )));
        }
        Ok(Self { start, end })
    }

    /// Length of the region in seconds
    pub fn length(&self) -> TimeSeconds {
        self.end - self.start
    }
}

impl fmt::Display for KeepRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            format_timestamp(self.start),
            format_timestamp(self.end)
        )
    }
}

/// One entry of a segment plan: a source file bounded by in/out points
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub source: PathBuf,
    pub inpoint: TimeSeconds,
    pub outpoint: TimeSeconds,
}

/// Tunables for the freeze probe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionSettings {
    /// Noise tolerance in dB; less negative detects more freezes
    pub noise_db: f64,
    /// Minimum freeze length in seconds
    pub min_duration: f64,
}

impl DetectionSettings {
    pub fn new(noise_db: f64, min_duration: f64) -> Self {
        Self {
            noise_db,
            min_duration,
        }
    }

    /// Filter expression understood by ffmpeg's freezedetect
    pub fn filter_expr(&self) -> String {
        format!("freezedetect=n={}dB:d={}", self.noise_db, self.min_duration)
    }
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_DB, DEFAULT_MIN_DURATION)
    }
}

/// Named phase of a trim operation, used to label progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrimPhase {
    /// Freeze detection pass
    Analyzing,
    /// Concat pass
    Processing,
}

impl TrimPhase {
    pub fn title(&self) -> &'static str {
        match self {
            TrimPhase::Analyzing => "Analyzing video",
            TrimPhase::Processing => "Processing video",
        }
    }
}
