//! freezecut library
//!
//! Detects frozen stretches in a video with ffmpeg's `freezedetect` filter
//! and stream-copies the remaining segments into a new file through the
//! concat demuxer.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ports;
pub mod probe;
pub mod utils;

// Re-export commonly used types
pub use app::{Analysis, TrimInteractor, TrimOutcome, TrimRequest};
pub use config::Settings;
pub use domain::model::{DetectionSettings, FreezeRegion, KeepRegion, Segment, TimeSeconds};
pub use domain::rules::{compute_keep_regions, RegionSummary};
pub use error::{FreezecutError, FreezecutResult};
pub use ports::ProgressReporter;
