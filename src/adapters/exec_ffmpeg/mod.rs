//! FFmpeg execution adapter
//!
//! Runs the freeze probe and the concat pass through the `ffmpeg` binary.

use std::path::Path;

use crate::domain::model::*;
use crate::engine::concat::{run_concat, SegmentPlan};
use crate::engine::runner::ProcessRunner;
use crate::error::FreezecutResult;
use crate::ports::*;
use crate::probe;

/// FFmpeg-based execution adapter
#[derive(Debug, Clone)]
pub struct FfmpegAdapter {
    program: String,
    runner: ProcessRunner,
}

impl FfmpegAdapter {
    /// Create an adapter that invokes `program` (a name on `PATH` or a full path)
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            runner: ProcessRunner::new(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for FfmpegAdapter {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl ExecutePort for FfmpegAdapter {
    fn detect_freezes(
        &self,
        input: &Path,
        settings: &DetectionSettings,
        progress: &mut dyn ProgressReporter,
    ) -> FreezecutResult<Vec<FreezeRegion>> {
        probe::detect_freezes(&self.runner, &self.program, input, settings, progress)
    }

    fn concat(
        &self,
        plan: &SegmentPlan,
        output: &Path,
        progress: &mut dyn ProgressReporter,
    ) -> FreezecutResult<()> {
        run_concat(&self.runner, &self.program, plan, output, progress)
    }
}
