//! FFprobe adapter for duration probing

use std::path::Path;

use crate::domain::model::TimeSeconds;
use crate::engine::runner::ProcessRunner;
use crate::error::FreezecutResult;
use crate::ports::ProbePort;
use crate::probe;

/// FFprobe-based probe adapter
#[derive(Debug, Clone)]
pub struct FfprobeAdapter {
    program: String,
    runner: ProcessRunner,
}

impl FfprobeAdapter {
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

impl Default for FfprobeAdapter {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

impl ProbePort for FfprobeAdapter {
    fn probe_duration(&self, input: &Path) -> FreezecutResult<TimeSeconds> {
        probe::probe_duration(&self.runner, &self.program, input)
    }
}
