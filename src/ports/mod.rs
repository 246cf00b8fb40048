// Ports - Interface definitions (contracts)

use std::path::Path;

use crate::domain::model::*;
use crate::engine::concat::SegmentPlan;
use crate::error::FreezecutResult;

/// Sink for 0-100 progress events pushed while an external pass runs.
///
/// Events are delivered synchronously, in order, on the calling thread.
/// Values are clamped before delivery but are not guaranteed monotonic.
pub trait ProgressReporter {
    /// Called when a pass that reports progress starts
    fn on_start(&mut self, _phase: TrimPhase) {}

    /// Called with a percentage in `[0, 100]`
    fn on_progress(&mut self, percent: u8);

    /// Called after the pass has exited, successfully or not
    fn on_finish(&mut self, _phase: TrimPhase) {}
}

/// Port for duration probing
pub trait ProbePort {
    /// Total duration of `input` in seconds; unparseable output yields `0.0`
    fn probe_duration(&self, input: &Path) -> FreezecutResult<TimeSeconds>;
}

/// Port for the long-running external passes
pub trait ExecutePort {
    /// Run freeze detection over `input`, returning regions in stream order
    fn detect_freezes(
        &self,
        input: &Path,
        settings: &DetectionSettings,
        progress: &mut dyn ProgressReporter,
    ) -> FreezecutResult<Vec<FreezeRegion>>;

    /// Stream-copy the plan's segments, in order, into `output`
    fn concat(
        &self,
        plan: &SegmentPlan,
        output: &Path,
        progress: &mut dyn ProgressReporter,
    ) -> FreezecutResult<()>;
}
