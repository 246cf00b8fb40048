// Trim interactor - Orchestrates the freeze-trimming use case

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::model::*;
use crate::domain::rules::*;
use crate::engine::concat::SegmentPlan;
use crate::engine::progress::NoProgress;
use crate::error::{FreezecutError, FreezecutResult};
use crate::ports::*;
use crate::utils::path::{ensure_distinct, ensure_exists};

/// One trim request
#[derive(Debug, Clone)]
pub struct TrimRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub detection: DetectionSettings,
    /// Stop after planning; nothing is written
    pub dry_run: bool,
}

/// Freeze and keep regions of one video
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub input: PathBuf,
    pub duration: TimeSeconds,
    pub freezes: Vec<FreezeRegion>,
    pub keep: Vec<KeepRegion>,
    pub summary: RegionSummary,
}

/// What a trim run did
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TrimOutcome {
    /// No freezes were found; the input was copied unchanged (unless dry run)
    Copied { output: PathBuf, dry_run: bool },
    /// Regions were planned but nothing was written
    DryRun { analysis: Analysis, segments: usize },
    /// Kept segments were concatenated into the output
    Trimmed {
        analysis: Analysis,
        output: PathBuf,
        output_size: u64,
    },
}

/// Interactor for the trim use case
pub struct TrimInteractor {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    reporter: Box<dyn ProgressReporter>,
}

impl TrimInteractor {
    /// Create new trim interactor with injected ports and no progress output
    pub fn new(probe_port: Arc<dyn ProbePort>, execute_port: Arc<dyn ExecutePort>) -> Self {
        Self {
            probe_port,
            execute_port,
            reporter: Box::new(NoProgress),
        }
    }

    /// Route progress of the freeze probe and the concat pass to `reporter`
    pub fn with_reporter(mut self, reporter: Option<Box<dyn ProgressReporter>>) -> Self {
        self.reporter = reporter.unwrap_or_else(|| Box::new(NoProgress));
        self
    }

    /// Detect freezes and compute what would be kept, without writing anything
    pub fn analyze(
        &mut self,
        input: &Path,
        detection: &DetectionSettings,
    ) -> FreezecutResult<Analysis> {
        ensure_exists(input)?;
        let freezes = self.detect(input, detection)?;
        ensure_ordered(&freezes)?;
        let duration = self.probe_port.probe_duration(input)?;
        Ok(Self::plan_regions(input, freezes, duration))
    }

    /// Execute the trim: detect, plan, then copy or concatenate
    pub fn run(&mut self, request: &TrimRequest) -> FreezecutResult<TrimOutcome> {
        ensure_exists(&request.input)?;
        ensure_distinct(&request.input, &request.output)?;
        info!(
            "Trimming {} -> {}",
            request.input.display(),
            request.output.display()
        );

        let freezes = self.detect(&request.input, &request.detection)?;

        if freezes.is_empty() {
            info!("No freeze regions detected; copying original video");
            if !request.dry_run {
                std::fs::copy(&request.input, &request.output)?;
            }
            return Ok(TrimOutcome::Copied {
                output: request.output.clone(),
                dry_run: request.dry_run,
            });
        }

        ensure_ordered(&freezes)?;
        let duration = self.probe_port.probe_duration(&request.input)?;
        let analysis = Self::plan_regions(&request.input, freezes, duration);

        if analysis.keep.is_empty() {
            return Err(FreezecutError::invalid_regions(
                "all video content would be removed",
            ));
        }

        let plan = SegmentPlan::build(&request.input, &analysis.keep)?;

        if request.dry_run {
            info!("Dry run: {} segment(s) planned, nothing written", plan.len());
            return Ok(TrimOutcome::DryRun {
                analysis,
                segments: plan.len(),
            });
        }

        self.execute_port
            .concat(&plan, &request.output, self.reporter.as_mut())?;

        let output_size = std::fs::metadata(&request.output)?.len();
        info!(
            "Wrote {} ({} bytes)",
            request.output.display(),
            output_size
        );

        Ok(TrimOutcome::Trimmed {
            analysis,
            output: request.output.clone(),
            output_size,
        })
    }

    fn detect(
        &mut self,
        input: &Path,
        detection: &DetectionSettings,
    ) -> FreezecutResult<Vec<FreezeRegion>> {
        self.execute_port
            .detect_freezes(input, detection, self.reporter.as_mut())
    }

    fn plan_regions(input: &Path, freezes: Vec<FreezeRegion>, duration: TimeSeconds) -> Analysis {
        if duration <= 0.0 {
            warn!("Video duration is unknown; keep regions will be degenerate");
        }
        let keep = compute_keep_regions(&freezes, duration);
        let summary = RegionSummary::new(&freezes, &keep, duration);
        info!(
            "{} freeze region(s), keeping {} segment(s) ({:.1}% of {:.3}s)",
            summary.freeze_count,
            summary.keep_count,
            summary.kept_percent(),
            duration
        );

        Analysis {
            input: input.to_path_buf(),
            duration,
            freezes,
            keep,
            summary,
        }
    }
}
