// Domain rules - Interval arithmetic over a video's timeline

use serde::Serialize;

use crate::domain::model::*;
use crate::error::{FreezecutError, FreezecutResult};

/// Compute the intervals to keep: the complement of `freezes` within `[0, duration]`.
///
/// `freezes` must be ascending and non-overlapping. The input is neither sorted
/// nor validated here; callers that cannot guarantee the ordering should run
/// [`ensure_ordered`] first. A freeze covering the whole video yields an empty
/// list, which the caller must reject before planning a concat pass.
pub fn compute_keep_regions(freezes: &[FreezeRegion], duration: TimeSeconds) -> Vec<KeepRegion> {
    let mut keep = Vec::with_capacity(freezes.len() + 1);
    let mut cursor = 0.0;

    for freeze in freezes {
        if freeze.start > cursor {
            keep.push(KeepRegion {
                start: cursor,
                end: freeze.start,
            });
        }
        cursor = freeze.end;
    }

    if cursor < duration {
        keep.push(KeepRegion {
            start: cursor,
            end: duration,
        });
    }

    keep
}

/// Fail loudly when freeze regions are out of order or overlap.
///
/// Adjacent regions (one ending exactly where the next starts) are accepted.
pub fn ensure_ordered(freezes: &[FreezeRegion]) -> FreezecutResult<()> {
    for (index, pair) in freezes.windows(2).enumerate() {
        let (previous, current) = (&pair[0], &pair[1]);
        if current.start < previous.end {
            return Err(FreezecutError::UnorderedRegions {
                index: index + 1,
                start: current.start,
                previous_end: previous.end,
            });
        }
    }
    Ok(())
}

/// Totals describing what a trim will keep and remove
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSummary {
    pub duration: TimeSeconds,
    pub freeze_count: usize,
    pub keep_count: usize,
    pub kept_seconds: TimeSeconds,
    pub removed_seconds: TimeSeconds,
}

impl RegionSummary {
    pub fn new(freezes: &[FreezeRegion], keep: &[KeepRegion], duration: TimeSeconds) -> Self {
        Self {
            duration,
            freeze_count: freezes.len(),
            keep_count: keep.len(),
            kept_seconds: keep.iter().map(KeepRegion::length).sum(),
            removed_seconds: freezes.iter().map(FreezeRegion::length).sum(),
        }
    }

    /// Share of the original duration kept, in percent
    pub fn kept_percent(&self) -> f64 {
        Self::percent_of(self.kept_seconds, self.duration)
    }

    /// Share of the original duration removed, in percent
    pub fn removed_percent(&self) -> f64 {
        Self::percent_of(self.removed_seconds, self.duration)
    }

    fn percent_of(part: TimeSeconds, whole: TimeSeconds) -> f64 {
        if whole > 0.0 {
            part / whole * 100.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests;
