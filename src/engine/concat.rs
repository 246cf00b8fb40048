//! Segment planning and the concat directive payload

use std::fmt::Write as _;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::domain::model::{KeepRegion, Segment, TrimPhase};
use crate::engine::progress::ProgressRelay;
use crate::engine::runner::ProcessRunner;
use crate::error::{FreezecutError, FreezecutResult};
use crate::ports::ProgressReporter;
use crate::probe::run_parsed;
use crate::utils::path::{absolutize, ensure_distinct};

/// Ordered segments to stitch together, one per keep region
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentPlan {
    segments: Vec<Segment>,
}

impl SegmentPlan {
    /// Build a plan over `input` preserving the order of `keep`.
    ///
    /// The source path is made absolute because the concat demuxer resolves
    /// relative entries against the directive file's own directory.
    pub fn build(input: &Path, keep: &[KeepRegion]) -> FreezecutResult<Self> {
        if keep.is_empty() {
            return Err(FreezecutError::invalid_regions(
                "no regions to keep; all video content would be removed",
            ));
        }

        let source: PathBuf = absolutize(input)?;
        let segments = keep
            .iter()
            .map(|region| Segment {
                source: source.clone(),
                inpoint: region.start,
                outpoint: region.end,
            })
            .collect();

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sum of all segment lengths in seconds
    pub fn total_seconds(&self) -> f64 {
        self.segments.iter().map(|s| s.outpoint - s.inpoint).sum()
    }

    /// Render the concat demuxer script: a `file`/`inpoint`/`outpoint` triple per segment
    pub fn directive(&self) -> String {
        let mut script = String::new();
        for segment in &self.segments {
            let _ = writeln!(script, "file '{}'", quote_path(&segment.source));
            let _ = writeln!(script, "inpoint {}", segment.inpoint);
            let _ = writeln!(script, "outpoint {}", segment.outpoint);
        }
        script
    }

    /// Write the directive into a temporary file that is deleted when dropped
    pub fn write_directive(&self) -> FreezecutResult<DirectiveFile> {
        let mut file = tempfile::Builder::new()
            .prefix("freezecut-concat-")
            .suffix(".txt")
            .tempfile()?;
        file.write_all(self.directive().as_bytes())?;
        file.flush()?;
        debug!(
            "Wrote {} segment(s) to {}",
            self.segments.len(),
            file.path().display()
        );
        Ok(DirectiveFile { file })
    }
}

/// Transient directive file; removed from disk when this value goes out of scope
pub struct DirectiveFile {
    file: NamedTempFile,
}

impl DirectiveFile {
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Argument vector for the concat pass: read the directive, stream-copy into `output`
pub fn concat_args(ffmpeg: &str, directive: &Path, output: &Path) -> Vec<String> {
    vec![
        ffmpeg.to_string(),
        "-hide_banner".to_string(),
        "-nostdin".to_string(),
        "-f".to_string(),
        "concat".to_string(),
        "-safe".to_string(),
        "0".to_string(),
        "-i".to_string(),
        directive.to_string_lossy().into_owned(),
        "-c".to_string(),
        "copy".to_string(),
        "-y".to_string(),
        output.to_string_lossy().into_owned(),
    ]
}

/// Losslessly concatenate the plan's segments into `output`.
///
/// Progress is derived from this process's own duration banner. The
/// directive file lives only for the duration of this call. On failure the
/// contents of `output` are undefined.
pub fn run_concat(
    runner: &ProcessRunner,
    ffmpeg: &str,
    plan: &SegmentPlan,
    output: &Path,
    progress: &mut dyn ProgressReporter,
) -> FreezecutResult<()> {
    if plan.is_empty() {
        return Err(FreezecutError::invalid_regions("segment plan is empty"));
    }

    for segment in plan.segments() {
        ensure_distinct(&segment.source, output)?;
    }

    let directive = plan.write_directive()?;
    info!(
        "Concatenating {} segment(s), {:.3}s in total, into {}",
        plan.len(),
        plan.total_seconds(),
        output.display()
    );

    let argv = concat_args(ffmpeg, directive.path(), output);
    let mut relay = ProgressRelay::new(TrimPhase::Processing, progress);
    let run = run_parsed(runner, &argv, &mut relay)?;
    run.output.into_checked(ffmpeg)?;
    Ok(())
}

/// Escape single quotes for the concat demuxer's quoting rules
fn quote_path(path: &Path) -> String {
    path.to_string_lossy().replace('\'', r"'\''")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keep(pairs: &[(f64, f64)]) -> Vec<KeepRegion> {
        pairs
            .iter()
            .map(|&(start, end)| KeepRegion::new(start, end).unwrap())
            .collect()
    }

    fn source() -> PathBuf {
        std::env::temp_dir().join("talk.mp4")
    }

    #[test]
    fn test_build_rejects_empty_regions() {
        let err = SegmentPlan::build(&source(), &[]).unwrap_err();
        assert!(matches!(err, FreezecutError::InvalidRegions { .. }));
    }

    #[test]
    fn test_build_preserves_order() {
        let plan = SegmentPlan::build(&source(), &keep(&[(0.0, 10.0), (15.0, 45.2), (50.7, 90.0)])).unwrap();
        let points: Vec<(f64, f64)> = plan
            .segments()
            .iter()
            .map(|s| (s.inpoint, s.outpoint))
            .collect();
        assert_eq!(points, vec![(0.0, 10.0), (15.0, 45.2), (50.7, 90.0)]);
        assert_eq!(plan.len(), 3);
        assert!((plan.total_seconds() - 79.5).abs() < 1e-9);
    }

    #[test]
    fn test_build_makes_source_absolute() {
        let plan = SegmentPlan::build(Path::new("relative.mp4"), &keep(&[(0.0, 1.0)])).unwrap();
        assert!(plan.segments()[0].source.is_absolute());
    }

    #[test]
    fn test_directive_format() {
        let plan = SegmentPlan::build(&source(), &keep(&[(0.0, 10.0), (20.5, 30.0)])).unwrap();
        let path = source().to_string_lossy().into_owned();
        assert_eq!(
            plan.directive(),
            format!(
                "file '{path}'\ninpoint 0\noutpoint 10\nfile '{path}'\ninpoint 20.5\noutpoint 30\n"
            )
        );
    }

    #[test]
    fn test_directive_escapes_quotes() {
        assert_eq!(quote_path(Path::new("/v/it's.mp4")), r"/v/it'\''s.mp4");
    }

    #[test]
    fn test_concat_args() {
        let argv = concat_args("ffmpeg", Path::new("/tmp/list.txt"), Path::new("out.mp4"));
        assert_eq!(
            argv,
            vec![
                "ffmpeg", "-hide_banner", "-nostdin", "-f", "concat", "-safe", "0", "-i",
                "/tmp/list.txt", "-c", "copy", "-y", "out.mp4"
            ]
        );
    }

    #[test]
    fn test_directive_file_is_removed_on_drop() {
        let plan = SegmentPlan::build(&source(), &keep(&[(1.0, 2.0)])).unwrap();
        let directive = plan.write_directive().unwrap();
        let path = directive.path().to_path_buf();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), plan.directive());
        drop(directive);
        assert!(!path.exists());
    }

    #[test]
    fn test_run_concat_refuses_to_overwrite_source() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("talk.mp4");
        std::fs::write(&input, b"video").unwrap();
        let plan = SegmentPlan::build(&input, &keep(&[(0.0, 10.0), (15.0, 20.0)])).unwrap();

        let err = run_concat(
            &ProcessRunner::new(),
            "freezecut-no-such-ffmpeg",
            &plan,
            &input,
            &mut crate::engine::progress::NoProgress,
        )
        .unwrap_err();

        assert!(matches!(err, FreezecutError::OutputIsInput { .. }));
        assert_eq!(std::fs::read(&input).unwrap(), b"video");
    }
}
