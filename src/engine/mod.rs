//! Process execution, progress relaying and the concat pass

pub mod concat;
pub mod progress;
pub mod runner;

pub use concat::{run_concat, DirectiveFile, SegmentPlan};
pub use progress::{ConsoleProgress, JsonProgress, NoProgress, ProgressRelay};
pub use runner::{ProcessRunner, RunOutput};
