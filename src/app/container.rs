use std::sync::Arc;

use tracing::debug;

use crate::adapters::{FfmpegAdapter, FfprobeAdapter};
use crate::app::trim_interactor::TrimInteractor;
use crate::config::Settings;
use crate::ports::{ExecutePort, ProbePort, ProgressReporter};

/// Wires the external-tool adapters into interactors
pub struct AppContainer {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
}

impl AppContainer {
    pub fn new(probe_port: Arc<dyn ProbePort>, execute_port: Arc<dyn ExecutePort>) -> Self {
        Self {
            probe_port,
            execute_port,
        }
    }

    /// Build adapters for the tool paths in `settings`
    pub fn from_settings(settings: &Settings) -> Self {
        let probe_port = Arc::new(FfprobeAdapter::new(settings.ffprobe_path.as_str()));
        let execute_port = Arc::new(FfmpegAdapter::new(settings.ffmpeg_path.as_str()));
        debug!(
            "Using ffmpeg at {:?}, ffprobe at {:?}",
            execute_port.program(),
            probe_port.program()
        );

        Self::new(
            Arc::clone(&probe_port) as Arc<dyn ProbePort>,
            Arc::clone(&execute_port) as Arc<dyn ExecutePort>,
        )
    }

    pub fn trim_interactor(&self, reporter: Option<Box<dyn ProgressReporter>>) -> TrimInteractor {
        TrimInteractor::new(
            Arc::clone(&self.probe_port),
            Arc::clone(&self.execute_port),
        )
        .with_reporter(reporter)
    }
}
