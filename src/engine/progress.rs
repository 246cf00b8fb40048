//! Progress relay and the console/JSON sinks used by the CLI

use std::io::{self, Write};

use crate::domain::model::TrimPhase;
use crate::ports::ProgressReporter;

/// Relays parser ticks for one phase into a sink, clamping every value.
pub struct ProgressRelay<'a> {
    phase: TrimPhase,
    sink: &'a mut dyn ProgressReporter,
    last: Option<u8>,
}

impl<'a> ProgressRelay<'a> {
    pub fn new(phase: TrimPhase, sink: &'a mut dyn ProgressReporter) -> Self {
        Self {
            phase,
            sink,
            last: None,
        }
    }

    pub fn start(&mut self) {
        self.sink.on_start(self.phase);
    }

    /// Forward `percent`, clamped into `[0, 100]`
    pub fn emit(&mut self, percent: u8) {
        let percent = percent.min(100);
        self.last = Some(percent);
        self.sink.on_progress(percent);
    }

    pub fn finish(&mut self) {
        self.sink.on_finish(self.phase);
    }

    /// Last value delivered during this phase
    pub fn last(&self) -> Option<u8> {
        self.last
    }
}

/// Sink that drops every event; used when no reporter is supplied
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn on_progress(&mut self, _percent: u8) {}
}

const BAR_WIDTH: usize = 30;

/// Single-line progress bar redrawn in place, `Analyzing video: |#####     | 42%`
pub struct ConsoleProgress<W: Write = io::Stderr> {
    writer: W,
    title: &'static str,
    last: Option<u8>,
}

impl ConsoleProgress<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            title: "",
            last: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn draw(&mut self, percent: u8) {
        let filled = usize::from(percent) * BAR_WIDTH / 100;
        let bar = "#".repeat(filled) + &" ".repeat(BAR_WIDTH - filled);
        let _ = write!(self.writer, "\r{}: |{}| {}%", self.title, bar, percent);
        let _ = self.writer.flush();
        self.last = Some(percent);
    }
}

impl<W: Write> ProgressReporter for ConsoleProgress<W> {
    fn on_start(&mut self, phase: TrimPhase) {
        self.title = phase.title();
        self.draw(0);
    }

    fn on_progress(&mut self, percent: u8) {
        if self.last != Some(percent) {
            self.draw(percent);
        }
    }

    /// Leave the bar at its last value; a failed pass does not jump to 100
    fn on_finish(&mut self, _phase: TrimPhase) {
        let _ = writeln!(self.writer);
        let _ = self.writer.flush();
        self.last = None;
    }
}

/// Emits one JSON object per event, for machine consumers
pub struct JsonProgress<W: Write = io::Stdout> {
    writer: W,
    phase: Option<TrimPhase>,
}

impl JsonProgress<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonProgress<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            phase: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, event: serde_json::Value) {
        let _ = writeln!(self.writer, "{}", event);
        let _ = self.writer.flush();
    }
}

impl<W: Write> ProgressReporter for JsonProgress<W> {
    fn on_start(&mut self, phase: TrimPhase) {
        self.phase = Some(phase);
        self.emit(serde_json::json!({
            "event": "start",
            "phase": phase,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn on_progress(&mut self, percent: u8) {
        let phase = self.phase;
        self.emit(serde_json::json!({
            "event": "progress",
            "phase": phase,
            "percent": percent
        }));
    }

    fn on_finish(&mut self, phase: TrimPhase) {
        self.emit(serde_json::json!({
            "event": "finish",
            "phase": phase,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
        self.phase = None;
    }
}
