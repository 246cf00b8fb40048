//! External process execution with streamed diagnostic output

use std::io::{self, BufRead, BufReader};
use std::process::{Command, Stdio};

use tracing::{debug, trace};

use crate::error::{FreezecutError, FreezecutResult};

/// Result of one external process run
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    /// Everything the process wrote to its diagnostic stream, one line per entry
    pub output: String,
    /// True when the process exited with status 0
    pub success: bool,
}

impl RunOutput {
    /// Turn a failed run into `ProcessFailure`, keeping the captured text
    pub fn into_checked(self, program: &str) -> FreezecutResult<String> {
        if self.success {
            Ok(self.output)
        } else {
            Err(FreezecutError::ProcessFailure {
                program: program.to_string(),
                output: self.output,
            })
        }
    }
}

/// Spawns external tools from an explicit argument vector; no shell is involved.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    /// Run `argv` to completion, handing each diagnostic line to `on_line` as it arrives.
    ///
    /// The diagnostic stream (stderr) is split on both `\n` and `\r`, so
    /// carriage-return-refreshed status lines are delivered as they are
    /// written. Stdout and stdin are not connected. Blocks until the process
    /// exits; a non-zero status is reported through [`RunOutput::success`],
    /// not as an error.
    pub fn run<F>(&self, argv: &[String], mut on_line: F) -> FreezecutResult<RunOutput>
    where
        F: FnMut(&str),
    {
        let (program, args) = split_argv(argv)?;
        debug!("Spawning {} {:?}", program, args);

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| FreezecutError::Spawn {
                program: program.clone(),
                source,
            })?;

        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "stderr was not captured"))?;

        let mut captured = String::new();
        for line in DiagnosticLines::new(BufReader::new(stderr)) {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(e.into());
                }
            };
            trace!("{}", line);
            on_line(&line);
            captured.push_str(&line);
            captured.push('\n');
        }

        let status = child.wait()?;
        debug!("{} exited with {}", program, status);

        Ok(RunOutput {
            output: captured,
            success: status.success(),
        })
    }

    /// Run `argv` and return its primary output in one read.
    ///
    /// Used for short probes whose answer is printed to stdout. A non-zero
    /// exit becomes `ProcessFailure` carrying the diagnostic text.
    pub fn capture(&self, argv: &[String]) -> FreezecutResult<String> {
        let (program, args) = split_argv(argv)?;
        debug!("Running {} {:?}", program, args);

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| FreezecutError::Spawn {
                program: program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if output.status.success() {
            Ok(stdout)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            Err(FreezecutError::ProcessFailure {
                program: program.clone(),
                output: if stderr.trim().is_empty() { stdout } else { stderr },
            })
        }
    }
}

fn split_argv(argv: &[String]) -> FreezecutResult<(&String, &[String])> {
    argv.split_first().ok_or_else(|| FreezecutError::Spawn {
        program: String::new(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "empty command line"),
    })
}

/// Iterator over lines terminated by `\n` or `\r`; empty lines are skipped.
pub struct DiagnosticLines<R> {
    reader: R,
    pending: Vec<u8>,
    done: bool,
}

impl<R: BufRead> DiagnosticLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::new(),
            done: false,
        }
    }

    fn take_pending(&mut self) -> String {
        let line = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        line
    }
}

impl<R: BufRead> Iterator for DiagnosticLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let available = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };

            if available.is_empty() {
                self.done = true;
                if self.pending.is_empty() {
                    return None;
                }
                return Some(Ok(self.take_pending()));
            }

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(pos) => {
                    self.pending.extend_from_slice(&available[..pos]);
                    self.reader.consume(pos + 1);
                    if !self.pending.is_empty() {
                        return Some(Ok(self.take_pending()));
                    }
                }
                None => {
                    let len = available.len();
                    self.pending.extend_from_slice(available);
                    self.reader.consume(len);
                }
            }
        }
    }
}
