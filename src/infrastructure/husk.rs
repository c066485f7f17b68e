//! Render Runner
//!
//! Spawns husk for one task and watches its stdout. `USD ERROR` lines fail
//! the task and kill the child; `ALF_PROGRESS n%` lines become progress
//! events. stderr is passed through.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{HuskError, HuskResult};

/// Something husk printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    /// Alfred-style progress, 0-100
    Progress(u8),
    Line(String),
}

/// Text following `USD ERROR`, if the line reports one.
pub fn usd_error(line: &str) -> Option<&str> {
    let at = line.find("USD ERROR")?;
    Some(line[at..].trim_end())
}

/// Percentage from an `ALF_PROGRESS 42%` line.
pub fn alf_progress(line: &str) -> Option<u8> {
    let rest = &line[line.find("ALF_PROGRESS")? + "ALF_PROGRESS".len()..];
    let rest = rest.trim_start();
    let digits_end = rest.find(|c: char| !c.is_ascii_digit())?;
    if digits_end == 0 || !rest[digits_end..].starts_with('%') {
        return None;
    }
    rest[..digits_end].parse::<u32>().ok().map(|p| p.min(100) as u8)
}

pub struct HuskRunner {
    executable: PathBuf,
}

impl HuskRunner {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Run husk to completion, reporting every stdout line.
    pub fn run(
        &self,
        argv: &[String],
        env: &[(String, String)],
        mut on_event: impl FnMut(RenderEvent),
    ) -> HuskResult<()> {
        log::info!("{} {}", self.executable.display(), argv.join(" "));

        let mut child = Command::new(&self.executable)
            .args(argv)
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| HuskError::RenderFailed {
                message: format!("could not start {}: {}", self.executable.display(), e),
            })?;

        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).lines() {
                let line = line?;
                if let Some(error) = usd_error(&line) {
                    let message = error.to_string();
                    // The child may already have exited.
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(HuskError::RenderFailed { message });
                }
                if let Some(progress) = alf_progress(&line) {
                    on_event(RenderEvent::Progress(progress));
                }
                on_event(RenderEvent::Line(line));
            }
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(HuskError::RenderFailed {
                message: format!("husk exited with {}", status),
            });
        }
        Ok(())
    }
}
