//! Submission Adapter for Deadline
//!
//! Writes the job info and plugin info files to a temporary directory and
//! runs `deadlinecommand <job-info> <plugin-info>`.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::domain::entities::JobDescription;
use crate::domain::ports::{JobSubmitter, SubmitReceipt};
use crate::error::{HuskError, HuskResult};

pub const JOB_INFO_FILE: &str = "husk_job_info.job";
pub const PLUGIN_INFO_FILE: &str = "husk_plugin_info.job";

pub struct DeadlineCommand {
    program: PathBuf,
}

impl DeadlineCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Ask the farm for its repository root.
    pub fn repository_path(&self) -> HuskResult<PathBuf> {
        let (success, text) = self.run(&[OsStr::new("-GetRepositoryPath")])?;
        let path = text.trim();
        if !success || path.is_empty() {
            return Err(HuskError::FarmCommand {
                message: match path {
                    "" => "-GetRepositoryPath returned nothing".to_string(),
                    text => text.to_string(),
                },
            });
        }
        Ok(PathBuf::from(path))
    }

    /// Run deadlinecommand; returns exit success and stdout followed by
    /// stderr. Only a failure to start is an error.
    fn run(&self, args: &[&OsStr]) -> HuskResult<(bool, String)> {
        log::debug!("{} {:?}", self.program.display(), args);

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| HuskError::FarmCommand {
                message: format!("could not run {}: {}", self.program.display(), e),
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            text.push_str(&stderr);
        }
        if !output.status.success() && text.trim().is_empty() {
            text = format!("{} exited with {}", self.program.display(), output.status);
        }
        Ok((output.status.success(), text))
    }
}

/// Write both job files into `dir`.
pub(crate) fn write_job_files(dir: &Path, job: &JobDescription) -> HuskResult<(PathBuf, PathBuf)> {
    let job_info = dir.join(JOB_INFO_FILE);
    let plugin_info = dir.join(PLUGIN_INFO_FILE);
    fs::write(&job_info, job.job.render())?;
    fs::write(&plugin_info, job.plugin.render())?;
    Ok((job_info, plugin_info))
}

impl JobSubmitter for DeadlineCommand {
    fn submit(&self, job: &JobDescription) -> HuskResult<SubmitReceipt> {
        let dir = tempfile::Builder::new().prefix("husk-submit").tempdir()?;
        let (job_info, plugin_info) = write_job_files(dir.path(), job)?;

        let (_, output) = self.run(&[job_info.as_os_str(), plugin_info.as_os_str()])?;

        let receipt = SubmitReceipt::from_output(output);
        log::debug!(
            "{} accepted={} job_id={:?}",
            job.job.name,
            receipt.accepted,
            receipt.job_id
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{JobInfo, PluginInfo, RenderArgs, DEFAULT_PLUGIN};
    use crate::domain::value_objects::FrameRange;
    use tempfile::tempdir;

    fn job() -> JobDescription {
        JobDescription {
            job: JobInfo {
                plugin: DEFAULT_PLUGIN.to_string(),
                name: "sh010.usd".to_string(),
                batch_name: None,
                comment: String::new(),
                frames: FrameRange::new(1001, 1010).unwrap(),
                chunk_size: 5,
                pool: None,
                group: None,
                priority: None,
                output_filenames: vec![],
            },
            plugin: PluginInfo {
                scene_file: "/shots/sh010.usd".to_string(),
                version: None,
                log_level: 0,
                extra_args: String::new(),
                arguments: RenderArgs::new(),
            },
        }
    }

    #[test]
    fn job_files_are_written_side_by_side() {
        let dir = tempdir().unwrap();
        let (job_info, plugin_info) = write_job_files(dir.path(), &job()).unwrap();

        let job_text = fs::read_to_string(job_info).unwrap();
        assert!(job_text.starts_with("Plugin=HuskStandalone\nName=sh010.usd\n"));
        let plugin_text = fs::read_to_string(plugin_info).unwrap();
        assert!(plugin_text.starts_with("SceneFile=/shots/sh010.usd\n"));
    }

    #[test]
    fn unreachable_deadlinecommand_is_an_error() {
        let dir = tempdir().unwrap();
        let farm = DeadlineCommand::new(dir.path().join("deadlinecommand"));
        assert!(matches!(
            farm.submit(&job()),
            Err(HuskError::FarmCommand { .. })
        ));
    }

    #[cfg(unix)]
    fn script(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join("deadlinecommand");
        fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn accepted_job_returns_job_id() {
        let dir = tempdir().unwrap();
        let farm = DeadlineCommand::new(script(
            dir.path(),
            "test -f \"$1\" && test -f \"$2\" || exit 3\necho Result=Success\necho JobID=abc123\n",
        ));
        let receipt = farm.submit(&job()).unwrap();
        assert!(receipt.accepted);
        assert_eq!(receipt.job_id.as_deref(), Some("abc123"));
    }

    #[cfg(unix)]
    #[test]
    fn rejected_job_is_a_receipt_not_an_error() {
        let dir = tempdir().unwrap();
        let farm = DeadlineCommand::new(script(
            dir.path(),
            "echo 'Error: no such pool' >&2\nexit 1\n",
        ));
        let receipt = farm.submit(&job()).unwrap();
        assert!(!receipt.accepted);
        assert!(receipt.output.contains("no such pool"));
    }

    #[cfg(unix)]
    #[test]
    fn repository_path_is_trimmed() {
        let dir = tempdir().unwrap();
        let farm = DeadlineCommand::new(script(dir.path(), "echo '/mnt/DeadlineRepository10  '\n"));
        assert_eq!(
            farm.repository_path().unwrap(),
            PathBuf::from("/mnt/DeadlineRepository10")
        );
    }
}
