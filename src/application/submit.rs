//! Submit Use Case
//!
//! Inspects, resolves and submits each scene file in turn. A file that
//! cannot be read or is rejected by the farm is recorded as failed; the rest
//! of the batch still goes out.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::Config;
use crate::domain::entities::{JobDescription, JobInfo, PluginInfo};
use crate::domain::options::{self, OptionValue, OptionValues};
use crate::domain::ports::{JobSubmitter, SceneReader};
use crate::domain::services::{
    batch_name, DerivationResolver, Resolution, ResolveRequest, SubmissionArgs,
};
use crate::domain::value_objects::{FrameRange, PrimPattern};
use crate::error::{HuskError, HuskResult};

/// Options for the submit operation
#[derive(Debug, Clone, Default)]
pub struct SubmitOptions {
    pub files: Vec<PathBuf>,
    /// Overrides both the config and the scene frame range
    pub frames: Option<FrameRange>,
    pub chunk_size: Option<u32>,
    pub batch_name: Option<String>,
    pub comment: String,
    pub pool: Option<String>,
    pub group: Option<String>,
    pub priority: Option<u32>,
    /// Catalog values keyed by row name (`--renderer`, `--res`, ...)
    pub values: OptionValues,
    pub extra_args: String,
    /// Houdini version written to the plugin info
    pub version: Option<String>,
}

impl SubmitOptions {
    fn text(&self, row: &str) -> Option<&str> {
        match self.values.get(row) {
            Some(OptionValue::Text(text)) if !text.trim().is_empty() => Some(text.trim()),
            _ => None,
        }
    }

    fn request(&self, frames: FrameRange) -> ResolveRequest {
        ResolveRequest {
            passes: self.text("--pass").map(PrimPattern::parse_list).unwrap_or_default(),
            settings: self
                .text("--settings")
                .map(PrimPattern::parse_list)
                .unwrap_or_default(),
            output: self.text("--output").map(str::to_string),
            frames: Some(frames),
        }
    }
}

/// How one file's submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitStatus {
    /// The farm queued the job
    Accepted,
    /// The farm answered without `Result=Success`
    Rejected,
    /// The job never reached the farm
    Failed,
}

/// Result of submitting one scene file
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub file: PathBuf,
    pub job_name: String,
    pub status: SubmitStatus,
    pub job_id: Option<String>,
    /// Submission command output, or the error that stopped the file
    pub output: String,
    pub frames: Option<FrameRange>,
    pub output_filenames: Vec<String>,
    pub warnings: Vec<String>,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionOutcome {
    fn failed(file: &Path, error: &HuskError, warnings: Vec<String>) -> Self {
        Self {
            file: file.to_path_buf(),
            job_name: job_name(file),
            status: SubmitStatus::Failed,
            job_id: None,
            output: error.to_string(),
            frames: None,
            output_filenames: Vec::new(),
            warnings,
            submitted_at: Utc::now(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.status == SubmitStatus::Accepted
    }
}

/// Result of the submit operation
#[derive(Debug, Clone, Default)]
pub struct SubmitReport {
    pub batch_name: Option<String>,
    pub outcomes: Vec<SubmissionOutcome>,
}

impl SubmitReport {
    pub fn accepted(&self) -> impl Iterator<Item = &SubmissionOutcome> {
        self.outcomes.iter().filter(|o| o.is_accepted())
    }

    pub fn failed(&self) -> impl Iterator<Item = &SubmissionOutcome> {
        self.outcomes.iter().filter(|o| !o.is_accepted())
    }

    /// Check if every file was queued
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(SubmissionOutcome::is_accepted)
    }

    /// Results summary: job names under a success banner, failed job names
    /// with their non-blank output lines indented by a tab.
    pub fn message(&self) -> String {
        let mut out = String::new();

        let accepted: Vec<_> = self.accepted().collect();
        if !accepted.is_empty() {
            out.push_str("---| Successful Submissions |---\n");
            for outcome in accepted {
                out.push_str(&outcome.job_name);
                out.push('\n');
            }
            out.push('\n');
        }

        let failed: Vec<_> = self.failed().collect();
        if !failed.is_empty() {
            out.push_str("-!!|   Failed Submissions   |!!-\n");
            for outcome in failed {
                out.push_str(&outcome.job_name);
                out.push('\n');
                for line in outcome.output.lines().filter(|l| !l.trim().is_empty()) {
                    out.push('\t');
                    out.push_str(line);
                    out.push('\n');
                }
                out.push('\n');
            }
        }

        out.trim_end().to_string()
    }
}

/// A job ready to hand to the farm, with what resolution found.
#[derive(Debug, Clone)]
pub struct PreparedJob {
    pub job: JobDescription,
    pub resolution: Resolution,
}

/// Submit Use Case
///
/// Orchestrates scene reading, output resolution and job submission.
pub struct SubmitUseCase<'a> {
    config: &'a Config,
    reader: &'a dyn SceneReader,
    submitter: &'a dyn JobSubmitter,
}

impl<'a> SubmitUseCase<'a> {
    pub fn new(
        config: &'a Config,
        reader: &'a dyn SceneReader,
        submitter: &'a dyn JobSubmitter,
    ) -> Self {
        Self {
            config,
            reader,
            submitter,
        }
    }

    /// Execute the submit operation
    pub fn execute(&self, options: &SubmitOptions) -> HuskResult<SubmitReport> {
        self.execute_with_callback(options, |_| {})
    }

    /// Execute with a callback for each finished file (for streaming UI).
    ///
    /// Option values are validated once up front, so an invalid choice or
    /// out-of-range value stops the whole batch before anything is queued.
    pub fn execute_with_callback<F>(
        &self,
        options: &SubmitOptions,
        mut on_outcome: F,
    ) -> HuskResult<SubmitReport>
    where
        F: FnMut(&SubmissionOutcome),
    {
        let args = SubmissionArgs::collect(options::catalog(), &options.values)?;

        let batch = options
            .batch_name
            .clone()
            .filter(|b| !b.trim().is_empty())
            .or_else(|| {
                let paths: Vec<String> = options
                    .files
                    .iter()
                    .map(|f| f.to_string_lossy().into_owned())
                    .collect();
                batch_name(&paths)
            });

        let mut report = SubmitReport {
            batch_name: batch.clone(),
            outcomes: Vec::with_capacity(options.files.len()),
        };

        for file in &options.files {
            let outcome = self.submit_file(file, options, &args, batch.as_deref());
            on_outcome(&outcome);
            report.outcomes.push(outcome);
        }

        Ok(report)
    }

    fn submit_file(
        &self,
        file: &Path,
        options: &SubmitOptions,
        args: &SubmissionArgs,
        batch: Option<&str>,
    ) -> SubmissionOutcome {
        let prepared = match self.prepare(file, options, args, batch) {
            Ok(prepared) => prepared,
            Err(e) => {
                log::warn!("{}: {}", file.display(), e);
                return SubmissionOutcome::failed(file, &e, Vec::new());
            }
        };

        let PreparedJob { job, resolution } = prepared;
        let warnings = resolution.warnings;

        let receipt = match self.submitter.submit(&job) {
            Ok(receipt) => receipt,
            Err(e) => return SubmissionOutcome::failed(file, &e, warnings),
        };

        SubmissionOutcome {
            file: file.to_path_buf(),
            job_name: job.job.name.clone(),
            status: if receipt.accepted {
                SubmitStatus::Accepted
            } else {
                SubmitStatus::Rejected
            },
            job_id: receipt.job_id,
            output: receipt.output,
            frames: Some(job.job.frames),
            output_filenames: job.job.output_filenames,
            warnings,
            submitted_at: Utc::now(),
        }
    }

    /// Read and resolve one file into a job description without submitting.
    pub fn prepare(
        &self,
        file: &Path,
        options: &SubmitOptions,
        args: &SubmissionArgs,
        batch: Option<&str>,
    ) -> HuskResult<PreparedJob> {
        let scene = self.reader.read_scene(file)?;

        let (frames, frames_warning) =
            super::frames_for(file, options.frames, &scene, self.config)?;

        let mut resolution = DerivationResolver::new(&scene)
            .with_path_mapping(self.config.path_mapping())
            .with_default_settings(self.config.submission.default_settings.clone())
            .resolve(&options.request(frames));
        if let Some(warning) = frames_warning {
            resolution.warnings.insert(0, warning);
        }

        let mut output_filenames: Vec<String> = Vec::new();
        for output in &resolution.product_outputs {
            let printf = output.template.to_printf();
            if !output_filenames.contains(&printf) {
                output_filenames.push(printf);
            }
        }

        let farm = &self.config.farm;
        let job = JobInfo {
            plugin: farm.plugin.clone(),
            name: job_name(file),
            batch_name: batch.map(str::to_string),
            comment: options.comment.clone(),
            frames,
            chunk_size: options
                .chunk_size
                .unwrap_or(self.config.submission.chunk_size),
            pool: options.pool.clone().or_else(|| farm.pool.clone()),
            group: options.group.clone().or_else(|| farm.group.clone()),
            priority: options.priority.or(farm.priority),
            output_filenames,
        };

        let plugin = PluginInfo {
            scene_file: scene_path(file),
            version: options
                .version
                .clone()
                .or_else(|| self.config.renderer.version.clone()),
            log_level: args.log_level,
            extra_args: options.extra_args.clone(),
            arguments: args.arguments.clone(),
        };

        Ok(PreparedJob {
            job: JobDescription { job, plugin },
            resolution,
        })
    }
}

fn job_name(file: &Path) -> String {
    file.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string_lossy().into_owned())
}

// Workers do not share the submitter's working directory.
fn scene_path(file: &Path) -> String {
    std::path::absolute(file)
        .unwrap_or_else(|_| file.to_path_buf())
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests;
