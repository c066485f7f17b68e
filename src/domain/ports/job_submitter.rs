//! JobSubmitter port - hands a job description to the farm host

use crate::domain::entities::JobDescription;
use crate::error::HuskResult;

/// What the farm host answered for one job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub accepted: bool,
    pub job_id: Option<String>,
    /// Raw output of the submission command
    pub output: String,
}

impl SubmitReceipt {
    /// Read a `deadlinecommand` reply. Success is `Result=Success` anywhere
    /// in the output.
    pub fn from_output(output: impl Into<String>) -> Self {
        let output = output.into();
        let accepted = output.contains("Result=Success");
        let job_id = output
            .lines()
            .find_map(|line| line.trim().strip_prefix("JobID="))
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        Self {
            accepted,
            job_id,
            output,
        }
    }
}

pub trait JobSubmitter {
    /// Submit one job. `Err` means the farm could not be reached at all; a
    /// rejected job is an `Ok` receipt with `accepted == false`.
    fn submit(&self, job: &JobDescription) -> HuskResult<SubmitReceipt>;
}
