//! Dry-run submitter: renders the job files without contacting the farm

use std::cell::RefCell;

use crate::domain::entities::JobDescription;
use crate::domain::ports::{JobSubmitter, SubmitReceipt};
use crate::error::HuskResult;

#[derive(Debug, Default)]
pub struct PreviewSubmitter {
    jobs: RefCell<Vec<JobDescription>>,
}

impl PreviewSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jobs seen so far, in submission order.
    pub fn jobs(&self) -> Vec<JobDescription> {
        self.jobs.borrow().clone()
    }
}

impl JobSubmitter for PreviewSubmitter {
    fn submit(&self, job: &JobDescription) -> HuskResult<SubmitReceipt> {
        self.jobs.borrow_mut().push(job.clone());
        Ok(SubmitReceipt {
            accepted: true,
            job_id: None,
            output: format!("{}\n{}", job.job.render(), job.plugin.render()),
        })
    }
}
