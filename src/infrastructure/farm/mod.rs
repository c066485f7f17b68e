//! Farm host submitters

mod deadline;
mod preview;

pub use deadline::{DeadlineCommand, JOB_INFO_FILE, PLUGIN_INFO_FILE};
pub use preview::PreviewSubmitter;
