//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod job_submitter;
pub mod scene_reader;

pub use job_submitter::{JobSubmitter, SubmitReceipt};
pub use scene_reader::SceneReader;
