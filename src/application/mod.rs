//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in domain/services)
//! - Does NOT perform I/O directly except through ports and infrastructure
//!
//! ## Use Cases
//!
//! - `SubmitUseCase` - Inspect, resolve and submit a batch of scene files
//! - `InspectUseCase` - Show what a submission would resolve for one file
//! - `RenderUseCase` - Worker side: run husk for one task
//! - `PluginFiles` - Generate the farm plugin files and entry point
//! - `InstallUseCase` - Write plugin files into the farm repository

use std::path::Path;

use crate::config::Config;
use crate::domain::entities::SceneDescription;
use crate::domain::options as domain_options;
use crate::domain::value_objects::FrameRange;
use crate::error::HuskResult;

pub mod inspect;
pub mod install;
pub mod options;
pub mod render;
pub mod submit;

pub use inspect::{InspectReport, InspectUseCase};
pub use install::{InstallReport, InstallUseCase};
pub use options::PluginFiles;
pub use render::{RenderOptions, RenderPlan, RenderUseCase};
pub use submit::{
    PreparedJob, SubmissionOutcome, SubmitOptions, SubmitReport, SubmitStatus, SubmitUseCase,
};

/// Frames for one file: the explicit range, then the scene's own range, then
/// the config default, then the catalog's `Frames` default. The last case
/// also returns a warning.
fn frames_for(
    file: &Path,
    explicit: Option<FrameRange>,
    scene: &SceneDescription,
    config: &Config,
) -> HuskResult<(FrameRange, Option<String>)> {
    if let Some(frames) = explicit
        .or_else(|| scene.frame_range())
        .or(config.submission.frames)
    {
        return Ok((frames, None));
    }

    let [start, end] = domain_options::pair_default("Frames").unwrap_or_default();
    let frames = FrameRange::new(start, end)?;
    let warning = format!(
        "No frame range in {}, using the default {}",
        file.display(),
        frames
    );
    log::warn!("{}", warning);
    Ok((frames, Some(warning)))
}
