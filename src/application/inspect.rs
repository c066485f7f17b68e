//! Inspect Use Case
//!
//! Reads one scene and runs the same resolution a submission would, without
//! building a job.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::domain::entities::SceneDescription;
use crate::domain::ports::SceneReader;
use crate::domain::services::{DerivationResolver, Resolution, ResolveRequest};
use crate::error::HuskResult;

/// What was found in one file.
#[derive(Debug, Clone)]
pub struct InspectReport {
    pub file: PathBuf,
    pub scene: SceneDescription,
    pub resolution: Resolution,
}

pub struct InspectUseCase<'a> {
    config: &'a Config,
    reader: &'a dyn SceneReader,
}

impl<'a> InspectUseCase<'a> {
    pub fn new(config: &'a Config, reader: &'a dyn SceneReader) -> Self {
        Self { config, reader }
    }

    /// Frames are picked the way a submission picks them.
    pub fn execute(&self, file: &Path, mut request: ResolveRequest) -> HuskResult<InspectReport> {
        let scene = self.reader.read_scene(file)?;

        let (frames, frames_warning) =
            super::frames_for(file, request.frames, &scene, self.config)?;
        request.frames = Some(frames);

        let mut resolution = DerivationResolver::new(&scene)
            .with_path_mapping(self.config.path_mapping())
            .with_default_settings(self.config.submission.default_settings.clone())
            .resolve(&request);
        if let Some(warning) = frames_warning {
            resolution.warnings.insert(0, warning);
        }

        Ok(InspectReport {
            file: file.to_path_buf(),
            scene,
            resolution,
        })
    }
}
