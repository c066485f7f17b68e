//! Render Use Case
//!
//! Worker side of a job: read the plugin info file written at submission,
//! build the husk command for one task and run it.

use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::domain::entities::PluginInfo;
use crate::domain::services::{gpu_affinity_env, RenderCommand, RenderTask};
use crate::domain::value_objects::FrameRange;
use crate::error::HuskResult;
use crate::infrastructure::{locate_renderer, HuskRunner, RenderEvent};

/// Options for one render task
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub plugin_info: PathBuf,
    pub frames: FrameRange,
    /// GPUs this worker may use; empty means no affinity
    pub gpus: Vec<u32>,
}

/// Everything needed to start husk for a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    pub executable: PathBuf,
    pub argv: Vec<String>,
    pub env: Vec<(String, String)>,
}

pub struct RenderUseCase<'a> {
    config: &'a Config,
}

impl<'a> RenderUseCase<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Build the command line without running anything.
    pub fn plan(&self, options: &RenderOptions) -> HuskResult<RenderPlan> {
        let content = fs::read_to_string(&options.plugin_info)?;
        let plugin = PluginInfo::parse(&content, &options.plugin_info)?;

        let task = RenderTask {
            scene_file: self.config.path_mapping().apply(&plugin.scene_file),
            frames: options.frames,
        };
        log::debug!("task {} on {}", task.frames, task.scene_file);

        Ok(RenderPlan {
            executable: locate_renderer(&self.config.renderer, plugin.version.as_deref())?,
            argv: RenderCommand::new(&plugin).arguments(&task),
            env: gpu_affinity_env(&options.gpus, self.config.renderer.max_gpus),
        })
    }

    /// Run the task to completion, streaming renderer output.
    pub fn execute<F>(&self, options: &RenderOptions, on_event: F) -> HuskResult<RenderPlan>
    where
        F: FnMut(RenderEvent),
    {
        let plan = self.plan(options)?;
        HuskRunner::new(&plan.executable).run(&plan.argv, &plan.env, on_event)?;
        Ok(plan)
    }
}
