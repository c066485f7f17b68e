//! Domain Entities
//!
//! - `SceneDescription` - What was extracted from one USD file
//! - `RenderPass` / `RenderSettings` / `RenderProduct` / `ResolvedOutput` - The derivation chain
//! - `RenderArgs` - Renderer arguments carried to the worker
//! - `JobDescription` - Job info and plugin info handed to the farm

mod job;
mod render;
mod render_args;
mod scene;

pub use job::{JobDescription, JobInfo, PluginInfo, DEFAULT_PLUGIN};
pub use render::{ProductOutput, RenderPass, RenderProduct, RenderSettings, ResolvedOutput};
pub use render_args::{ArgValue, RenderArg, RenderArgs};
pub use scene::{LayerMetadata, PrimKind, PrimRecord, SceneDescription, RENDER_SETTINGS_PRIM_PATH};
