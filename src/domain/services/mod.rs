//! Domain Services
//!
//! Pure logic over extracted scenes and option values. Nothing here spawns
//! processes or touches the file system.

mod command_builder;
mod extractor;
mod resolver;

pub use command_builder::{
    batch_name, gpu_affinity_env, RenderCommand, RenderTask, SubmissionArgs, GPU_DISABLE_VAR,
};
pub use extractor::{extract_layer_metadata, extract_prims, extract_scene};
pub use resolver::{DerivationResolver, Resolution, ResolveRequest, DEFAULT_SETTINGS_PATH};
