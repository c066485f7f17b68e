//! Configuration for husk-submit
//!
//! Precedence, highest first:
//! 1. CLI flags
//! 2. Environment variables (HUSK_SUBMIT_*)
//! 3. `--config <FILE>`, else `./husk-submit.toml`, else the user config
//!    (`<config dir>/husk-submit/config.toml`)
//! 4. Built-in defaults

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use loader::{apply_env, ConfigWarning, LoadedConfig, PROJECT_CONFIG_FILE};
pub use types::{
    ColorMode, Config, FarmConfig, OutputConfig, RendererConfig, SubmissionConfig,
    VERSION_PLACEHOLDER,
};
