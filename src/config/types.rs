//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::DEFAULT_PLUGIN;
use crate::domain::services::DEFAULT_SETTINGS_PATH;
use crate::domain::value_objects::{FrameRange, PathMapping, PathMappingRule};
use crate::error::HuskResult;

use super::loader::{self, ConfigWarning, LoadedConfig};

/// Placeholder replaced by the job's Houdini version in executable paths.
pub const VERSION_PLACEHOLDER: &str = "XX.X.XXX";

fn default_executables() -> Vec<String> {
    vec![
        "C:/Program Files/Side Effects Software/Houdini XX.X.XXX/bin/husk.exe".to_string(),
        "/opt/hfsXX.X.XXX/bin/husk".to_string(),
        "/Applications/Houdini/HoudiniXX.X.XXX/Frameworks/Houdini.framework/Versions/Current/Resources/bin/husk".to_string(),
    ]
}

fn default_max_gpus() -> u32 {
    4
}

fn default_deadlinecommand() -> String {
    "deadlinecommand".to_string()
}

fn default_plugin() -> String {
    DEFAULT_PLUGIN.to_string()
}

fn default_worker_command() -> String {
    "husk-submit".to_string()
}

fn default_chunk_size() -> u32 {
    5
}

fn default_settings_path() -> String {
    DEFAULT_SETTINGS_PATH.to_string()
}

fn default_true() -> bool {
    true
}

/// Renderer location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Candidate husk paths, first existing one wins
    #[serde(default = "default_executables")]
    pub executables: Vec<String>,

    /// Houdini version substituted for `XX.X.XXX`
    #[serde(default)]
    pub version: Option<String>,

    /// Explicit usdcat path; otherwise the one next to husk
    #[serde(default)]
    pub usdcat: Option<PathBuf>,

    #[serde(default = "default_max_gpus")]
    pub max_gpus: u32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            executables: default_executables(),
            version: None,
            usdcat: None,
            max_gpus: default_max_gpus(),
        }
    }
}

/// Farm host settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmConfig {
    #[serde(default = "default_deadlinecommand")]
    pub deadlinecommand: String,

    #[serde(default = "default_plugin")]
    pub plugin: String,

    /// husk-submit as the workers see it; the installed plugin runs
    /// `<worker_command> render` for every task
    #[serde(default = "default_worker_command")]
    pub worker_command: String,

    #[serde(default)]
    pub pool: Option<String>,

    #[serde(default)]
    pub group: Option<String>,

    #[serde(default)]
    pub priority: Option<u32>,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            deadlinecommand: default_deadlinecommand(),
            plugin: default_plugin(),
            worker_command: default_worker_command(),
            pool: None,
            group: None,
            priority: None,
        }
    }
}

/// Submission defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionConfig {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u32,

    /// Frame range for scenes that declare none
    #[serde(default)]
    pub frames: Option<FrameRange>,

    /// Settings prim tried when no pass selects one
    #[serde(default = "default_settings_path")]
    pub default_settings: String,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            frames: None,
            default_settings: default_settings_path(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub renderer: RendererConfig,

    #[serde(default)]
    pub farm: FarmConfig,

    #[serde(default)]
    pub submission: SubmissionConfig,

    #[serde(default)]
    pub path_mapping: Vec<PathMappingRule>,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> HuskResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (unknown keys).
    pub fn load_with_warnings(path: &Path) -> HuskResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Find and load the effective configuration: `explicit`, then
    /// `./husk-submit.toml`, then the user config, then defaults.
    pub fn discover(explicit: Option<&Path>) -> HuskResult<LoadedConfig> {
        loader::discover(explicit)
    }

    /// Apply environment variable overrides (HUSK_SUBMIT_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    pub fn path_mapping(&self) -> PathMapping {
        PathMapping::new(self.path_mapping.clone())
    }
}
