//! Configuration discovery and loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HuskError, HuskResult};

use super::types::Config;

/// Config file looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "husk-submit.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// The effective configuration and where it came from.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<ConfigWarning>,
    /// `None` when running on defaults
    pub source: Option<PathBuf>,
}

/// Load configuration and collect non-fatal warnings (unknown keys).
pub fn load_with_warnings(path: &Path) -> HuskResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| HuskError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .rsplit('.')
                .next()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Find and load the effective configuration, with env overrides applied.
///
/// An explicit path must exist. Discovered files are optional, but once
/// found they must parse.
pub fn discover(explicit: Option<&Path>) -> HuskResult<LoadedConfig> {
    let source = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(HuskError::InvalidConfig {
                    file: path.to_path_buf(),
                    message: "file not found".to_string(),
                });
            }
            Some(path.to_path_buf())
        }
        None => candidate_paths().into_iter().find(|p| p.is_file()),
    };

    let Some(source) = source else {
        log::debug!("no config file found, using defaults");
        return Ok(LoadedConfig {
            config: with_env_overrides(Config::default()),
            ..Default::default()
        });
    };

    log::debug!("loading config from {}", source.display());
    let (config, warnings) = load_with_warnings(&source)?;
    Ok(LoadedConfig {
        config: with_env_overrides(config),
        warnings,
        source: Some(source),
    })
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(PROJECT_CONFIG_FILE)];
    if let Some(dir) = user_config_dir() {
        paths.push(dir.join("husk-submit").join("config.toml"));
    }
    paths
}

// XDG_CONFIG_HOME wins over the platform config dir on every OS.
fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

/// Apply environment variable overrides (HUSK_SUBMIT_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_env(config, |key| std::env::var(key).ok())
}

/// Apply overrides from any variable lookup.
pub fn apply_env(mut config: Config, var: impl Fn(&str) -> Option<String>) -> Config {
    // HUSK_SUBMIT_USDCAT
    if let Some(path) = var("HUSK_SUBMIT_USDCAT").filter(|v| !v.trim().is_empty()) {
        config.renderer.usdcat = Some(PathBuf::from(path.trim()));
    }

    // HUSK_SUBMIT_DEADLINECOMMAND
    if let Some(command) = var("HUSK_SUBMIT_DEADLINECOMMAND").filter(|v| !v.trim().is_empty()) {
        config.farm.deadlinecommand = command.trim().to_string();
    }

    // HUSK_SUBMIT_EXECUTABLES (semicolon-separated)
    if let Some(list) = var("HUSK_SUBMIT_EXECUTABLES") {
        let executables: Vec<String> = list
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if !executables.is_empty() {
            config.renderer.executables = executables;
        }
    }

    // HUSK_SUBMIT_CHUNK_SIZE
    if let Some(value) = var("HUSK_SUBMIT_CHUNK_SIZE") {
        match value.trim().parse::<u32>() {
            Ok(size) if size > 0 => config.submission.chunk_size = size,
            _ => log::warn!("ignoring HUSK_SUBMIT_CHUNK_SIZE={}: not a positive integer", value),
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "renderer",
        "executables",
        "version",
        "usdcat",
        "max_gpus",
        "farm",
        "deadlinecommand",
        "plugin",
        "worker_command",
        "pool",
        "group",
        "priority",
        "submission",
        "chunk_size",
        "frames",
        "default_settings",
        "path_mapping",
        "from",
        "to",
        "output",
        "color",
        "unicode",
    ];

    CANDIDATES
        .iter()
        .map(|candidate| (*candidate, levenshtein(unknown, candidate)))
        .min_by_key(|(_, dist)| *dist)
        .filter(|(_, dist)| *dist <= 2)
        .map(|(candidate, _)| candidate.to_string())
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let b = b.as_bytes();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &ac) in a.as_bytes().iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ac != bc);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
