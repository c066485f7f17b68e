//! Job description entity - the job-info and plugin-info files handed to the farm
//!
//! Both files are plain `Key=Value` lines. The plugin info file is read back
//! on the worker by `husk-submit render`.

use std::path::Path;

use crate::domain::options::{self, OptionKind};
use crate::domain::value_objects::FrameRange;
use crate::error::{HuskError, HuskResult};

use super::render_args::{ArgValue, RenderArg, RenderArgs};

/// Farm plugin name used when none is configured.
pub const DEFAULT_PLUGIN: &str = "HuskStandalone";

/// Job-level settings.
#[derive(Debug, Clone, PartialEq)]
pub struct JobInfo {
    pub plugin: String,
    pub name: String,
    pub batch_name: Option<String>,
    pub comment: String,
    pub frames: FrameRange,
    pub chunk_size: u32,
    pub pool: Option<String>,
    pub group: Option<String>,
    pub priority: Option<u32>,
    pub output_filenames: Vec<String>,
}

impl JobInfo {
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries = vec![
            ("Plugin".to_string(), self.plugin.clone()),
            ("Name".to_string(), self.name.clone()),
        ];
        if let Some(batch) = self.batch_name.as_ref().filter(|b| !b.is_empty()) {
            entries.push(("BatchName".to_string(), batch.clone()));
        }
        entries.push(("Comment".to_string(), self.comment.clone()));
        entries.push(("Frames".to_string(), self.frames.to_string()));
        entries.push(("ChunkSize".to_string(), self.chunk_size.to_string()));
        if let Some(pool) = self.pool.as_ref().filter(|p| !p.is_empty()) {
            entries.push(("Pool".to_string(), pool.clone()));
        }
        if let Some(group) = self.group.as_ref().filter(|g| !g.is_empty()) {
            entries.push(("Group".to_string(), group.clone()));
        }
        if let Some(priority) = self.priority {
            entries.push(("Priority".to_string(), priority.to_string()));
        }
        for (i, output) in self.output_filenames.iter().enumerate() {
            entries.push((format!("OutputFilename{}", i), output.clone()));
        }
        entries
    }

    pub fn render(&self) -> String {
        render_entries(&self.entries())
    }
}

/// Plugin-level settings read by the worker.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginInfo {
    pub scene_file: String,
    /// Houdini version substituted into the executable search list
    pub version: Option<String>,
    pub log_level: u8,
    pub extra_args: String,
    pub arguments: RenderArgs,
}

impl PluginInfo {
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries = vec![("SceneFile".to_string(), self.scene_file.clone())];
        if let Some(version) = self.version.as_ref().filter(|v| !v.is_empty()) {
            entries.push(("Version".to_string(), version.clone()));
        }
        entries.push(("LogLevel".to_string(), self.log_level.to_string()));
        entries.push(("ExtraArgs".to_string(), self.extra_args.clone()));
        entries.push(("ArgumentList".to_string(), self.arguments.flags().join(";")));
        for arg in self.arguments.iter() {
            entries.push((arg.flag.clone(), arg.value.to_info_value()));
        }
        entries
    }

    pub fn render(&self) -> String {
        render_entries(&self.entries())
    }

    /// Parse a plugin info file written by `render`.
    pub fn parse(content: &str, file: &Path) -> HuskResult<Self> {
        let entries = parse_entries(content);
        let lookup = |key: &str| {
            entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        let scene_file = lookup("SceneFile")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| HuskError::MissingPluginInfo {
                key: "SceneFile".to_string(),
                file: file.to_path_buf(),
            })?
            .to_string();

        let mut arguments = RenderArgs::new();
        for flag in lookup("ArgumentList")
            .unwrap_or_default()
            .split(';')
            .map(str::trim)
            .filter(|f| !f.is_empty())
        {
            // Listed flags without a value entry are skipped, not fatal.
            if let Some(value) = lookup(flag).and_then(ArgValue::from_info_value) {
                let value = if is_pair_flag(flag) {
                    value.into_pair()
                } else {
                    value
                };
                arguments.push(RenderArg {
                    flag: flag.to_string(),
                    value,
                });
            }
        }

        Ok(Self {
            scene_file,
            version: lookup("Version")
                .filter(|v| !v.is_empty())
                .map(str::to_string),
            log_level: lookup("LogLevel")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0),
            extra_args: lookup("ExtraArgs").unwrap_or_default().to_string(),
            arguments,
        })
    }
}

/// Everything submitted for one USD file.
#[derive(Debug, Clone, PartialEq)]
pub struct JobDescription {
    pub job: JobInfo,
    pub plugin: PluginInfo,
}

/// Catalog rows that carry two values (`--res`, `--tile-count`).
fn is_pair_flag(flag: &str) -> bool {
    options::find(flag).is_some_and(|row| matches!(row.kind, OptionKind::Pair { .. }))
}

// Line breaks inside a value would start a new `Key=Value` entry.
fn render_entries(entries: &[(String, String)]) -> String {
    let mut out = String::new();
    for (key, value) in entries {
        out.push_str(&single_line(key));
        out.push('=');
        out.push_str(&single_line(value));
        out.push('\n');
    }
    out
}

fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

fn parse_entries(content: &str) -> Vec<(String, String)> {
    content
        .trim_start_matches('\u{feff}')
        .lines()
        .filter_map(|line| {
            let line = line.trim_end_matches('\r');
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            (!key.is_empty()).then(|| (key.to_string(), value.to_string()))
        })
        .collect()
}
