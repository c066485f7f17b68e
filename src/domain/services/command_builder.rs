//! Command builder
//!
//! Turns option values into renderer arguments on the submit side, and a
//! plugin info file plus task frames into the renderer argv on the worker
//! side. Everything here is a pure function of its inputs.

use crate::domain::entities::{PluginInfo, RenderArg, RenderArgs};
use crate::domain::options::{
    OptionCategory, OptionDescriptor, OptionKind, OptionTarget, OptionValue, OptionValues,
};
use crate::domain::value_objects::FrameRange;
use crate::error::{HuskError, HuskResult};

/// Environment variable template for disabling one XPU device.
pub const GPU_DISABLE_VAR: &str = "KARMA_XPU_DISABLE_DEVICE_";

/// Renderer arguments and worker fields collected from the option catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionArgs {
    pub arguments: RenderArgs,
    pub log_level: u8,
}

impl SubmissionArgs {
    /// Walk the catalog in order and collect every enabled argument row.
    ///
    /// Rows behind an override toggle are emitted when the user set them or
    /// when their toggle starts enabled. Always-on rows fall back to their
    /// default; empty text and choice values are skipped.
    pub fn collect(catalog: &[OptionCategory], values: &OptionValues) -> HuskResult<Self> {
        let mut collected = SubmissionArgs::default();

        for row in catalog.iter().flat_map(|c| c.rows.iter()) {
            let value = values.get(row.name);
            if value.is_none() && !row.enabled_by_default() {
                continue;
            }

            match row.target {
                OptionTarget::Job(_) => {}
                OptionTarget::Plugin(_) => {
                    if let Some(level) = integer_value(row, value)? {
                        collected.log_level = u8::try_from(level).unwrap_or(u8::MAX);
                    }
                }
                OptionTarget::Argument => {
                    if let Some(arg) = argument(row, value)? {
                        collected.arguments.push(arg);
                        if let Some(implied) = row.implies {
                            collected.arguments.push(RenderArg::switch(implied));
                        }
                    }
                }
            }
        }

        Ok(collected)
    }
}

fn argument(row: &OptionDescriptor, value: Option<&OptionValue>) -> HuskResult<Option<RenderArg>> {
    let arg = match row.kind {
        OptionKind::Files => None,
        OptionKind::Text { default } => {
            let text = match value {
                Some(OptionValue::Text(text)) => text.trim(),
                Some(other) => return Err(type_mismatch(row, other)),
                None => default,
            };
            (!text.is_empty()).then(|| RenderArg::value(row.name, text))
        }
        OptionKind::Integer { .. } => {
            integer_value(row, value)?.map(|v| RenderArg::value(row.name, v.to_string()))
        }
        OptionKind::Pair {
            defaults, min, max, ..
        } => {
            let (a, b) = match value {
                Some(OptionValue::Pair(a, b)) => (*a, *b),
                Some(other) => return Err(type_mismatch(row, other)),
                None => (defaults[0], defaults[1]),
            };
            check_range(row.name, a, min, max)?;
            check_range(row.name, b, min, max)?;
            Some(RenderArg::pair(row.name, a.to_string(), b.to_string()))
        }
        OptionKind::Choice { default, choices } => {
            let choice = match value {
                Some(OptionValue::Text(text)) => text.trim(),
                Some(other) => return Err(type_mismatch(row, other)),
                None => default,
            };
            if choice.is_empty() {
                None
            } else if let Some(canonical) = choices.iter().find(|c| c.eq_ignore_ascii_case(choice))
            {
                Some(RenderArg::value(row.name, *canonical))
            } else {
                return Err(HuskError::InvalidChoice {
                    option: row.name.to_string(),
                    value: choice.to_string(),
                    choices: choices.join(", "),
                });
            }
        }
        OptionKind::Checkbox { .. } => match value {
            Some(OptionValue::Bool(true)) => Some(RenderArg::switch(row.name)),
            Some(OptionValue::Bool(false)) | None => None,
            Some(other) => return Err(type_mismatch(row, other)),
        },
    };
    Ok(arg)
}

fn integer_value(row: &OptionDescriptor, value: Option<&OptionValue>) -> HuskResult<Option<i64>> {
    let OptionKind::Integer { default, min, max } = row.kind else {
        return Ok(None);
    };
    let v = match value {
        Some(OptionValue::Integer(v)) => *v,
        Some(other) => return Err(type_mismatch(row, other)),
        None => default,
    };
    check_range(row.name, v, min, max)?;
    Ok(Some(v))
}

fn check_range(option: &str, value: i64, min: i64, max: i64) -> HuskResult<()> {
    if value < min || value > max {
        return Err(HuskError::OutOfRange {
            option: option.to_string(),
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn type_mismatch(row: &OptionDescriptor, value: &OptionValue) -> HuskError {
    HuskError::InvalidChoice {
        option: row.name.to_string(),
        value: format!("{:?}", value),
        choices: expected_kind(&row.kind).to_string(),
    }
}

fn expected_kind(kind: &OptionKind) -> &'static str {
    match kind {
        OptionKind::Files => "file list",
        OptionKind::Text { .. } => "text",
        OptionKind::Integer { .. } => "integer",
        OptionKind::Pair { .. } => "two integers",
        OptionKind::Choice { .. } => "text choice",
        OptionKind::Checkbox { .. } => "true or false",
    }
}

/// One worker task: a contiguous chunk of the job's frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTask {
    /// Scene path after path mapping
    pub scene_file: String,
    pub frames: FrameRange,
}

/// Renderer invocation for one task.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCommand<'a> {
    plugin: &'a PluginInfo,
}

impl<'a> RenderCommand<'a> {
    pub fn new(plugin: &'a PluginInfo) -> Self {
        Self { plugin }
    }

    /// `<scene> --verbose a<level> --frame <start> --frame-count <n>
    /// --make-output-path <arguments> <extra args> [--renderer <r>]`
    pub fn arguments(&self, task: &RenderTask) -> Vec<String> {
        let mut argv = vec![
            task.scene_file.replace('\\', "/"),
            "--verbose".to_string(),
            format!("a{}", self.plugin.log_level),
            "--frame".to_string(),
            task.frames.start().to_string(),
            "--frame-count".to_string(),
            task.frames.len().to_string(),
            "--make-output-path".to_string(),
        ];

        let mut renderer = None;
        for arg in self.plugin.arguments.iter() {
            if arg.flag == "--renderer" {
                renderer = Some(arg);
                continue;
            }
            argv.extend(arg.tokens());
        }

        argv.extend(self.plugin.extra_args.split_whitespace().map(str::to_string));

        if let Some(renderer) = renderer {
            argv.extend(renderer.tokens());
        }
        argv
    }
}

/// Environment variables that hide every device outside `selected`.
/// Empty when the worker has no GPU affinity.
pub fn gpu_affinity_env(selected: &[u32], max_gpus: u32) -> Vec<(String, String)> {
    if selected.is_empty() {
        return Vec::new();
    }
    (0..max_gpus)
        .filter(|gpu| !selected.contains(gpu))
        .map(|gpu| (format!("{}{}", GPU_DISABLE_VAR, gpu), "1".to_string()))
        .collect()
}

/// Default batch name for several scene files: the common prefix of their
/// paths reduced to a file name without extension.
///
/// `Scene_v005.FG.usd`, `Scene_v005.BG.usd` → `Scene_v005`
pub fn batch_name<S: AsRef<str>>(paths: &[S]) -> Option<String> {
    if paths.len() < 2 {
        return None;
    }

    let first = paths[0].as_ref();
    let mut prefix_len = first.len();
    for path in &paths[1..] {
        let common = first
            .char_indices()
            .zip(path.as_ref().chars())
            .find(|((_, a), b)| a != b)
            .map(|((i, _), _)| i)
            .unwrap_or_else(|| first.len().min(path.as_ref().len()));
        prefix_len = prefix_len.min(common);
    }
    let prefix = &first[..prefix_len];

    // Basename without its last extension.
    let base = prefix.rsplit(['/', '\\']).next().unwrap_or(prefix);
    let stem = match base.rfind('.') {
        Some(dot) if dot > 0 => &base[..dot],
        _ => base,
    };
    (!stem.is_empty()).then(|| stem.to_string())
}
