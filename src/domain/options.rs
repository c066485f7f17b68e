//! Option catalog
//!
//! The submitter's option rows as ordered data. Row order here is the order
//! renderer arguments are written to the plugin info file, and the order
//! entries appear in the generated plugin option files.

use std::collections::BTreeMap;

use crate::domain::value_objects::{MAX_FRAME, MIN_FRAME};

/// Where a row's value ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionTarget {
    /// A job info field (`ChunkSize`, `Frames`, ...)
    Job(&'static str),
    /// A plugin info field read by the worker (`LogLevel`)
    Plugin(&'static str),
    /// A renderer command line argument
    Argument,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Files,
    Text {
        default: &'static str,
    },
    Integer {
        default: i64,
        min: i64,
        max: i64,
    },
    Pair {
        labels: [&'static str; 2],
        defaults: [i64; 2],
        min: i64,
        max: i64,
    },
    Choice {
        default: &'static str,
        choices: &'static [&'static str],
    },
    Checkbox {
        caption: &'static str,
    },
}

/// One option row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: OptionKind,
    pub target: OptionTarget,
    /// `None`: always applied. `Some(enabled)`: behind an override toggle
    /// with the given initial state.
    pub overridable: Option<bool>,
    /// Extra switch emitted whenever this argument is emitted
    pub implies: Option<&'static str>,
    pub tooltip: &'static str,
}

impl OptionDescriptor {
    const fn new(
        name: &'static str,
        label: &'static str,
        kind: OptionKind,
        target: OptionTarget,
    ) -> Self {
        Self {
            name,
            label,
            kind,
            target,
            overridable: None,
            implies: None,
            tooltip: "",
        }
    }

    const fn overridable(mut self, enabled: bool) -> Self {
        self.overridable = Some(enabled);
        self
    }

    const fn implies(mut self, flag: &'static str) -> Self {
        self.implies = Some(flag);
        self
    }

    const fn tooltip(mut self, tooltip: &'static str) -> Self {
        self.tooltip = tooltip;
        self
    }

    /// Whether the row applies when the user did not set it.
    pub fn enabled_by_default(&self) -> bool {
        self.overridable.unwrap_or(true)
    }
}

/// A titled group of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionCategory {
    pub name: &'static str,
    pub collapsed: bool,
    pub rows: &'static [OptionDescriptor],
}

use OptionKind::*;
use OptionTarget::*;

static SUBMISSION: &[OptionDescriptor] = &[
    OptionDescriptor::new("SceneFiles", "USD File/s", Files, Job("Name")),
    OptionDescriptor::new("BatchName", "Batch Name", Text { default: "" }, Job("BatchName")),
    OptionDescriptor::new("Comment", "Comment", Text { default: "" }, Job("Comment")),
    OptionDescriptor::new(
        "ChunkSize",
        "Frames Per Task",
        Integer {
            default: 5,
            min: 1,
            max: 1000,
        },
        Job("ChunkSize"),
    ),
    OptionDescriptor::new(
        "Frames",
        "Frame Range",
        Pair {
            labels: ["Start", "End"],
            defaults: [1001, 1250],
            min: MIN_FRAME,
            max: MAX_FRAME,
        },
        Job("Frames"),
    )
    .overridable(false)
    .tooltip("Overrides the frame range stored in the USD file"),
];

static RENDERING: &[OptionDescriptor] = &[
    OptionDescriptor::new(
        "--renderer",
        "Renderer",
        Choice {
            default: "",
            choices: &["BRAY_HdKarmaXPU", "BRAY_HdKarma"],
        },
        Argument,
    ),
    OptionDescriptor::new(
        "--pixel-samples",
        "Pixel Samples",
        Integer {
            default: 128,
            min: 1,
            max: 65535,
        },
        Argument,
    )
    .overridable(false),
    OptionDescriptor::new("--pass", "Pass Prim/s", Text { default: "" }, Argument)
        .overridable(false)
        .tooltip("Render pass prims to render, wildcards allowed"),
    OptionDescriptor::new("--settings", "Settings Prim/s", Text { default: "" }, Argument)
        .overridable(false),
    OptionDescriptor::new("--output", "Output Path", Text { default: "" }, Argument)
        .overridable(false)
        .tooltip("Replaces every product's output path, frame tokens allowed"),
    OptionDescriptor::new("--slap-comp", "Slap Comp", Text { default: "" }, Argument)
        .overridable(false),
    OptionDescriptor::new(
        "--tile-count",
        "Auto Tile",
        Pair {
            labels: ["x", "y"],
            defaults: [4, 4],
            min: 1,
            max: 65535,
        },
        Argument,
    )
    .overridable(false)
    .implies("--autotile"),
    OptionDescriptor::new(
        "--verbose",
        "Logging Verbosity",
        Integer {
            default: 0,
            min: 0,
            max: 9,
        },
        Plugin("LogLevel"),
    )
    .overridable(false),
];

static RENDER_SETTINGS_OVERRIDES: &[OptionDescriptor] = &[
    OptionDescriptor::new(
        "--res",
        "Resolution",
        Pair {
            labels: ["x", "y"],
            defaults: [1920, 1080],
            min: 0,
            max: 65535,
        },
        Argument,
    )
    .overridable(false),
    OptionDescriptor::new(
        "--res-scale",
        "Resolution Scale",
        Integer {
            default: 100,
            min: 0,
            max: 5000,
        },
        Argument,
    )
    .overridable(false),
    OptionDescriptor::new("--camera", "Camera", Text { default: "" }, Argument).overridable(false),
];

static USD: &[OptionDescriptor] = &[
    OptionDescriptor::new(
        "--headlight",
        "Headlight",
        Choice {
            default: "None",
            choices: &["None", "Distant", "Dome"],
        },
        Argument,
    )
    .overridable(true),
    OptionDescriptor::new(
        "--disable-scene-materials",
        "",
        Checkbox {
            caption: "Disable Scene Materials",
        },
        Argument,
    ),
    OptionDescriptor::new(
        "--disable-scene-lights",
        "",
        Checkbox {
            caption: "Disable Scene Lights",
        },
        Argument,
    ),
    OptionDescriptor::new(
        "--disable-motionblur",
        "",
        Checkbox {
            caption: "Disable Motion Blur",
        },
        Argument,
    ),
];

static CATALOG: &[OptionCategory] = &[
    OptionCategory {
        name: "Submission",
        collapsed: false,
        rows: SUBMISSION,
    },
    OptionCategory {
        name: "Rendering",
        collapsed: true,
        rows: RENDERING,
    },
    OptionCategory {
        name: "RenderSettingsOverrides",
        collapsed: true,
        rows: RENDER_SETTINGS_OVERRIDES,
    },
    OptionCategory {
        name: "USD",
        collapsed: true,
        rows: USD,
    },
];

/// The built-in option catalog.
pub fn catalog() -> &'static [OptionCategory] {
    CATALOG
}

/// All rows in catalog order.
pub fn rows() -> impl Iterator<Item = &'static OptionDescriptor> {
    CATALOG.iter().flat_map(|c| c.rows.iter())
}

pub fn find(name: &str) -> Option<&'static OptionDescriptor> {
    rows().find(|d| d.name == name)
}

/// Integer default of a row, if it is an integer row.
pub fn integer_default(name: &str) -> Option<i64> {
    match find(name)?.kind {
        Integer { default, .. } => Some(default),
        _ => None,
    }
}

/// Pair default of a row, if it is a pair row.
pub fn pair_default(name: &str) -> Option<[i64; 2]> {
    match find(name)?.kind {
        Pair { defaults, .. } => Some(defaults),
        _ => None,
    }
}

/// A value the user set for a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Text(String),
    Integer(i64),
    Pair(i64, i64),
    Bool(bool),
}

/// User-set values keyed by row name.
pub type OptionValues = BTreeMap<String, OptionValue>;

/// Entries of the per-job plugin options file, before the catalog rows.
const PLUGIN_INFO_ENTRIES: &[(&str, &str, &str, &str)] = &[
    ("SceneFile", "filename", "Scene File", "The USD file to render"),
    ("Version", "string", "Houdini Version", "Replaces XX.X.XXX in the executable search list"),
    ("ExtraArgs", "string", "Extra Arguments", "Additional arguments passed to husk"),
];

/// Render the per-job `<Plugin>.options` file from the catalog.
pub fn render_options_file() -> String {
    let mut out = String::new();
    let mut index = 0;

    for (key, kind, label, description) in PLUGIN_INFO_ENTRIES {
        push_section(
            &mut out,
            key,
            &[
                ("Type", kind.to_string()),
                ("Label", label.to_string()),
                ("Category", "Scene".to_string()),
                ("CategoryOrder", "0".to_string()),
                ("Index", index.to_string()),
                ("Description", description.to_string()),
                ("Required", "false".to_string()),
                ("DisableIfBlank", "true".to_string()),
            ],
        );
        index += 1;
    }

    for (category_order, category) in CATALOG.iter().enumerate() {
        for row in category.rows {
            let key = match row.target {
                Job(_) => continue,
                Plugin(key) => key,
                Argument => row.name,
            };

            let label = if row.label.is_empty() {
                match row.kind {
                    Checkbox { caption } => caption,
                    _ => row.name,
                }
            } else {
                row.label
            };

            let mut fields = vec![
                ("Type", deadline_type(&row.kind).to_string()),
                ("Label", label.to_string()),
                ("Category", category.name.to_string()),
                ("CategoryOrder", category_order.to_string()),
                ("Index", index.to_string()),
                ("Description", description(row)),
                ("Required", "false".to_string()),
                ("DisableIfBlank", "true".to_string()),
            ];
            match row.kind {
                Integer { default, min, max } => {
                    fields.push(("Minimum", min.to_string()));
                    fields.push(("Maximum", max.to_string()));
                    fields.push(("Default", default.to_string()));
                }
                Pair { defaults, .. } => {
                    fields.push(("Default", format!("{} {}", defaults[0], defaults[1])));
                }
                Choice { default, choices } => {
                    fields.push(("Items", choices.join(";")));
                    fields.push(("Default", default.to_string()));
                }
                Checkbox { .. } => fields.push(("Default", "False".to_string())),
                Text { default } => fields.push(("Default", default.to_string())),
                Files => {}
            }

            push_section(&mut out, key, &fields);
            index += 1;
        }
    }

    out
}

/// Render the plugin configuration `<Plugin>.param` file.
pub fn render_param_file(executables: &[String], max_gpus: u32, worker_command: &str) -> String {
    let mut out = String::new();
    push_section(
        &mut out,
        "USD_RenderExecutable",
        &[
            ("Type", "multilinemultifilename".to_string()),
            ("Label", "Husk Executable".to_string()),
            ("Category", "Render Executables".to_string()),
            ("CategoryOrder", "0".to_string()),
            ("Index", "0".to_string()),
            ("Default", executables.join(";")),
            (
                "Description",
                "Paths to husk, XX.X.XXX is replaced by the job's Houdini version".to_string(),
            ),
        ],
    );
    push_section(
        &mut out,
        "HuskSubmit_Executable",
        &[
            ("Type", "multilinemultifilename".to_string()),
            ("Label", "husk-submit Executable".to_string()),
            ("Category", "Render Executables".to_string()),
            ("CategoryOrder", "0".to_string()),
            ("Index", "1".to_string()),
            ("Default", worker_command.to_string()),
            (
                "Description",
                "husk-submit binary that runs each task with its render command".to_string(),
            ),
        ],
    );
    push_section(
        &mut out,
        "MaxGpuDevices",
        &[
            ("Type", "integer".to_string()),
            ("Label", "GPU Devices Per Worker".to_string()),
            ("Category", "GPU Affinity".to_string()),
            ("CategoryOrder", "1".to_string()),
            ("Index", "0".to_string()),
            ("Minimum", "1".to_string()),
            ("Maximum", "16".to_string()),
            ("Default", max_gpus.to_string()),
            (
                "Description",
                "Devices outside the worker's GPU affinity are disabled".to_string(),
            ),
        ],
    );
    out
}

fn deadline_type(kind: &OptionKind) -> &'static str {
    match kind {
        Files => "multifilename",
        Text { .. } | Pair { .. } => "string",
        Integer { .. } => "integer",
        Choice { .. } => "enum",
        Checkbox { .. } => "boolean",
    }
}

fn description(row: &OptionDescriptor) -> String {
    if !row.tooltip.is_empty() {
        return row.tooltip.to_string();
    }
    match row.target {
        Plugin(_) => format!("Passed to husk as {}", row.name),
        _ => format!("husk {}", row.name),
    }
}

fn push_section(out: &mut String, key: &str, fields: &[(&str, String)]) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&format!("[{}]\n", key));
    for (name, value) in fields {
        out.push_str(&format!("{}={}\n", name, value));
    }
}
