use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use husk_submit::domain::value_objects::FrameRange;

/// husk-submit - Submit USD scenes to a Deadline farm as husk render jobs
#[derive(Parser, Debug)]
#[command(name = "husk-submit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of the discovered ones
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit one job per USD file
    Submit(SubmitArgs),

    /// Show what a submission would render, without submitting
    Inspect {
        /// USD file to inspect
        file: PathBuf,

        /// Render pass prims, space or comma separated, wildcards allowed
        #[arg(long)]
        pass: Option<String>,

        /// Render settings prims used when passes have none
        #[arg(long)]
        settings: Option<String>,

        /// Replace every product's output path
        #[arg(long)]
        output: Option<String>,

        /// Frame range (START-END)
        #[arg(long)]
        frames: Option<FrameRange>,
    },

    /// Render one task on a worker (run by the farm plugin)
    Render {
        /// Plugin info file written at submission
        #[arg(long)]
        plugin_info: PathBuf,

        /// First frame of the task
        #[arg(long, allow_negative_numbers = true)]
        start: i64,

        /// Last frame of the task
        #[arg(long, allow_negative_numbers = true)]
        end: i64,

        /// GPUs assigned to this worker
        #[arg(long, value_delimiter = ',')]
        gpus: Vec<u32>,
    },

    /// Write the plugin .param, .options and entry script to a directory
    Options {
        /// Directory to write into
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Write the plugin files into the farm repository
    Install,
}

/// Flags of `husk-submit submit`, one per option row.
#[derive(Args, Debug, Default)]
pub struct SubmitArgs {
    /// USD files, one job each
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Frame range (START-END), overrides the scene's range
    #[arg(long)]
    pub frames: Option<FrameRange>,

    /// Frames per task
    #[arg(long)]
    pub chunk_size: Option<u32>,

    /// Batch name (derived from the file names when omitted)
    #[arg(long)]
    pub batch_name: Option<String>,

    #[arg(long, default_value = "")]
    pub comment: String,

    #[arg(long)]
    pub pool: Option<String>,

    #[arg(long)]
    pub group: Option<String>,

    #[arg(long)]
    pub priority: Option<u32>,

    /// Hydra delegate (BRAY_HdKarmaXPU or BRAY_HdKarma)
    #[arg(long)]
    pub renderer: Option<String>,

    #[arg(long)]
    pub pixel_samples: Option<i64>,

    /// Render pass prims, space or comma separated, wildcards allowed
    #[arg(long)]
    pub pass: Option<String>,

    /// Render settings prims used when passes have none
    #[arg(long)]
    pub settings: Option<String>,

    /// Replace every product's output path (frame tokens allowed)
    #[arg(long)]
    pub output: Option<String>,

    #[arg(long)]
    pub slap_comp: Option<String>,

    /// Auto tile count (X Y), implies --autotile
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    pub tile_count: Option<Vec<i64>>,

    /// Renderer log level (0-9)
    #[arg(long)]
    pub log_level: Option<i64>,

    /// Resolution override (X Y)
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    pub res: Option<Vec<i64>>,

    /// Resolution scale in percent
    #[arg(long)]
    pub res_scale: Option<i64>,

    #[arg(long)]
    pub camera: Option<String>,

    /// None, Distant or Dome
    #[arg(long)]
    pub headlight: Option<String>,

    #[arg(long)]
    pub disable_scene_materials: bool,

    #[arg(long)]
    pub disable_scene_lights: bool,

    #[arg(long)]
    pub disable_motionblur: bool,

    /// Extra renderer arguments, appended verbatim
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub extra_args: String,

    /// Houdini version substituted into the executable search list
    #[arg(long)]
    pub houdini_version: Option<String>,

    /// Build the jobs but do not send them to the farm
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}
