//! Render command handler
//!
//! Runs on the worker. Progress goes to stdout as `Progress: n%` so the farm
//! plugin can pick it up; renderer output is echoed line by line.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use husk_submit::application::{RenderOptions, RenderUseCase};
use husk_submit::domain::value_objects::FrameRange;
use husk_submit::infrastructure::RenderEvent;

use crate::ui::json::emit_event;
use crate::ui::json::events::{CompleteEvent, DataEvent, ProgressEvent};
use crate::ui::views::render::{render_progress, render_task_done, render_task_header};

#[derive(Serialize)]
struct RenderLine {
    line: String,
}

pub fn cmd_render(
    plugin_info: PathBuf,
    start: i64,
    end: i64,
    gpus: Vec<u32>,
    config_path: Option<&Path>,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let (config, ui) = super::load_config(config_path, json, verbose, "render")?;

    let options = RenderOptions {
        plugin_info,
        frames: FrameRange::new(start, end)?,
        gpus,
    };
    let use_case = RenderUseCase::new(&config);

    let plan = use_case.plan(&options)?;
    if !ui.json {
        print!(
            "{}",
            render_task_header(&options.frames, &plan, ui.color, ui.unicode)
        );
    }

    use_case.execute(&options, |event| match event {
        RenderEvent::Progress(percent) => {
            if ui.json {
                let _ = emit_event(&ProgressEvent::new("render", percent));
            } else {
                println!("{}", render_progress(percent));
            }
        }
        RenderEvent::Line(line) => {
            if ui.json {
                let _ = emit_event(&DataEvent::new("render", "output", RenderLine { line }));
            } else {
                println!("{}", line);
            }
        }
    })?;

    if ui.json {
        let _ = emit_event(&CompleteEvent::new("render", true));
    } else {
        println!("{}", render_task_done(&options.frames, ui.color, ui.unicode));
    }
    Ok(())
}
