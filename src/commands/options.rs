//! Options and install command handlers

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use husk_submit::application::{InstallUseCase, PluginFiles};
use husk_submit::infrastructure::DeadlineCommand;

use crate::ui::json::emit_event;
use crate::ui::json::events::DataEvent;
use crate::ui::views::install::{render_install, render_options_written};

#[derive(Serialize)]
struct WrittenFiles {
    directory: String,
    files: Vec<String>,
}

fn written(dir: &Path, files: &[std::path::PathBuf]) -> WrittenFiles {
    WrittenFiles {
        directory: dir.display().to_string(),
        files: files.iter().map(|f| f.display().to_string()).collect(),
    }
}

pub fn cmd_options(output_dir: &Path, config_path: Option<&Path>, json: bool, verbose: u8) -> Result<()> {
    let (config, ui) = super::load_config(config_path, json, verbose, "options")?;

    let files = PluginFiles::generate(&config)
        .write_to(output_dir)
        .with_context(|| format!("cannot write plugin files to {}", output_dir.display()))?;

    if ui.json {
        let _ = emit_event(&DataEvent::new("options", "written", written(output_dir, &files)));
    } else {
        print!("{}", render_options_written(output_dir, &files, ui.color, ui.unicode));
    }
    Ok(())
}

pub fn cmd_install(config_path: Option<&Path>, json: bool, verbose: u8) -> Result<()> {
    let (config, ui) = super::load_config(config_path, json, verbose, "install")?;

    let deadline = DeadlineCommand::new(&config.farm.deadlinecommand);
    let report = InstallUseCase::new(&config, &deadline).execute()?;

    if ui.json {
        let _ = emit_event(&DataEvent::new(
            "install",
            "written",
            written(&report.plugin_dir, &report.files),
        ));
    } else {
        print!("{}", render_install(&report, ui.color, ui.unicode));
    }
    Ok(())
}
