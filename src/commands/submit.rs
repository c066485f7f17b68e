//! Submit command handler

use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;

use husk_submit::application::{SubmitOptions, SubmitUseCase};
use husk_submit::domain::options::{OptionValue, OptionValues};
use husk_submit::domain::ports::JobSubmitter;
use husk_submit::infrastructure::{locate_usdcat, DeadlineCommand, PreviewSubmitter, UsdcatSceneReader};

use crate::cli::SubmitArgs;
use crate::ui::json::emit_event;
use crate::ui::json::events::{CompleteEvent, DataEvent, StartEvent};
use crate::ui::views::submit::{render_outcome, render_submit_header, render_submit_summary};

/// Catalog values for the flags the user actually passed.
pub(crate) fn option_values(args: &SubmitArgs) -> OptionValues {
    let mut values = OptionValues::new();
    let mut text = |row: &str, value: &Option<String>| {
        if let Some(value) = value {
            values.insert(row.to_string(), OptionValue::Text(value.clone()));
        }
    };
    text("--renderer", &args.renderer);
    text("--pass", &args.pass);
    text("--settings", &args.settings);
    text("--output", &args.output);
    text("--slap-comp", &args.slap_comp);
    text("--camera", &args.camera);
    text("--headlight", &args.headlight);

    let integers = [
        ("--pixel-samples", args.pixel_samples),
        ("--verbose", args.log_level),
        ("--res-scale", args.res_scale),
    ];
    for (row, value) in integers {
        if let Some(value) = value {
            values.insert(row.to_string(), OptionValue::Integer(value));
        }
    }

    for (row, pair) in [("--tile-count", &args.tile_count), ("--res", &args.res)] {
        if let Some([a, b]) = pair.as_deref() {
            values.insert(row.to_string(), OptionValue::Pair(*a, *b));
        }
    }

    let switches = [
        ("--disable-scene-materials", args.disable_scene_materials),
        ("--disable-scene-lights", args.disable_scene_lights),
        ("--disable-motionblur", args.disable_motionblur),
    ];
    for (row, on) in switches {
        if on {
            values.insert(row.to_string(), OptionValue::Bool(true));
        }
    }

    values
}

pub fn cmd_submit(args: SubmitArgs, config_path: Option<&Path>, json: bool, verbose: u8) -> Result<()> {
    let started = Instant::now();
    let (config, ui) = super::load_config(config_path, json, verbose, "submit")?;

    let version = args
        .houdini_version
        .clone()
        .or_else(|| config.renderer.version.clone());
    let usdcat = locate_usdcat(&config.renderer, version.as_deref())
        .context("cannot read scenes without usdcat")?;
    let reader = UsdcatSceneReader::new(usdcat);

    if ui.json {
        let _ = emit_event(&StartEvent::new("submit"));
    } else {
        print!(
            "{}",
            render_submit_header(
                args.files.len(),
                args.batch_name.as_deref(),
                args.dry_run,
                ui.color,
                ui.unicode
            )
        );
    }

    if args.files.len() > 1 && !args.dry_run && !args.yes && ui.interactive() {
        let proceed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Submit {} jobs?", args.files.len()))
            .default(true)
            .interact()?;
        if !proceed {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    let options = SubmitOptions {
        files: args.files.clone(),
        frames: args.frames,
        chunk_size: args.chunk_size,
        batch_name: args.batch_name.clone(),
        comment: args.comment.clone(),
        pool: args.pool.clone(),
        group: args.group.clone(),
        priority: args.priority,
        values: option_values(&args),
        extra_args: args.extra_args.clone(),
        version,
    };

    let preview = PreviewSubmitter::new();
    let deadline = DeadlineCommand::new(&config.farm.deadlinecommand);
    let submitter: &dyn JobSubmitter = if args.dry_run { &preview } else { &deadline };

    let use_case = SubmitUseCase::new(&config, &reader, submitter);
    let show_output = args.dry_run || ui.verbose > 0;
    let report = use_case.execute_with_callback(&options, |outcome| {
        if ui.json {
            let _ = emit_event(&DataEvent::new("submit", "job", outcome));
        } else {
            print!("{}", render_outcome(outcome, show_output, ui.color, ui.unicode));
        }
    })?;

    if ui.json {
        let _ = emit_event(
            &CompleteEvent::new("submit", report.is_success())
                .with_duration(started.elapsed().as_millis() as u64),
        );
    } else {
        print!("{}", render_submit_summary(&report, ui.color, ui.unicode));
    }

    if !report.is_success() {
        bail!(
            "{} of {} submissions failed",
            report.failed().count(),
            report.outcomes.len()
        );
    }
    Ok(())
}
