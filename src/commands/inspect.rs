//! Inspect command handler

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use husk_submit::application::{InspectReport, InspectUseCase};
use husk_submit::domain::services::ResolveRequest;
use husk_submit::domain::value_objects::{FrameRange, PrimPattern};
use husk_submit::infrastructure::{locate_usdcat, UsdcatSceneReader};

use crate::ui::json::emit_event;
use crate::ui::json::events::DataEvent;
use crate::ui::views::inspect::render_inspect;

/// JSON shape of an inspection.
#[derive(Serialize)]
struct InspectData<'a> {
    file: String,
    frames: Option<String>,
    passes: Vec<&'a str>,
    settings: Vec<&'a str>,
    products: Vec<&'a str>,
    outputs: Vec<String>,
    warnings: &'a [String],
}

impl<'a> InspectData<'a> {
    fn from_report(report: &'a InspectReport) -> Self {
        let resolution = &report.resolution;
        Self {
            file: report.file.display().to_string(),
            frames: resolution.frames.map(|f| f.to_string()),
            passes: resolution.passes.iter().map(|p| p.path.as_str()).collect(),
            settings: resolution.settings.iter().map(|s| s.path.as_str()).collect(),
            products: resolution.products.iter().map(|p| p.path.as_str()).collect(),
            outputs: resolution
                .product_outputs
                .iter()
                .map(|o| o.template.to_printf())
                .collect(),
            warnings: &resolution.warnings,
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_inspect(
    file: &Path,
    pass: Option<&str>,
    settings: Option<&str>,
    output: Option<&str>,
    frames: Option<FrameRange>,
    config_path: Option<&Path>,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let (config, ui) = super::load_config(config_path, json, verbose, "inspect")?;

    let usdcat = locate_usdcat(&config.renderer, config.renderer.version.as_deref())
        .context("cannot read scenes without usdcat")?;
    let reader = UsdcatSceneReader::new(usdcat);

    let request = ResolveRequest {
        passes: pass.map(PrimPattern::parse_list).unwrap_or_default(),
        settings: settings.map(PrimPattern::parse_list).unwrap_or_default(),
        output: output.map(str::to_string),
        frames,
    };

    let report = InspectUseCase::new(&config, &reader).execute(file, request)?;

    if ui.json {
        let _ = emit_event(&DataEvent::new(
            "inspect",
            "scene",
            InspectData::from_report(&report),
        ));
    } else {
        print!("{}", render_inspect(&report, ui.color, ui.unicode));
    }
    Ok(())
}
