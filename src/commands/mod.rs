//! Command handlers
//!
//! Each handler loads the config, builds the use case and renders its
//! result as text or NDJSON.

use std::path::Path;

use anyhow::Result;
use husk_submit::config::Config;

use crate::ui::context::UiContext;
use crate::ui::output::print_config_warnings;

pub mod inspect;
pub mod options;
pub mod render;
pub mod submit;

/// Discovered config plus a UI context built from it.
pub(crate) fn load_config(
    explicit: Option<&Path>,
    json: bool,
    verbose: u8,
    command: &str,
) -> Result<(Config, UiContext)> {
    let loaded = Config::discover(explicit)?;
    let ui = UiContext::new(json, verbose, &loaded.config);
    print_config_warnings(&ui, command, &loaded.warnings);
    if let Some(source) = &loaded.source {
        log::info!("config: {}", source.display());
    }
    Ok((loaded.config, ui))
}
