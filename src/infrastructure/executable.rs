//! Executable Locator
//!
//! Finds husk from a candidate list with the `XX.X.XXX` version placeholder,
//! and the usdcat binary installed next to it.

use std::path::{Path, PathBuf};

use crate::config::{RendererConfig, VERSION_PLACEHOLDER};
use crate::error::{HuskError, HuskResult};

/// Replace the version placeholder in every candidate. Without a version
/// the candidates are returned unchanged.
pub fn substitute_version(candidates: &[String], version: Option<&str>) -> Vec<String> {
    let version = version.map(str::trim).filter(|v| !v.is_empty());
    candidates
        .iter()
        .map(|c| match version {
            Some(v) => c.replace(VERSION_PLACEHOLDER, v),
            None => c.clone(),
        })
        .collect()
}

/// First candidate that exists as a file.
pub fn search_file_list(candidates: &[String]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|c| PathBuf::from(c.trim()))
        .find(|p| !p.as_os_str().is_empty() && p.is_file())
}

/// Locate husk for a Houdini version.
pub fn locate_renderer(config: &RendererConfig, version: Option<&str>) -> HuskResult<PathBuf> {
    let version = version.or(config.version.as_deref());
    let candidates = substitute_version(&config.executables, version);
    log::debug!("searching for husk in {:?}", candidates);

    search_file_list(&candidates).ok_or_else(|| HuskError::ExecutableNotFound {
        searched: candidates.join(";"),
    })
}

/// The usdcat binary shipped next to `husk`.
pub fn usdcat_for(husk: &Path) -> PathBuf {
    let name = if husk.extension().is_some_and(|e| e.eq_ignore_ascii_case("exe")) {
        "usdcat.exe"
    } else {
        "usdcat"
    };
    husk.with_file_name(name)
}

/// Locate usdcat: an explicit path wins, otherwise it is derived from husk.
pub fn locate_usdcat(config: &RendererConfig, version: Option<&str>) -> HuskResult<PathBuf> {
    let usdcat = match &config.usdcat {
        Some(path) => path.clone(),
        None => usdcat_for(&locate_renderer(config, version)?),
    };
    if !usdcat.is_file() {
        return Err(HuskError::UsdcatNotFound { path: usdcat });
    }
    Ok(usdcat)
}
