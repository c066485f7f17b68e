//! Tests for the config module

use super::types::*;
use super::{apply_env, LoadedConfig};
use crate::domain::value_objects::FrameRange;
use std::collections::HashMap;
use std::fs;
use tempfile::tempdir;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.farm.plugin, "HuskStandalone");
    assert_eq!(config.farm.worker_command, "husk-submit");
    assert_eq!(config.farm.deadlinecommand, "deadlinecommand");
    assert_eq!(config.submission.chunk_size, 5);
    assert_eq!(config.submission.default_settings, "/Render/rendersettings");
    assert_eq!(config.renderer.max_gpus, 4);
    assert!(config
        .renderer
        .executables
        .iter()
        .all(|e| e.contains(VERSION_PLACEHOLDER)));
    assert!(config.path_mapping.is_empty());
}

#[test]
fn test_config_parse_toml() {
    let toml = r#"
[renderer]
executables = ["/opt/hfsXX.X.XXX/bin/husk"]
version = "20.5.410"
max_gpus = 2

[farm]
pool = "karma"
priority = 60
worker_command = "/opt/husk-submit/husk-submit"

[submission]
chunk_size = 10
frames = "1001-1100"

[[path_mapping]]
from = "P:/projects"
to = "/mnt/projects"

[output]
color = "never"
"#;

    let config: Config = toml::from_str(toml).unwrap();

    assert_eq!(config.renderer.executables, vec!["/opt/hfsXX.X.XXX/bin/husk"]);
    assert_eq!(config.renderer.version.as_deref(), Some("20.5.410"));
    assert_eq!(config.renderer.max_gpus, 2);
    assert_eq!(config.farm.pool.as_deref(), Some("karma"));
    assert_eq!(config.farm.priority, Some(60));
    assert_eq!(config.farm.plugin, "HuskStandalone");
    assert_eq!(config.farm.worker_command, "/opt/husk-submit/husk-submit");
    assert_eq!(config.submission.chunk_size, 10);
    assert_eq!(
        config.submission.frames,
        Some(FrameRange::new(1001, 1100).unwrap())
    );
    assert_eq!(
        config.path_mapping().apply("P:\\projects\\sh010.usd"),
        "/mnt/projects/sh010.usd"
    );
    assert_eq!(config.output.color, ColorMode::Never);
    assert!(config.output.unicode);
}

#[test]
fn test_config_rejects_reversed_frames() {
    let err = toml::from_str::<Config>("[submission]\nframes = \"1100-1001\"\n").unwrap_err();
    assert!(err.to_string().contains("End Frame must be higher than Start Frame"));
}

#[test]
fn test_load_with_warnings_reports_unknown_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("husk-submit.toml");
    fs::write(&path, "[farm]\npoool = \"karma\"\n\n[render]\nversion = \"20.5\"\n").unwrap();

    let (config, warnings) = Config::load_with_warnings(&path).unwrap();
    assert_eq!(config.farm.pool, None);

    let poool = warnings.iter().find(|w| w.key == "poool").unwrap();
    assert_eq!(poool.line, Some(2));
    assert_eq!(poool.suggestion.as_deref(), Some("pool"));
    assert_eq!(poool.file, path);

    let render = warnings.iter().find(|w| w.key == "render").unwrap();
    assert_eq!(render.suggestion.as_deref(), Some("renderer"));
}

#[test]
fn test_load_invalid_toml_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[farm\npool = ").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, crate::error::HuskError::InvalidConfig { .. }));
}

#[test]
fn test_discover_explicit_missing_file_errors() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(Config::discover(Some(&missing)).is_err());
}

#[test]
fn test_discover_explicit_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("farm.toml");
    fs::write(&path, "[farm]\ngroup = \"gpu\"\n").unwrap();

    let LoadedConfig {
        config,
        warnings,
        source,
    } = Config::discover(Some(&path)).unwrap();
    assert_eq!(config.farm.group.as_deref(), Some("gpu"));
    assert!(warnings.is_empty());
    assert_eq!(source.as_deref(), Some(path.as_path()));
}

#[test]
fn test_env_overrides() {
    let config = apply_env(
        Config::default(),
        env(&[
            ("HUSK_SUBMIT_USDCAT", "/opt/hfs/bin/usdcat"),
            ("HUSK_SUBMIT_DEADLINECOMMAND", "/opt/Thinkbox/bin/deadlinecommand"),
            ("HUSK_SUBMIT_EXECUTABLES", "/a/husk; ;/b/husk"),
            ("HUSK_SUBMIT_CHUNK_SIZE", "12"),
        ]),
    );

    assert_eq!(
        config.renderer.usdcat.as_deref(),
        Some(std::path::Path::new("/opt/hfs/bin/usdcat"))
    );
    assert_eq!(config.farm.deadlinecommand, "/opt/Thinkbox/bin/deadlinecommand");
    assert_eq!(config.renderer.executables, vec!["/a/husk", "/b/husk"]);
    assert_eq!(config.submission.chunk_size, 12);
}

#[test]
fn test_env_overrides_ignore_bad_values() {
    let config = apply_env(
        Config::default(),
        env(&[
            ("HUSK_SUBMIT_CHUNK_SIZE", "zero"),
            ("HUSK_SUBMIT_EXECUTABLES", ";;"),
            ("HUSK_SUBMIT_USDCAT", "  "),
        ]),
    );
    assert_eq!(config, Config::default());
}
