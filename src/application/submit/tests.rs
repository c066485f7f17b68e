use super::*;
use crate::domain::entities::SceneDescription;
use crate::domain::ports::SubmitReceipt;
use crate::domain::services::{extract_prims, extract_scene};
use crate::infrastructure::PreviewSubmitter;

const METADATA_DUMP: &str = include_str!("../../../tests/fixtures/layer_metadata.usda");
const RENDER_DUMP: &str = include_str!("../../../tests/fixtures/render_dump.usda");

/// Serves the fixture scene for every path except a few reserved names.
struct FixtureReader;

impl SceneReader for FixtureReader {
    fn read_scene(&self, path: &Path) -> HuskResult<SceneDescription> {
        match path.file_name().and_then(|n| n.to_str()) {
            Some("missing.usd") => Err(HuskError::SceneFileNotFound {
                path: path.to_path_buf(),
            }),
            Some("broken.usd") => Err(HuskError::DumpFailed {
                tool: "usdcat".to_string(),
                file: path.to_path_buf(),
                message: "Failed to open layer".to_string(),
            }),
            Some("static.usd") => Ok(SceneDescription::new(
                Default::default(),
                extract_prims(RENDER_DUMP),
            )),
            _ => Ok(extract_scene(METADATA_DUMP, RENDER_DUMP)),
        }
    }
}

struct RejectingSubmitter;

impl JobSubmitter for RejectingSubmitter {
    fn submit(&self, _job: &JobDescription) -> HuskResult<SubmitReceipt> {
        Ok(SubmitReceipt::from_output(
            "Error: plugin HuskStandalone not found\n\n  on this repository\n",
        ))
    }
}

fn options(files: &[&str]) -> SubmitOptions {
    SubmitOptions {
        files: files.iter().map(PathBuf::from).collect(),
        ..Default::default()
    }
}

#[test]
fn single_file_uses_scene_frames_and_default_settings() {
    let config = Config::default();
    let preview = PreviewSubmitter::new();
    let report = SubmitUseCase::new(&config, &FixtureReader, &preview)
        .execute(&options(&["shots/sh010_v005.usd"]))
        .unwrap();

    assert!(report.is_success());
    assert_eq!(report.batch_name, None);

    let jobs = preview.jobs();
    assert_eq!(jobs.len(), 1);
    let job = &jobs[0].job;
    assert_eq!(job.name, "sh010_v005.usd");
    assert_eq!(job.frames.to_string(), "1001-1010");
    assert_eq!(job.chunk_size, 5);
    assert_eq!(
        job.output_filenames,
        vec!["/renders/sh010/beauty/sh010_beauty.%04d.exr"]
    );

    let plugin = &jobs[0].plugin;
    assert!(plugin.scene_file.ends_with("sh010_v005.usd"));
    assert!(Path::new(&plugin.scene_file).is_absolute());
    assert_eq!(plugin.arguments.tokens(), vec!["--headlight", "None"]);
}

#[test]
fn explicit_frames_and_farm_fields_win_over_config() {
    let mut config = Config::default();
    config.farm.pool = Some("cpu".to_string());
    config.farm.group = Some("karma".to_string());
    config.submission.frames = Some(FrameRange::new(1, 2).unwrap());

    let preview = PreviewSubmitter::new();
    let mut opts = options(&["sh010.usd"]);
    opts.frames = Some(FrameRange::new(1001, 1100).unwrap());
    opts.pool = Some("gpu".to_string());
    opts.chunk_size = Some(10);
    opts.priority = Some(80);

    SubmitUseCase::new(&config, &FixtureReader, &preview)
        .execute(&opts)
        .unwrap();

    let job = &preview.jobs()[0].job;
    assert_eq!(job.frames.to_string(), "1001-1100");
    assert_eq!(job.pool.as_deref(), Some("gpu"));
    assert_eq!(job.group.as_deref(), Some("karma"));
    assert_eq!(job.chunk_size, 10);
    assert_eq!(job.priority, Some(80));
}

#[test]
fn config_frames_fill_in_for_scenes_without_metadata() {
    let mut config = Config::default();
    config.submission.frames = Some(FrameRange::new(1, 24).unwrap());

    let preview = PreviewSubmitter::new();
    SubmitUseCase::new(&config, &FixtureReader, &preview)
        .execute(&options(&["static.usd"]))
        .unwrap();

    assert_eq!(preview.jobs()[0].job.frames.to_string(), "1-24");
}

#[test]
fn scene_frames_win_over_config_frames() {
    let mut config = Config::default();
    config.submission.frames = Some(FrameRange::new(1, 24).unwrap());

    let preview = PreviewSubmitter::new();
    SubmitUseCase::new(&config, &FixtureReader, &preview)
        .execute(&options(&["sh010.usd"]))
        .unwrap();

    assert_eq!(preview.jobs()[0].job.frames.to_string(), "1001-1010");
}

#[test]
fn scene_without_frames_uses_default_range_and_warns() {
    let config = Config::default();
    let preview = PreviewSubmitter::new();
    let report = SubmitUseCase::new(&config, &FixtureReader, &preview)
        .execute(&options(&["static.usd"]))
        .unwrap();

    let outcome = &report.outcomes[0];
    assert_eq!(outcome.status, SubmitStatus::Accepted);
    assert_eq!(outcome.frames.map(|f| f.to_string()).as_deref(), Some("1001-1250"));
    assert!(
        outcome.warnings[0].contains("No frame range in static.usd"),
        "{:?}",
        outcome.warnings
    );
    assert_eq!(preview.jobs()[0].job.frames.to_string(), "1001-1250");
}

#[test]
fn unreadable_files_fail_without_stopping_the_batch() {
    let config = Config::default();
    let preview = PreviewSubmitter::new();
    let mut seen = Vec::new();

    let report = SubmitUseCase::new(&config, &FixtureReader, &preview)
        .execute_with_callback(
            &options(&["missing.usd", "broken.usd", "sh020.usd"]),
            |outcome| seen.push(outcome.job_name.clone()),
        )
        .unwrap();

    assert_eq!(seen, vec!["missing.usd", "broken.usd", "sh020.usd"]);
    assert!(!report.is_success());
    assert_eq!(report.accepted().count(), 1);
    assert_eq!(report.outcomes[0].status, SubmitStatus::Failed);
    assert!(report.outcomes[1].output.contains("Failed to open layer"));
    assert_eq!(preview.jobs().len(), 1);
}

#[test]
fn invalid_choice_stops_before_anything_is_queued() {
    let config = Config::default();
    let preview = PreviewSubmitter::new();
    let mut opts = options(&["a.usd", "b.usd"]);
    opts.values.insert(
        "--headlight".to_string(),
        OptionValue::Text("Spot".to_string()),
    );

    let err = SubmitUseCase::new(&config, &FixtureReader, &preview)
        .execute(&opts)
        .unwrap_err();

    assert!(matches!(err, HuskError::InvalidChoice { .. }));
    assert!(preview.jobs().is_empty());
}

#[test]
fn several_files_share_a_derived_batch_name() {
    let config = Config::default();
    let preview = PreviewSubmitter::new();
    let report = SubmitUseCase::new(&config, &FixtureReader, &preview)
        .execute(&options(&["shots/Scene_v005.FG.usd", "shots/Scene_v005.BG.usd"]))
        .unwrap();

    assert_eq!(report.batch_name.as_deref(), Some("Scene_v005"));
    assert!(preview
        .jobs()
        .iter()
        .all(|j| j.job.batch_name.as_deref() == Some("Scene_v005")));
}

#[test]
fn pass_and_output_rows_drive_resolution() {
    let config = Config::default();
    let preview = PreviewSubmitter::new();
    let mut opts = options(&["sh010.usd"]);
    opts.values
        .insert("--pass".to_string(), OptionValue::Text("fg".to_string()));

    let report = SubmitUseCase::new(&config, &FixtureReader, &preview)
        .execute(&opts)
        .unwrap();

    let job = &preview.jobs()[0];
    assert_eq!(
        job.job.output_filenames,
        vec!["/renders/sh010/fg/fg_beauty.%04d.exr"]
    );
    assert_eq!(
        job.plugin.arguments.get("--pass"),
        Some(&crate::domain::entities::ArgValue::Value("fg".to_string()))
    );
    assert!(report.outcomes[0]
        .warnings
        .iter()
        .any(|w| w.contains("fg_utility")));

    opts.values.insert(
        "--output".to_string(),
        OptionValue::Text("/tmp/comp.$F4.exr".to_string()),
    );
    SubmitUseCase::new(&config, &FixtureReader, &preview)
        .execute(&opts)
        .unwrap();
    assert_eq!(preview.jobs()[1].job.output_filenames, vec!["/tmp/comp.%04d.exr"]);
}

#[test]
fn rejected_jobs_are_reported_with_their_output() {
    let config = Config::default();
    let report = SubmitUseCase::new(&config, &FixtureReader, &RejectingSubmitter)
        .execute(&options(&["sh010.usd"]))
        .unwrap();

    assert_eq!(report.outcomes[0].status, SubmitStatus::Rejected);
    assert_eq!(
        report.message(),
        "-!!|   Failed Submissions   |!!-\nsh010.usd\n\tError: plugin HuskStandalone not found\n\t  on this repository"
    );
}

#[test]
fn results_message_lists_successes_before_failures() {
    let config = Config::default();
    let preview = PreviewSubmitter::new();
    let report = SubmitUseCase::new(&config, &FixtureReader, &preview)
        .execute(&options(&["sh010.usd", "missing.usd", "sh020.usd"]))
        .unwrap();

    let message = report.message();
    assert!(message.starts_with("---| Successful Submissions |---\nsh010.usd\nsh020.usd\n\n"));
    assert!(message.contains("-!!|   Failed Submissions   |!!-\nmissing.usd\n\tUSD file doesn't exist: missing.usd"));
}
