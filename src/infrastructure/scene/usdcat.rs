//! Scene Inspector backed by `usdcat`
//!
//! Two dumps per file: `--layerMetadata` for the frame range and default
//! settings prim, and a flattened dump masked to `/Render` for the render
//! prims. The text is handed to the extractor as is.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::domain::entities::SceneDescription;
use crate::domain::ports::SceneReader;
use crate::domain::services::extract_scene;
use crate::error::{HuskError, HuskResult};

/// Prim mask applied to the render dump.
pub const RENDER_MASK: &str = "/Render";

pub struct UsdcatSceneReader {
    usdcat: PathBuf,
}

impl UsdcatSceneReader {
    pub fn new(usdcat: impl Into<PathBuf>) -> Self {
        Self {
            usdcat: usdcat.into(),
        }
    }

    pub fn usdcat(&self) -> &Path {
        &self.usdcat
    }

    /// `usdcat --layerMetadata <file>`
    pub fn dump_metadata(&self, file: &Path) -> HuskResult<String> {
        self.dump(file, &["--layerMetadata"])
    }

    /// `usdcat --flatten --mask /Render <file>`
    pub fn dump_render_prims(&self, file: &Path) -> HuskResult<String> {
        self.dump(file, &["--flatten", "--mask", RENDER_MASK])
    }

    fn dump(&self, file: &Path, args: &[&str]) -> HuskResult<String> {
        log::debug!("{} {} {}", self.usdcat.display(), args.join(" "), file.display());

        let failed = |message: String| HuskError::DumpFailed {
            tool: "usdcat".to_string(),
            file: file.to_path_buf(),
            message,
        };

        let output = Command::new(&self.usdcat)
            .args(args)
            .arg(file)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| failed(format!("could not run {}: {}", self.usdcat.display(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("exited with {}", output.status),
                text => text.to_string(),
            };
            return Err(failed(message));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        log::trace!("usdcat returned {} bytes", text.len());
        Ok(text)
    }
}

impl SceneReader for UsdcatSceneReader {
    fn read_scene(&self, path: &Path) -> HuskResult<SceneDescription> {
        if !path.is_file() {
            return Err(HuskError::SceneFileNotFound {
                path: path.to_path_buf(),
            });
        }

        let metadata = self.dump_metadata(path)?;
        let render = self.dump_render_prims(path)?;
        Ok(extract_scene(&metadata, &render))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_scene_file_is_reported_before_running_usdcat() {
        let dir = tempdir().unwrap();
        let reader = UsdcatSceneReader::new(dir.path().join("usdcat"));
        let err = reader.read_scene(&dir.path().join("shot.usd")).unwrap_err();
        assert!(matches!(err, HuskError::SceneFileNotFound { .. }));
    }

    #[test]
    fn missing_usdcat_is_a_dump_failure() {
        let dir = tempdir().unwrap();
        let scene = dir.path().join("shot.usda");
        std::fs::write(&scene, "#usda 1.0\n").unwrap();

        let reader = UsdcatSceneReader::new(dir.path().join("no-such-usdcat"));
        let err = reader.read_scene(&scene).unwrap_err();
        assert!(matches!(err, HuskError::DumpFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn reads_scene_through_usdcat_script() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let scene = dir.path().join("shot.usda");
        std::fs::write(&scene, "#usda 1.0\n").unwrap();

        let script = dir.path().join("usdcat");
        std::fs::write(
            &script,
            "#!/bin/sh\n\
             if [ \"$1\" = \"--layerMetadata\" ]; then\n\
             printf '#usda 1.0\\n(\\n    endTimeCode = 12\\n    startTimeCode = 10\\n)\\n'\n\
             else\n\
             printf 'def Scope \"Render\"\\n{\\n    def RenderPass \"beauty\"\\n    {\\n    }\\n}\\n'\n\
             fi\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let scene = UsdcatSceneReader::new(&script).read_scene(&scene).unwrap();
        assert_eq!(scene.frame_range().unwrap().to_string(), "10-12");
        assert_eq!(scene.pass_paths(), vec!["/Render/beauty"]);
    }

    #[cfg(unix)]
    #[test]
    fn failing_usdcat_reports_stderr() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let scene = dir.path().join("shot.usda");
        std::fs::write(&scene, "").unwrap();

        let script = dir.path().join("usdcat");
        std::fs::write(&script, "#!/bin/sh\necho 'Failed to open layer' >&2\nexit 1\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let err = UsdcatSceneReader::new(&script).read_scene(&scene).unwrap_err();
        assert!(err.to_string().contains("Failed to open layer"));
    }
}
