//! Plugin files
//!
//! `<Plugin>.param` and `<Plugin>.options` are generated from the option
//! catalog and the renderer config, so the farm's job properties always
//! list the same rows the submitter accepts. `<Plugin>.py` is the entry
//! point the farm loads: it hands every task to `husk-submit render`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::domain::options::{render_options_file, render_param_file};
use crate::error::HuskResult;

/// Plugin entry point. Each task copies the job's plugin info into the job
/// data directory and runs `husk-submit render` on it; husk is located from
/// the `USD_RenderExecutable` list.
const PLUGIN_SCRIPT: &str = r#"from Deadline.Plugins import DeadlinePlugin
from Deadline.Scripting import FileUtils, RepositoryUtils

import os

PLUGIN_INFO_KEYS = ["SceneFile", "Version", "LogLevel", "ExtraArgs", "ArgumentList"]


def GetDeadlinePlugin():
    return HuskSubmitPlugin()


def CleanupDeadlinePlugin(plugin):
    plugin.Cleanup()


class HuskSubmitPlugin(DeadlinePlugin):
    def __init__(self):
        super().__init__()
        self.InitializeProcessCallback += self.InitializeProcess
        self.RenderExecutableCallback += self.RenderExecutable
        self.RenderArgumentCallback += self.RenderArgument

    def Cleanup(self):
        del self.InitializeProcessCallback
        del self.RenderExecutableCallback
        del self.RenderArgumentCallback

    def InitializeProcess(self):
        self.SingleFramesOnly = False
        self.StdoutHandling = True
        self.PopupHandling = False
        self.AddStdoutHandlerCallback(r"USD ERROR(.*)").HandleCallback += self.HandleError
        self.AddStdoutHandlerCallback(r"Progress: ([0-9]+)%").HandleCallback += self.HandleProgress

    def RenderExecutable(self):
        self.SetProcessEnvironmentVariable(
            "HUSK_SUBMIT_EXECUTABLES", self.GetConfigEntry("USD_RenderExecutable")
        )
        return FileUtils.SearchFileList(self.GetConfigEntry("HuskSubmit_Executable"))

    def RenderArgument(self):
        flags = self.GetPluginInfoEntryWithDefault("ArgumentList", "").split(";")
        keys = PLUGIN_INFO_KEYS + [f.strip() for f in flags if f.strip()]
        plugin_info = os.path.join(self.GetJobsDataDirectory(), "render_plugin_info.job")
        with open(plugin_info, "w", encoding="utf-8") as f:
            for key in keys:
                value = self.GetPluginInfoEntryWithDefault(key, "")
                if key == "SceneFile":
                    value = RepositoryUtils.CheckPathMapping(value)
                f.write("{}={}
".format(key, value))

        args = [
            "render",
            '--plugin-info "{}"'.format(plugin_info),
            "--start {}".format(self.GetStartFrame()),
            "--end {}".format(self.GetEndFrame()),
        ]
        if self.OverrideGpuAffinity():
            gpus = ",".join(str(gpu) for gpu in self.GpuAffinity())
            if gpus:
                args.append("--gpus {}".format(gpus))
        return " ".join(args)

    def HandleProgress(self):
        self.SetProgress(float(self.GetRegexMatch(1)))

    def HandleError(self):
        self.FailRender(self.GetRegexMatch(0))
"#;

/// Generated contents of every plugin file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginFiles {
    pub plugin: String,
    pub param: String,
    pub options: String,
    pub script: String,
}

impl PluginFiles {
    pub fn generate(config: &Config) -> Self {
        Self {
            plugin: config.farm.plugin.clone(),
            param: render_param_file(
                &config.renderer.executables,
                config.renderer.max_gpus,
                &config.farm.worker_command,
            ),
            options: render_options_file(),
            script: PLUGIN_SCRIPT.to_string(),
        }
    }

    pub fn param_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.param", self.plugin))
    }

    pub fn options_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.options", self.plugin))
    }

    pub fn script_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.py", self.plugin))
    }

    /// Write every plugin file into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> HuskResult<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;

        let written = vec![
            (self.param_path(dir), &self.param),
            (self.options_path(dir), &self.options),
            (self.script_path(dir), &self.script),
        ];
        for (path, content) in &written {
            fs::write(path, content)?;
            log::info!("wrote {}", path.display());
        }
        Ok(written.into_iter().map(|(path, _)| path).collect())
    }
}
