//! Common test utilities for husk-submit CLI tests.
//!
//! `TestEnv` is an isolated project directory and config home, with fake
//! `usdcat` and `deadlinecommand` scripts standing in for the real tools.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

pub const LAYER_METADATA: &str = include_str!("../fixtures/layer_metadata.usda");
pub const RENDER_DUMP: &str = include_str!("../fixtures/render_dump.usda");

/// Result of running a husk-submit CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

pub struct TestEnv {
    pub project_root: TempDir,
    pub config_home: TempDir,
    pub tools: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let env = Self {
            project_root: TempDir::new().expect("Failed to create project dir"),
            config_home: TempDir::new().expect("Failed to create config home"),
            tools: TempDir::new().expect("Failed to create tools dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_husk-submit")),
        };
        env.install_usdcat(LAYER_METADATA, RENDER_DUMP);
        env
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn tool_path(&self, name: &str) -> PathBuf {
        self.tools.path().join(name)
    }

    pub fn write_project_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.project_path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// A scene file; the fake usdcat ignores its content.
    pub fn write_scene(&self, relative: &str) -> PathBuf {
        self.write_project_file(relative, "#usda 1.0\n")
    }

    fn write_script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.tool_path(name);
        fs::write(&path, format!("#!/bin/sh\n{}", body)).expect("Failed to write script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod script");
        path
    }

    /// usdcat that prints the given dumps.
    pub fn install_usdcat(&self, metadata: &str, render: &str) {
        fs::write(self.tool_path("metadata.usda"), metadata).expect("Failed to write dump");
        fs::write(self.tool_path("render.usda"), render).expect("Failed to write dump");
        self.write_script(
            "usdcat",
            &format!(
                "if [ \"$1\" = \"--layerMetadata\" ]; then cat '{}'; else cat '{}'; fi\n",
                self.tool_path("metadata.usda").display(),
                self.tool_path("render.usda").display()
            ),
        );
    }

    /// deadlinecommand that accepts every job, keeps the job files it was
    /// given under `submitted/`, and reports `repository` as the repository.
    pub fn install_deadlinecommand(&self) -> PathBuf {
        let submitted = self.tool_path("submitted");
        fs::create_dir_all(&submitted).expect("Failed to create submitted dir");
        let repository = self.tool_path("repository");
        fs::create_dir_all(&repository).expect("Failed to create repository dir");
        self.write_script(
            "deadlinecommand",
            &format!(
                "if [ \"$1\" = \"-GetRepositoryPath\" ]; then echo '{repo}'; exit 0; fi\n\
                 n=$(ls '{dir}' | wc -l)\n\
                 cp \"$1\" '{dir}'/job_$n.job\n\
                 cp \"$2\" '{dir}'/plugin_$n.job\n\
                 echo 'Result=Success'\n\
                 echo \"JobID=job$n\"\n",
                repo = repository.display(),
                dir = submitted.display()
            ),
        )
    }

    pub fn submitted_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = fs::read_dir(self.tool_path("submitted"))
            .map(|entries| entries.filter_map(|e| e.ok()).map(|e| e.path()).collect())
            .unwrap_or_default();
        files.sort();
        files
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("XDG_CONFIG_HOME", self.config_home.path())
            .env("HUSK_SUBMIT_USDCAT", self.tool_path("usdcat"))
            .env("HUSK_SUBMIT_DEADLINECOMMAND", self.tool_path("deadlinecommand"))
            .env("CI", "true")
            .env_remove("RUST_LOG")
            .env_remove("HUSK_SUBMIT_EXECUTABLES")
            .env_remove("HUSK_SUBMIT_CHUNK_SIZE");
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute husk-submit");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}
