//! Install Use Case
//!
//! Writes the generated plugin files, entry point included, into the farm
//! repository at `<repository>/custom/plugins/<Plugin>/`.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::HuskResult;
use crate::infrastructure::DeadlineCommand;

use super::options::PluginFiles;

/// Result of the install operation
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub repository: PathBuf,
    pub plugin_dir: PathBuf,
    pub files: Vec<PathBuf>,
}

pub struct InstallUseCase<'a> {
    config: &'a Config,
    deadline: &'a DeadlineCommand,
}

impl<'a> InstallUseCase<'a> {
    pub fn new(config: &'a Config, deadline: &'a DeadlineCommand) -> Self {
        Self { config, deadline }
    }

    pub fn execute(&self) -> HuskResult<InstallReport> {
        let repository = self.deadline.repository_path()?;
        log::debug!("repository at {}", repository.display());

        let files = PluginFiles::generate(self.config);
        let plugin_dir = repository
            .join("custom")
            .join("plugins")
            .join(&files.plugin);
        let written = files.write_to(&plugin_dir)?;

        Ok(InstallReport {
            repository,
            plugin_dir,
            files: written,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use tempfile::tempdir;

    fn fake_deadlinecommand(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("deadlinecommand");
        fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn installs_into_custom_plugins() {
        let dir = tempdir().unwrap();
        let repository = dir.path().join("DeadlineRepository10");
        fs::create_dir_all(&repository).unwrap();
        let program = fake_deadlinecommand(
            dir.path(),
            &format!("echo '{}'\n", repository.display()),
        );

        let config = Config::default();
        let deadline = DeadlineCommand::new(program);
        let report = InstallUseCase::new(&config, &deadline).execute().unwrap();

        let plugin_dir = repository.join("custom/plugins/HuskStandalone");
        assert_eq!(report.repository, repository);
        assert_eq!(report.plugin_dir, plugin_dir);
        assert!(plugin_dir.join("HuskStandalone.param").is_file());
        assert!(plugin_dir.join("HuskStandalone.options").is_file());
        assert_eq!(report.files.len(), 3);
        let script = fs::read_to_string(plugin_dir.join("HuskStandalone.py")).unwrap();
        assert!(script.contains("GetDeadlinePlugin"));
    }

    #[test]
    fn failing_deadlinecommand_writes_nothing() {
        let dir = tempdir().unwrap();
        let program = fake_deadlinecommand(dir.path(), "echo 'no repository' >&2\nexit 1\n");

        let config = Config::default();
        let deadline = DeadlineCommand::new(program);
        let err = InstallUseCase::new(&config, &deadline).execute().unwrap_err();
        assert!(err.to_string().contains("no repository"));
    }
}
