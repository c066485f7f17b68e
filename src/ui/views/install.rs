use std::path::{Path, PathBuf};

use husk_submit::application::InstallReport;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;

fn written_lines(out: &mut String, files: &[PathBuf], supports_color: bool, supports_unicode: bool) {
    for file in files {
        out.push_str(&format!(
            "  {} {}\n",
            Icon::Success.colored(supports_color, supports_unicode),
            file.display()
        ));
    }
}

pub fn render_install(report: &InstallReport, supports_color: bool, supports_unicode: bool) -> String {
    let mut header = CommandHeader::new(Icon::Install, "Plugin files installed");
    header.add("Repository", report.repository.display().to_string());
    header.add("Plugin", report.plugin_dir.display().to_string());
    let mut out = header.render(supports_color, supports_unicode);
    written_lines(&mut out, &report.files, supports_color, supports_unicode);
    out
}

pub fn render_options_written(
    dir: &Path,
    files: &[PathBuf],
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Install, "Plugin files generated");
    header.add("Directory", dir.display().to_string());
    let mut out = header.render(supports_color, supports_unicode);
    written_lines(&mut out, files, supports_color, supports_unicode);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_lists_each_file() {
        let report = InstallReport {
            repository: PathBuf::from("/mnt/deadline"),
            plugin_dir: PathBuf::from("/mnt/deadline/custom/plugins/HuskStandalone"),
            files: vec![
                PathBuf::from("/mnt/deadline/custom/plugins/HuskStandalone/HuskStandalone.param"),
                PathBuf::from("/mnt/deadline/custom/plugins/HuskStandalone/HuskStandalone.options"),
            ],
        };

        let text = render_install(&report, false, false);
        assert!(text.starts_with("[INSTALL] Plugin files installed\nRepository: /mnt/deadline\n"));
        assert_eq!(text.matches("[OK]").count(), 2);
    }
}
