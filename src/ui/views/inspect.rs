use husk_submit::application::InspectReport;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::{paint, strong, SemanticColor};

fn section(out: &mut String, title: &str, supports_color: bool) {
    out.push_str(&format!("\n{}\n", strong(title, SemanticColor::Info, supports_color)));
}

pub fn render_inspect(report: &InspectReport, supports_color: bool, supports_unicode: bool) -> String {
    let mut header = CommandHeader::new(Icon::Inspect, report.file.display().to_string());
    match report.resolution.frames {
        Some(frames) => header.add("Frames", frames.to_string()),
        None => header.add("Frames", "none"),
    }
    if let Some(settings) = report.scene.default_settings_path() {
        header.add("Default settings", settings);
    }
    let mut out = header.render(supports_color, supports_unicode);

    if !report.scene.metadata.is_empty() {
        section(&mut out, "Layer metadata", supports_color);
        for (key, value) in report.scene.metadata.iter() {
            out.push_str(&format!("  {} = {}\n", key, value));
        }
    }

    let resolution = &report.resolution;

    section(&mut out, "Passes", supports_color);
    if resolution.passes.is_empty() {
        out.push_str(&format!("  {}\n", paint("(none)", SemanticColor::Dim, supports_color)));
    }
    for pass in &resolution.passes {
        let source = pass.render_source.as_deref().unwrap_or("-");
        out.push_str(&format!("  {} {} {}\n", pass.path, Icon::Arrow.render(supports_unicode), source));
    }

    section(&mut out, "Settings", supports_color);
    for settings in &resolution.settings {
        let mut line = format!("  {}", settings.path);
        if let Some(camera) = &settings.camera {
            line.push_str(&format!(" camera={}", camera));
        }
        if let Some((w, h)) = settings.resolution {
            line.push_str(&format!(" res={}x{}", w, h));
        }
        out.push_str(&line);
        out.push('\n');
    }

    section(&mut out, "Outputs", supports_color);
    for output in &resolution.product_outputs {
        out.push_str(&format!(
            "  {} {}\n",
            paint(&output.product, SemanticColor::Dim, supports_color),
            output.template.raw()
        ));
    }

    if !resolution.warnings.is_empty() {
        out.push('\n');
        for warning in &resolution.warnings {
            out.push_str(&format!(
                "{} {}\n",
                Icon::Warning.colored(supports_color, supports_unicode),
                warning
            ));
        }
    }

    out
}
