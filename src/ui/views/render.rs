use husk_submit::application::RenderPlan;
use husk_submit::domain::value_objects::FrameRange;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::{paint, SemanticColor};

pub fn render_task_header(
    frames: &FrameRange,
    plan: &RenderPlan,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Render, format!("Rendering frames {}", frames));
    header.add("Renderer", plan.executable.display().to_string());
    for (key, value) in &plan.env {
        header.add("Env", format!("{}={}", key, value));
    }
    let mut out = header.render(supports_color, supports_unicode);
    out.push_str(&paint(
        &format!("{} {}", plan.executable.display(), plan.argv.join(" ")),
        SemanticColor::Dim,
        supports_color,
    ));
    out.push('\n');
    out
}

/// Progress in the form the farm's stdout handler scans for.
pub fn render_progress(percent: u8) -> String {
    format!("Progress: {}%", percent)
}

pub fn render_task_done(frames: &FrameRange, supports_color: bool, supports_unicode: bool) -> String {
    format!(
        "{} Frames {} rendered",
        Icon::Success.colored(supports_color, supports_unicode),
        frames
    )
}
