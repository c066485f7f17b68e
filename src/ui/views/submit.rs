use husk_submit::application::{SubmissionOutcome, SubmitReport, SubmitStatus};

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::{paint, strong, SemanticColor};

pub fn render_submit_header(
    files: usize,
    batch_name: Option<&str>,
    dry_run: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let noun = if files == 1 { "file" } else { "files" };
    let mut header = CommandHeader::new(Icon::Submit, format!("Submitting {} {}", files, noun));
    if let Some(batch) = batch_name {
        header.add("Batch", batch);
    }
    if dry_run {
        header.add("Mode", "dry run, nothing is sent to the farm");
    }
    header.render(supports_color, supports_unicode)
}

/// One line per file, with warnings and (when verbose or dry) the job files.
pub fn render_outcome(
    outcome: &SubmissionOutcome,
    show_output: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let icon = match outcome.status {
        SubmitStatus::Accepted => Icon::Success,
        SubmitStatus::Rejected | SubmitStatus::Failed => Icon::Error,
    };

    let mut line = format!(
        "{} {}",
        icon.colored(supports_color, supports_unicode),
        outcome.job_name
    );
    if let Some(frames) = outcome.frames {
        line.push_str(&format!(" {}", paint(&frames.to_string(), SemanticColor::Dim, supports_color)));
    }
    if let Some(id) = &outcome.job_id {
        line.push_str(&format!(" {}", paint(&format!("({})", id), SemanticColor::Dim, supports_color)));
    }
    let mut out = line;
    out.push('\n');

    for warning in &outcome.warnings {
        out.push_str(&format!(
            "  {} {}\n",
            Icon::Warning.colored(supports_color, supports_unicode),
            warning
        ));
    }
    for output in &outcome.output_filenames {
        out.push_str(&format!(
            "  {} {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            output
        ));
    }

    if outcome.status != SubmitStatus::Accepted || show_output {
        for text in outcome.output.lines().filter(|l| !l.trim().is_empty()) {
            out.push_str(&format!("    {}\n", paint(text, SemanticColor::Dim, supports_color)));
        }
    }
    out
}

pub fn render_submit_summary(
    report: &SubmitReport,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let accepted = report.accepted().count();
    let failed = report.outcomes.len() - accepted;

    let (icon, title) = if failed == 0 {
        (
            Icon::Success,
            strong(&format!("{} submitted", accepted), SemanticColor::Success, supports_color),
        )
    } else {
        (
            Icon::Warning,
            strong(
                &format!("{} submitted, {} failed", accepted, failed),
                SemanticColor::Warning,
                supports_color,
            ),
        )
    };

    format!(
        "\n{} {}\n\n{}\n",
        icon.colored(supports_color, supports_unicode),
        title,
        report.message()
    )
}
