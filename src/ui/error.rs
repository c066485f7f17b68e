use husk_submit::HuskError;

use crate::ui::json::{emit_event, events::ErrorEvent};
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::{paint, strong, SemanticColor};
use crate::ui::terminal::detect_capabilities;

/// A suggestion for errors the user can fix from the command line.
pub fn hint(err: &HuskError) -> Option<String> {
    let text = match err {
        HuskError::ExecutableNotFound { .. } => {
            "List husk under [renderer] executables, or set HUSK_SUBMIT_EXECUTABLES. \
             Pass --houdini-version if the paths contain XX.X.XXX."
        }
        HuskError::UsdcatNotFound { .. } => {
            "Set [renderer] usdcat or HUSK_SUBMIT_USDCAT to the usdcat binary."
        }
        HuskError::InvalidFrameRange { .. } => "Frame ranges are written START-END, e.g. 1001-1100.",
        HuskError::InvalidChoice { .. } | HuskError::OutOfRange { .. } => {
            "Run 'husk-submit submit --help' for accepted values."
        }
        HuskError::FarmCommand { .. } => {
            "Make sure deadlinecommand is on PATH, or set [farm] deadlinecommand."
        }
        HuskError::MissingPluginInfo { .. } => {
            "The plugin info file must come from 'husk-submit submit'."
        }
        _ => return None,
    };
    Some(text.to_string())
}

pub fn format_error(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    let mut out = format!(
        "{} {}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        strong(&err.to_string(), SemanticColor::Error, supports_color)
    );

    for cause in err.chain().skip(1) {
        out.push_str(&format!("  {}\n", paint(&cause.to_string(), SemanticColor::Dim, supports_color)));
    }

    if let Some(fix) = err.downcast_ref::<HuskError>().and_then(hint) {
        out.push_str(&format!(
            "{} {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            fix
        ));
    }
    out
}

pub fn print_error(err: &anyhow::Error, command: &str, json: bool) {
    if json {
        let event = ErrorEvent::new(command, err.to_string())
            .with_help(err.downcast_ref::<HuskError>().and_then(hint));
        let _ = emit_event(&event);
        return;
    }

    let caps = detect_capabilities();
    eprint!(
        "{}",
        format_error(err, caps.supports_color && !caps.is_ci, caps.supports_unicode)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn plain_error_has_icon_message_and_hint() {
        let err = anyhow::Error::new(HuskError::InvalidFrameRange {
            value: "10-1".to_string(),
            reason: "End Frame must be higher than Start Frame".to_string(),
        });
        assert_eq!(
            format_error(&err, false, false),
            "[FAIL] invalid frame range '10-1': End Frame must be higher than Start Frame\n\
             -> Frame ranges are written START-END, e.g. 1001-1100.\n"
        );
    }

    #[test]
    fn context_is_listed_under_the_message() {
        let err = anyhow::Error::new(HuskError::UsdcatNotFound {
            path: PathBuf::from("/opt/hfs/bin/usdcat"),
        })
        .context("cannot inspect scenes");

        let text = format_error(&err, false, false);
        assert!(text.starts_with("[FAIL] cannot inspect scenes\n  usdcat binary not found"));
        assert!(text.contains("-> Set [renderer] usdcat"));
    }
}
