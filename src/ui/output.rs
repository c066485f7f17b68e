use husk_submit::config::ConfigWarning;

use crate::ui::context::UiContext;
use crate::ui::json::{emit_event, events::WarningEvent};
use crate::ui::primitives::icon::Icon;

pub fn config_warning_message(w: &ConfigWarning) -> String {
    let location = match w.line {
        Some(line) => format!("{}:{}", w.file.display(), line),
        None => w.file.display().to_string(),
    };
    match &w.suggestion {
        Some(suggestion) => format!(
            "Unknown config key '{}' in {} (did you mean '{}'?)",
            w.key, location, suggestion
        ),
        None => format!("Unknown config key '{}' in {}", w.key, location),
    }
}

pub fn print_config_warnings(ui: &UiContext, command: &str, warnings: &[ConfigWarning]) {
    for w in warnings {
        let message = config_warning_message(w);
        if ui.json {
            let _ = emit_event(
                &WarningEvent::new(command, message).in_file(w.file.display().to_string()),
            );
        } else {
            eprintln!("{} {}", Icon::Warning.colored(ui.color, ui.unicode), message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn warning_message_includes_line_and_suggestion() {
        let w = ConfigWarning {
            key: "poool".to_string(),
            file: PathBuf::from("husk-submit.toml"),
            line: Some(2),
            suggestion: Some("pool".to_string()),
        };
        assert_eq!(
            config_warning_message(&w),
            "Unknown config key 'poool' in husk-submit.toml:2 (did you mean 'pool'?)"
        );
    }
}
