use crossterm::style::Color;

/// Design tokens for husk-submit output.
///
/// Only the semantic colors below are used; icons come from `icons` or
/// `icons_ascii` depending on terminal support.
pub mod colors {
    use super::Color;

    pub const SUCCESS: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const WARNING: Color = Color::Yellow;
    pub const INFO: Color = Color::Cyan;
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const ARROW: &str = "↳";

    // Command identifiers (used in headers).
    pub const SUBMIT: &str = "⇪";
    pub const INSPECT: &str = "🔍";
    pub const RENDER: &str = "▶";
    pub const INSTALL: &str = "📦";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const ARROW: &str = "->";

    pub const SUBMIT: &str = "[SUBMIT]";
    pub const INSPECT: &str = "[INSPECT]";
    pub const RENDER: &str = "[RENDER]";
    pub const INSTALL: &str = "[INSTALL]";
}
