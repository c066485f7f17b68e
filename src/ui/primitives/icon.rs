use crossterm::style::Stylize;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Arrow,
    Submit,
    Inspect,
    Render,
    Install,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        match (supports_unicode, self) {
            (true, Icon::Success) => theme::icons::SUCCESS,
            (true, Icon::Error) => theme::icons::ERROR,
            (true, Icon::Warning) => theme::icons::WARNING,
            (true, Icon::Arrow) => theme::icons::ARROW,
            (true, Icon::Submit) => theme::icons::SUBMIT,
            (true, Icon::Inspect) => theme::icons::INSPECT,
            (true, Icon::Render) => theme::icons::RENDER,
            (true, Icon::Install) => theme::icons::INSTALL,
            (false, Icon::Success) => theme::icons_ascii::SUCCESS,
            (false, Icon::Error) => theme::icons_ascii::ERROR,
            (false, Icon::Warning) => theme::icons_ascii::WARNING,
            (false, Icon::Arrow) => theme::icons_ascii::ARROW,
            (false, Icon::Submit) => theme::icons_ascii::SUBMIT,
            (false, Icon::Inspect) => theme::icons_ascii::INSPECT,
            (false, Icon::Render) => theme::icons_ascii::RENDER,
            (false, Icon::Install) => theme::icons_ascii::INSTALL,
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => theme::colors::SUCCESS,
            Icon::Error => theme::colors::ERROR,
            Icon::Warning => theme::colors::WARNING,
            Icon::Arrow => theme::colors::DIM,
            Icon::Submit | Icon::Inspect | Icon::Render | Icon::Install => theme::colors::INFO,
        };
        format!("{}", s.with(color))
    }
}
