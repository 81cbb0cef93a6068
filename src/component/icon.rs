use ratatui::{
    style::{Color, Style},
    text::Span,
};
use strum::{Display, EnumString};

/// Glyph names understood by [`Icon`]
#[derive(Display, EnumString, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub(crate) enum IconName {
    Person,
    Checkmark,
    Eye,
    EyeOff,
    Mail,
    Lock,
}

impl IconName {
    fn glyph(self) -> &'static str {
        match self {
            IconName::Person => "☺",
            IconName::Checkmark => "✓",
            IconName::Eye => "◉",
            IconName::EyeOff => "◌",
            IconName::Mail => "✉",
            IconName::Lock => "▣",
        }
    }
}

/// A single-cell named glyph in a given color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Icon {
    name: IconName,
    color: Color,
}

impl Icon {
    pub fn new(name: IconName) -> Self {
        Self {
            name,
            color: Color::Reset,
        }
    }

    pub fn color(self, color: Color) -> Self {
        Self { color, ..self }
    }
}

impl From<Icon> for Span<'static> {
    fn from(icon: Icon) -> Self {
        Span::styled(icon.name.glyph(), Style::default().fg(icon.color))
    }
}
