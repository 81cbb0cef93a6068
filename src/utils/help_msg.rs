use std::ops::Deref;

use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

use super::key_events::KeyEvent;

#[derive(Debug, Clone)]
enum HelpKeyEvent {
    Key(KeyEvent),
    Plain(String),
}

/// One key binding with its description, shown as `desc: key`
#[derive(Debug, Clone)]
pub(crate) struct HelpEntry {
    key: HelpKeyEvent,
    desc: String,
}

impl HelpEntry {
    pub(crate) fn new<T: Into<String>, K: Into<KeyEvent>>(event: K, desc: T) -> Self {
        Self {
            key: HelpKeyEvent::Key(event.into()),
            desc: desc.into(),
        }
    }

    /// For bindings that are not a single key, e.g. `j/k`
    pub(crate) fn new_plain<T: Into<String>>(event: T, desc: T) -> Self {
        Self {
            key: HelpKeyEvent::Plain(event.into()),
            desc: desc.into(),
        }
    }

    pub(crate) fn key(&self) -> String {
        match &self.key {
            HelpKeyEvent::Key(key) => key.to_string(),
            HelpKeyEvent::Plain(key) => key.clone(),
        }
    }

    pub(crate) fn desc(&self) -> &str {
        &self.desc
    }
}

impl std::fmt::Display for HelpEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.desc(), self.key())
    }
}

#[derive(Default, Clone, Debug)]
pub(crate) struct HelpMsg {
    slices: Vec<HelpEntry>,
}

impl From<Vec<HelpEntry>> for HelpMsg {
    fn from(slices: Vec<HelpEntry>) -> Self {
        Self { slices }
    }
}

impl HelpMsg {
    pub(crate) fn extend(&mut self, other: &HelpMsg) {
        self.slices.extend(other.slices.iter().cloned());
    }

    pub(crate) fn push(&mut self, entry: HelpEntry) {
        self.slices.push(entry);
    }

    /// Render as a single bordered bar
    pub(crate) fn render(&self, frame: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let paragraph = Paragraph::new(self.to_string()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .padding(Padding::horizontal(1)),
        );
        frame.render_widget(paragraph, area);
    }
}

impl Deref for HelpMsg {
    type Target = Vec<HelpEntry>;

    fn deref(&self) -> &Self::Target {
        &self.slices
    }
}

impl std::fmt::Display for HelpMsg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .slices
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<String>>()
            .join(" | ");
        f.write_str(&joined)
    }
}

impl From<HelpMsg> for String {
    fn from(val: HelpMsg) -> Self {
        val.to_string()
    }
}
