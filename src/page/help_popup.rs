use std::cmp::{max, min};

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style, palette::tailwind},
    text::{Line, Text},
    widgets::{Block, BorderType, Borders, Clear, HighlightSpacing, List, ListItem, Padding},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    actions::{Action, ActionSender, LayerManageAction},
    app::layer_manager::EventHandlingStatus,
    tui::Event,
    utils::help_msg::{HelpEntry, HelpMsg},
};

use super::{EventLoopParticipant, Layer, WidgetExt};

/// Popup listing the key bindings of the layer below it
pub(crate) struct HelpPopup {
    help_msg: HelpMsg,

    longest_entry_size: u16,
    list_state: ratatui::widgets::ListState,

    tx: ActionSender,
}

impl HelpPopup {
    /// Returns `None` when there is nothing to show
    pub fn new(tx: ActionSender, msg: HelpMsg) -> Option<Self> {
        let longest = msg
            .iter()
            .map(|entry| UnicodeWidthStr::width(entry.to_string().as_str()))
            .max()?;

        Some(Self {
            help_msg: msg,
            longest_entry_size: longest as u16,
            list_state: ratatui::widgets::ListState::default(),
            tx,
        })
    }

    pub fn get_self_help_msg() -> HelpMsg {
        vec![
            HelpEntry::new('j', "Go Down"),
            HelpEntry::new('k', "Go Up"),
            HelpEntry::new('g', "Go to Top"),
            HelpEntry::new('G', "Go to Bottom"),
            HelpEntry::new(KeyCode::Esc, "Close help"),
        ]
        .into()
    }

    fn render_list(&mut self, frame: &mut Frame, area: Rect) {
        let selected_row_style = Style::default()
            .add_modifier(Modifier::REVERSED)
            .fg(tailwind::INDIGO.c400);

        let block = Block::new()
            .title(Line::raw("Help").centered())
            .border_type(BorderType::Rounded)
            .borders(Borders::ALL)
            .padding(Padding::new(1, 1, 1, 1));

        let items: Vec<ListItem> = self
            .help_msg
            .iter()
            .map(|entry| ListItem::from(Text::raw(format!("  {}  ", entry))))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(selected_row_style)
            .highlight_spacing(HighlightSpacing::Always);

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

#[derive(Clone, Debug)]
pub enum HelpPopupAction {
    Up,
    Down,
    Start,
    End,
}
impl From<HelpPopupAction> for Action {
    fn from(value: HelpPopupAction) -> Self {
        Action::HelpPopup(value)
    }
}

impl EventLoopParticipant for HelpPopup {
    fn handle_events(&mut self, event: &Event) -> EventHandlingStatus {
        let Event::Key(key) = event else {
            return EventHandlingStatus::ShouldPropagate;
        };
        match key.code {
            KeyCode::Esc => self.tx.send(LayerManageAction::Pop),
            KeyCode::Char('j') | KeyCode::Down => self.tx.send(HelpPopupAction::Down),
            KeyCode::Char('k') | KeyCode::Up => self.tx.send(HelpPopupAction::Up),
            KeyCode::Char('g') => self.tx.send(HelpPopupAction::Start),
            KeyCode::Char('G') => self.tx.send(HelpPopupAction::End),
            _ => return EventHandlingStatus::ShouldPropagate,
        }
        EventHandlingStatus::Consumed
    }

    fn update(&mut self, action: Action) {
        let Action::HelpPopup(action) = action else {
            return;
        };
        match action {
            HelpPopupAction::Up => self.list_state.select_previous(),
            HelpPopupAction::Down => self.list_state.select_next(),
            HelpPopupAction::Start => self.list_state.select_first(),
            HelpPopupAction::End => self.list_state.select_last(),
        }
    }
}

impl Layer for HelpPopup {}

impl WidgetExt for HelpPopup {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = min(
            max(self.longest_entry_size + 8, min(50, area.width.saturating_sub(4))),
            area.width,
        );
        let show_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + area.height / 6,
            width,
            height: area.height * 2 / 3,
        };
        let bottom_help_area = Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(3),
            width: area.width,
            height: min(3, area.height),
        };

        frame.render_widget(Clear, bottom_help_area);
        HelpPopup::get_self_help_msg().render(frame, bottom_help_area);

        frame.render_widget(Clear, show_area);
        self.render_list(frame, show_area);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;

    use super::*;

    fn entries() -> HelpMsg {
        vec![
            HelpEntry::new('a', "test"),
            HelpEntry::new('b', "test2"),
            HelpEntry::new('c', "test3"),
        ]
        .into()
    }

    #[test]
    fn test_help_popup_new() {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let help_popup =
            HelpPopup::new(tx.into(), vec![HelpEntry::new('a', "test")].into()).unwrap();
        assert_eq!(help_popup.help_msg.len(), 1);
        assert_eq!(help_popup.longest_entry_size, 7);
        assert_eq!(help_popup.list_state.selected(), None);

        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        assert!(HelpPopup::new(tx.into(), HelpMsg::default()).is_none());
    }

    #[test]
    fn test_navigation() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut help_popup = HelpPopup::new(tx.into(), entries()).unwrap();
        let mut terminal = Terminal::new(ratatui::backend::TestBackend::new(80, 25)).unwrap();

        let mut test_loop = |key: char, expected: Option<usize>| {
            help_popup.event_loop_once(&mut rx, key.into());
            terminal
                .draw(|f| {
                    let area = f.area();
                    help_popup.render(f, area);
                })
                .unwrap();
            assert_eq!(help_popup.list_state.selected(), expected);
        };

        test_loop('j', Some(0));
        test_loop('k', Some(0));
        test_loop('G', Some(2));
        test_loop('k', Some(1));
        test_loop('j', Some(2));
        test_loop('g', Some(0));
    }

    #[test]
    fn test_esc_pops_layer() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut help_popup = HelpPopup::new(tx.into(), entries()).unwrap();
        help_popup.handle_event_with_status_check(&KeyCode::Esc.into());
        assert!(matches!(
            rx.try_recv(),
            Ok(Action::Layer(LayerManageAction::Pop))
        ));
        assert!(matches!(
            help_popup.handle_events(&'x'.into()),
            EventHandlingStatus::ShouldPropagate
        ));
    }

    #[test]
    fn test_help_popup_render() {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let mut help_popup = HelpPopup::new(tx.into(), entries()).unwrap();
        let mut terminal = Terminal::new(ratatui::backend::TestBackend::new(80, 25)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                help_popup.render(f, area);
            })
            .unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(screen.contains("Help"));
        assert!(screen.contains("test2: b"));
        assert!(screen.contains("Close help: esc"));
    }
}
