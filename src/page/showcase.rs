use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect, Size},
    style::{Color, Modifier, Style},
    text::Line,
};
use tracing::{debug, info};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::{
    actions::{Action, ActionSender, LayerManageAction, LayerPushTarget, Layers},
    app::layer_manager::EventHandlingStatus,
    component::{
        Component,
        field_style::Variant,
        icon::{Icon, IconName},
        text_field::{FieldProps, FocusState, TextField, ValueMode},
        validation::ValidationRule,
    },
    theme::{self, ColorRole, ColorScheme},
    tui::Event,
    utils::help_msg::{HelpEntry, HelpMsg},
};

use super::{EventLoopParticipant, Layer, WidgetExt};

const HEADER_HEIGHT: u16 = 4;
/// Columns left of every field, holding the focus marker
const GUTTER: u16 = 2;
const FIELD_GAP: u16 = 1;
const SECTION_PADDING: u16 = 1;

struct Section {
    title: &'static str,
    type_hint: &'static str,
    fields: Vec<TextField>,
}

impl Section {
    fn new(title: &'static str, type_hint: &'static str, fields: Vec<TextField>) -> Self {
        Self {
            title,
            type_hint,
            fields,
        }
    }
}

/// Vertical placement of the scrollable content
struct ContentLayout {
    sections: Vec<u16>,
    /// `(y, height)` of every field, in focus order
    fields: Vec<(u16, u16)>,
    height: u16,
}

/// Demonstration screen: one section per text field prop
pub(crate) struct Showcase {
    tx: ActionSender,
    scheme: ColorScheme,
    sections: Vec<Section>,

    focus: usize,
    editing: bool,
    scroll_state: ScrollViewState,
    viewport_height: u16,

    controlled_id: u64,
    controlled_value: String,
    last_validation: Option<bool>,
}

#[derive(Clone, Debug)]
pub enum ShowcaseAction {
    FocusNext,
    FocusPrev,
    StartEditing,
    StopEditing,
    ToggleVisibility,
    ClearText,
    ToggleColorScheme,
    ControlledChanged(String),
    ValidationReported(bool),
}
impl From<ShowcaseAction> for Action {
    fn from(value: ShowcaseAction) -> Self {
        Action::Showcase(value)
    }
}

fn field(props: FieldProps, mode: ValueMode) -> TextField {
    TextField::new(rand::random::<u64>(), props, mode)
}

fn placeholder<T: Into<String>>(text: T) -> FieldProps {
    FieldProps::default().with_placeholder(text)
}

impl Showcase {
    pub fn new(tx: ActionSender, scheme: ColorScheme) -> Self {
        let report_tx = tx.clone();
        let change_tx = tx.clone();
        let controlled = field(
            placeholder("Type and watch the value below"),
            ValueMode::controlled("", move |value| {
                change_tx.send(ShowcaseAction::ControlledChanged(value.to_string()))
            }),
        );
        let controlled_id = controlled.get_id();

        let sections = vec![
            Section::new(
                "value",
                "string",
                vec![field(
                    placeholder("Enter your name"),
                    ValueMode::uncontrolled(None, Some("Parth")),
                )],
            ),
            Section::new(
                "defaultValue",
                "string",
                vec![field(
                    placeholder("Enter your name"),
                    ValueMode::uncontrolled(Some("Parth"), None),
                )],
            ),
            Section::new(
                "label",
                "string",
                vec![field(
                    placeholder("Enter your name").with_label("Name"),
                    ValueMode::default(),
                )],
            ),
            Section::new(
                "isLoading",
                "boolean",
                vec![field(
                    placeholder("Loading state").with_loading(true),
                    ValueMode::default(),
                )],
            ),
            Section::new(
                "isDisabled",
                "boolean",
                vec![field(
                    placeholder("Disabled input").with_disabled(true),
                    ValueMode::default(),
                )],
            ),
            Section::new(
                "isReadOnly",
                "boolean",
                vec![field(
                    placeholder("Read-only input").with_read_only(true),
                    ValueMode::uncontrolled(None, Some("Read-only value")),
                )],
            ),
            Section::new(
                "secureTextEntry",
                "boolean",
                vec![field(
                    placeholder("Enter your password")
                        .with_secure_text_entry(true)
                        .with_left_icon(Icon::new(IconName::Lock).color(Color::Gray)),
                    ValueMode::default(),
                )],
            ),
            Section::new(
                "secureTextIconColor",
                "Color",
                vec![field(
                    placeholder("Enter your password")
                        .with_secure_text_entry(true)
                        .with_secure_text_icon_color(Color::Red),
                    ValueMode::default(),
                )],
            ),
            Section::new(
                "validationRules",
                "Vec<ValidationRule>",
                vec![field(
                    placeholder("Enter your email")
                        .with_left_icon(Icon::new(IconName::Mail).color(Color::Gray))
                        .with_validation_rules(vec![
                            ValidationRule::longer_than(5, "Email is too short"),
                            ValidationRule::contains("@", "Email must contain \"@\""),
                        ]),
                    ValueMode::default(),
                )],
            ),
            Section::new(
                "onValidationComplete",
                "Fn(is_valid: bool)",
                vec![field(
                    placeholder("Enter value")
                        .with_validation_rules(vec![ValidationRule::longer_than(5, "Too short")])
                        .on_validation_complete(move |is_valid| {
                            info!("Validation completed: {}", is_valid);
                            report_tx.send(ShowcaseAction::ValidationReported(is_valid));
                        }),
                    ValueMode::default(),
                )],
            ),
            Section::new("onChangeText", "Fn(value: &str)", vec![controlled]),
            Section::new(
                "leftIcon",
                "Span",
                vec![field(
                    placeholder("Enter text")
                        .with_left_icon(Icon::new(IconName::Person).color(Color::Gray)),
                    ValueMode::default(),
                )],
            ),
            Section::new(
                "rightIcon",
                "Span",
                vec![field(
                    placeholder("Enter text")
                        .with_right_icon(Icon::new(IconName::Checkmark).color(Color::Green)),
                    ValueMode::default(),
                )],
            ),
            Section::new(
                "variant",
                "ghost | outlined | underline",
                vec![
                    field(
                        placeholder("Ghost variant").with_variant(Variant::Ghost),
                        ValueMode::default(),
                    ),
                    field(
                        placeholder("Outlined variant").with_variant(Variant::Outlined),
                        ValueMode::default(),
                    ),
                    field(
                        placeholder("Underline variant").with_variant(Variant::Underline),
                        ValueMode::default(),
                    ),
                ],
            ),
        ];

        let mut showcase = Self {
            tx,
            scheme,
            sections,
            focus: 0,
            editing: false,
            scroll_state: ScrollViewState::default(),
            viewport_height: 0,
            controlled_id,
            controlled_value: String::new(),
            last_validation: None,
        };
        showcase.apply_color_scheme();
        showcase
    }

    fn fields(&self) -> impl Iterator<Item = &TextField> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    fn fields_mut(&mut self) -> impl Iterator<Item = &mut TextField> {
        self.sections.iter_mut().flat_map(|s| s.fields.iter_mut())
    }

    fn field_count(&self) -> usize {
        self.fields().count()
    }

    fn focused(&self) -> Option<&TextField> {
        self.fields().nth(self.focus)
    }

    fn focused_mut(&mut self) -> Option<&mut TextField> {
        let focus = self.focus;
        self.fields_mut().nth(focus)
    }

    fn apply_color_scheme(&mut self) {
        let scheme = Some(self.scheme);
        self.fields_mut()
            .for_each(|field| field.set_color_scheme(scheme));
    }

    fn move_focus(&mut self, next: usize) {
        if let Some(field) = self.focused_mut() {
            field.set_focus(FocusState::Idle);
        }
        self.focus = next;
        self.editing = false;
        if let Some(field) = self.focused_mut() {
            field.set_focus(FocusState::Focused);
        }
        self.scroll_to_focus();
    }

    fn content_layout(&self) -> ContentLayout {
        let mut y = HEADER_HEIGHT;
        let mut sections = Vec::with_capacity(self.sections.len());
        let mut fields = Vec::new();
        for section in &self.sections {
            sections.push(y);
            y += 2;
            for (i, field) in section.fields.iter().enumerate() {
                if i > 0 {
                    y += FIELD_GAP;
                }
                let height = field.height();
                fields.push((y, height));
                y += height;
            }
            y += SECTION_PADDING;
        }
        ContentLayout {
            sections,
            fields,
            height: y,
        }
    }

    /// Scroll so the focused field, and the heading above a section's first field, are visible
    fn scroll_to_focus(&mut self) {
        if self.viewport_height == 0 {
            return;
        }
        let layout = self.content_layout();
        let Some(&(y, height)) = layout.fields.get(self.focus) else {
            return;
        };
        let mut offset = self.scroll_state.offset();
        let top = if layout.sections.contains(&y.saturating_sub(2)) {
            y.saturating_sub(2)
        } else {
            y
        };
        let bottom = y + height;
        if top < offset.y {
            offset.y = top;
        } else if bottom > offset.y + self.viewport_height {
            offset.y = bottom.saturating_sub(self.viewport_height);
        }
        self.scroll_state.set_offset(offset);
    }

    fn get_help_msg(&self) -> HelpMsg {
        let mut msg = self
            .focused()
            .map(|field| field.get_help_msg())
            .unwrap_or_default();
        if !self.editing {
            msg.extend(
                &vec![
                    HelpEntry::new_plain("j/k", "Move focus"),
                    HelpEntry::new('x', "Clear text"),
                    HelpEntry::new('t', "Toggle theme"),
                    HelpEntry::new('?', "Help"),
                    HelpEntry::new('q', "Quit"),
                ]
                .into(),
            );
        }
        msg
    }

    fn status_line(&self) -> String {
        let validation = match self.last_validation {
            None => "none",
            Some(true) => "valid",
            Some(false) => "invalid",
        };
        format!(
            "Last validation: {} | Controlled value: {:?} | Theme: {}",
            validation, self.controlled_value, self.scheme,
        )
    }

    fn render_content(&mut self, frame: &mut Frame, area: Rect) {
        let colors = theme::resolve(Some(self.scheme));
        let layout = self.content_layout();
        let width = area.width.saturating_sub(1);

        let mut scroll_view = ScrollView::new(Size::new(area.width, layout.height))
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let title = Style::default().fg(colors.tint).add_modifier(Modifier::BOLD);
        let hint = Style::default().fg(colors.get(ColorRole::TabIconDefault));
        let header = [
            Line::styled("Welcome to UI Lab!", title),
            Line::styled("Usecases of the Input", Style::default().fg(colors.text).add_modifier(Modifier::BOLD)),
            Line::styled(
                format!("Change Light/Dark theme to change input by theme (press t, now {})", self.scheme),
                hint,
            ),
        ];
        for (i, line) in header.into_iter().enumerate() {
            scroll_view.render_widget(line, Rect::new(0, i as u16, width, 1));
        }

        let mut field_rects = Vec::with_capacity(layout.fields.len());
        let mut fields = layout.fields.iter();
        for (section, &y) in self.sections.iter().zip(layout.sections.iter()) {
            scroll_view.render_widget(
                Line::styled(section.title, Style::default().fg(colors.text).add_modifier(Modifier::BOLD)),
                Rect::new(0, y, width, 1),
            );
            scroll_view.render_widget(Line::styled(section.type_hint, hint), Rect::new(0, y + 1, width, 1));

            for text_field in &section.fields {
                let Some(&(field_y, height)) = fields.next() else {
                    break;
                };
                let rect = Rect::new(GUTTER, field_y, width.saturating_sub(GUTTER), height);
                scroll_view.render_widget(text_field, rect);
                field_rects.push(rect);
            }
        }

        if let Some(&rect) = field_rects.get(self.focus) {
            let marker = if self.editing { Color::Yellow } else { Color::Cyan };
            scroll_view.render_widget(
                Line::styled("›", Style::default().fg(marker)),
                Rect::new(0, rect.y, 1, 1),
            );
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.scroll_state);

        if !self.editing {
            return;
        }
        let offset = self.scroll_state.offset();
        let cursor = field_rects
            .get(self.focus)
            .and_then(|&rect| self.focused().and_then(|field| field.cursor_position(rect)));
        if let Some(cursor) = cursor {
            if cursor.y >= offset.y && cursor.y - offset.y < area.height {
                frame.set_cursor_position(Position::new(
                    area.x + cursor.x.saturating_sub(offset.x),
                    area.y + cursor.y - offset.y,
                ));
            }
        }
    }
}

impl EventLoopParticipant for Showcase {
    fn handle_events(&mut self, event: &Event) -> EventHandlingStatus {
        if self.editing {
            if let Event::Key(key) = event {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                    self.tx.send(ShowcaseAction::StopEditing);
                    return EventHandlingStatus::Consumed;
                }
            }
            let status = self
                .focused_mut()
                .map(|field| field.handle_events(event))
                .unwrap_or(EventHandlingStatus::ShouldPropagate);
            // an error line may have appeared or disappeared
            self.scroll_to_focus();
            // keys never leak out of an editing field
            return match event {
                Event::Key(_) => EventHandlingStatus::Consumed,
                _ => status,
            };
        }

        let Event::Key(key) = event else {
            return EventHandlingStatus::ShouldPropagate;
        };
        match key.code {
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
                self.tx.send(ShowcaseAction::FocusNext)
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
                self.tx.send(ShowcaseAction::FocusPrev)
            }
            KeyCode::Enter => self.tx.send(ShowcaseAction::StartEditing),
            KeyCode::Char('v') => self.tx.send(ShowcaseAction::ToggleVisibility),
            KeyCode::Char('x') => self.tx.send(ShowcaseAction::ClearText),
            KeyCode::Char('t') => self.tx.send(ShowcaseAction::ToggleColorScheme),
            KeyCode::Char('?') => self.tx.send(LayerManageAction::Push(LayerPushTarget {
                layer: Layers::Help(self.get_help_msg()),
                render_self: true,
            })),
            _ => return EventHandlingStatus::ShouldPropagate,
        }
        EventHandlingStatus::Consumed
    }

    fn update(&mut self, action: Action) {
        match action {
            Action::Tick => self
                .fields_mut()
                .for_each(|field| field.update(Action::Tick)),
            Action::Showcase(action) => match action {
                ShowcaseAction::FocusNext => {
                    let count = self.field_count();
                    self.move_focus((self.focus + 1) % count);
                }
                ShowcaseAction::FocusPrev => {
                    let count = self.field_count();
                    self.move_focus((self.focus + count - 1) % count);
                }
                ShowcaseAction::StartEditing => {
                    let focus = self.focus;
                    let Some(field) = self.focused_mut() else {
                        return;
                    };
                    if field.is_disabled() {
                        debug!(focus, "disabled field cannot be edited");
                        return;
                    }
                    self.editing = field.set_focus(FocusState::Editing);
                }
                ShowcaseAction::StopEditing => {
                    if let Some(field) = self.focused_mut() {
                        field.set_focus(FocusState::Focused);
                    }
                    self.editing = false;
                }
                ShowcaseAction::ToggleVisibility => {
                    if let Some(field) = self.focused_mut() {
                        field.toggle_secure_visibility();
                    }
                }
                ShowcaseAction::ClearText => {
                    if let Some(field) = self.focused_mut() {
                        field.change_text("");
                    }
                    self.scroll_to_focus();
                }
                ShowcaseAction::ToggleColorScheme => {
                    self.scheme = self.scheme.toggled();
                    info!("Switched color scheme to {}", self.scheme);
                    self.apply_color_scheme();
                }
                ShowcaseAction::ControlledChanged(value) => {
                    let id = self.controlled_id;
                    if let Some(field) = self.fields_mut().find(|field| field.get_id() == id) {
                        field.set_value(value.clone());
                    }
                    self.controlled_value = value;
                }
                ShowcaseAction::ValidationReported(is_valid) => {
                    self.last_validation = Some(is_valid);
                }
            },
            _ => {}
        }
    }
}

impl Layer for Showcase {
    fn init(&mut self) {
        self.move_focus(0);
    }
}

impl WidgetExt for Showcase {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [body, status_area, help_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .areas(area);

        if self.viewport_height != body.height {
            self.viewport_height = body.height;
            self.scroll_to_focus();
        }
        self.render_content(frame, body);

        let colors = theme::resolve(Some(self.scheme));
        frame.render_widget(
            Line::styled(self.status_line(), Style::default().fg(colors.tab_icon_default)),
            status_area,
        );
        self.get_help_msg().render(frame, help_area);
    }
}
