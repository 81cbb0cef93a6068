use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use tracing::{debug, warn};
use tui_input::{Input, InputRequest, StateChanged, backend::crossterm::EventHandler};

use crate::{
    actions::Action,
    app::layer_manager::EventHandlingStatus,
    page::{EventLoopParticipant, WidgetExt},
    theme::{self, ColorMap, ColorScheme},
    tui::Event,
    utils::{
        help_msg::{HelpEntry, HelpMsg},
        key_events::KeyEvent,
    },
};

use super::{
    Component,
    field_style::{ERROR_COLOR, Variant, WrapperStyle, style_layers},
    icon::{Icon, IconName},
    validation::{self, ValidationRule},
};

pub(crate) type ChangeHandler = Box<dyn Fn(&str) + Send + Sync>;
pub(crate) type ValidationHandler = Box<dyn Fn(bool) + Send + Sync>;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const MASK: &str = "•";
const TOGGLE_ICON_SIZE: u16 = 1;

/// Who owns the text of a field. Decided once, when the field is built.
pub(crate) enum ValueMode {
    /// The caller owns the text: every change is reported through `on_change`
    /// and the field shows whatever `value` the caller last set.
    Controlled { value: String, on_change: ChangeHandler },
    /// The field owns the text, `initial` only seeds it.
    Uncontrolled { initial: String },
}

impl ValueMode {
    pub fn controlled<T, F>(value: T, on_change: F) -> Self
    where
        T: Into<String>,
        F: Fn(&str) + Send + Sync + 'static,
    {
        ValueMode::Controlled {
            value: value.into(),
            on_change: Box::new(on_change),
        }
    }

    /// Seed from `default_value`, falling back to `value`, then to an empty string.
    pub fn uncontrolled(default_value: Option<&str>, value: Option<&str>) -> Self {
        ValueMode::Uncontrolled {
            initial: default_value.or(value).unwrap_or_default().to_string(),
        }
    }
}

impl Default for ValueMode {
    fn default() -> Self {
        ValueMode::Uncontrolled {
            initial: String::new(),
        }
    }
}

/// Static configuration of a [`TextField`]
pub(crate) struct FieldProps {
    label: Option<String>,
    placeholder: Option<String>,
    validation_rules: Vec<ValidationRule>,
    is_loading: bool,
    is_disabled: bool,
    is_read_only: bool,
    variant: Variant,
    left_icon: Option<Span<'static>>,
    right_icon: Option<Span<'static>>,
    secure_text_entry: bool,
    secure_text_icon_color: Color,
    on_validation_complete: Option<ValidationHandler>,
}

impl Default for FieldProps {
    fn default() -> Self {
        Self {
            label: None,
            placeholder: None,
            validation_rules: Vec::new(),
            is_loading: false,
            is_disabled: false,
            is_read_only: false,
            variant: Variant::default(),
            left_icon: None,
            right_icon: None,
            secure_text_entry: false,
            secure_text_icon_color: Color::Gray,
            on_validation_complete: None,
        }
    }
}

impl FieldProps {
    pub fn with_label<T: Into<String>>(mut self, label: T) -> Self {
        self.label = Some(label.into());
        self
    }
    pub fn with_placeholder<T: Into<String>>(mut self, placeholder: T) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
    pub fn with_validation_rules(mut self, rules: Vec<ValidationRule>) -> Self {
        self.validation_rules = rules;
        self
    }
    pub fn with_loading(mut self, is_loading: bool) -> Self {
        self.is_loading = is_loading;
        self
    }
    pub fn with_disabled(mut self, is_disabled: bool) -> Self {
        self.is_disabled = is_disabled;
        self
    }
    pub fn with_read_only(mut self, is_read_only: bool) -> Self {
        self.is_read_only = is_read_only;
        self
    }
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }
    pub fn with_left_icon<T: Into<Span<'static>>>(mut self, icon: T) -> Self {
        self.left_icon = Some(icon.into());
        self
    }
    pub fn with_right_icon<T: Into<Span<'static>>>(mut self, icon: T) -> Self {
        self.right_icon = Some(icon.into());
        self
    }
    pub fn with_secure_text_entry(mut self, secure: bool) -> Self {
        self.secure_text_entry = secure;
        self
    }
    pub fn with_secure_text_icon_color(mut self, color: Color) -> Self {
        self.secure_text_icon_color = color;
        self
    }
    pub fn on_validation_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.on_validation_complete = Some(Box::new(callback));
        self
    }
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FocusState {
    #[default]
    Idle,
    Focused,
    Editing,
}

enum TextSource {
    Owned(Input),
    Controlled {
        value: String,
        on_change: ChangeHandler,
        cursor: usize,
    },
}

/// A themed single line text field with validation.
///
/// Keys and pastes only reach the field while it is [`FocusState::Editing`].
/// Each change of the text runs every validation rule and reports the result
/// through `on_validation_complete`, exactly once per change.
pub(crate) struct TextField {
    id: u64,
    props: FieldProps,
    source: TextSource,

    error: Option<String>,
    secure_hidden: bool,
    spinner_frame: usize,
    focus: FocusState,
    scheme: Option<ColorScheme>,
}

struct FieldAreas {
    label: Rect,
    wrapper: Rect,
    left: Option<Rect>,
    input: Rect,
    right: Option<Rect>,
    toggle: Option<Rect>,
    error: Rect,
}

pub(crate) fn toggle_visibility_key() -> KeyEvent {
    crossterm::event::KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL).into()
}

impl TextField {
    pub fn new(id: u64, props: FieldProps, mode: ValueMode) -> Self {
        let source = match mode {
            ValueMode::Controlled { value, on_change } => {
                let cursor = value.chars().count();
                TextSource::Controlled {
                    value,
                    on_change,
                    cursor,
                }
            }
            ValueMode::Uncontrolled { initial } => TextSource::Owned(Input::new(initial)),
        };
        debug!(
            id,
            controlled = matches!(source, TextSource::Controlled { .. }),
            "text field created"
        );
        Self {
            id,
            secure_hidden: props.secure_text_entry,
            props,
            source,
            error: None,
            spinner_frame: 0,
            focus: FocusState::default(),
            scheme: None,
        }
    }

    /// Text currently shown by the field
    pub fn value(&self) -> &str {
        match &self.source {
            TextSource::Owned(input) => input.value(),
            TextSource::Controlled { value, .. } => value,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self.source, TextSource::Controlled { .. })
    }

    pub fn is_disabled(&self) -> bool {
        self.props.is_disabled
    }

    pub fn is_masked(&self) -> bool {
        self.props.secure_text_entry && self.secure_hidden
    }

    pub fn focus(&self) -> FocusState {
        self.focus
    }

    /// Update the caller-owned text. Uncontrolled fields keep their own text.
    pub fn set_value<T: Into<String>>(&mut self, new_value: T) {
        match &mut self.source {
            TextSource::Controlled { value, .. } => *value = new_value.into(),
            TextSource::Owned(_) => {
                warn!(id = self.id, "ignoring value update on an uncontrolled text field")
            }
        }
    }

    pub fn set_color_scheme(&mut self, scheme: Option<ColorScheme>) {
        self.scheme = scheme;
    }

    /// Returns `false` when the requested state is refused: a disabled field never edits.
    pub fn set_focus(&mut self, focus: FocusState) -> bool {
        if focus == FocusState::Editing && self.props.is_disabled {
            return false;
        }
        self.focus = focus;
        true
    }

    /// Flip masking of a secure field. Text and validation state are untouched.
    pub fn toggle_secure_visibility(&mut self) {
        if !self.props.secure_text_entry || self.props.is_disabled {
            return;
        }
        self.secure_hidden = !self.secure_hidden;
    }

    /// Treat `value` as a change event, as if the user had typed it.
    pub fn change_text<T: Into<String>>(&mut self, value: T) {
        if self.props.is_disabled || self.props.is_read_only {
            return;
        }
        self.on_change_text(value.into());
    }

    fn cursor(&self) -> usize {
        match &self.source {
            TextSource::Owned(input) => input.cursor(),
            TextSource::Controlled { value, cursor, .. } => (*cursor).min(value.chars().count()),
        }
    }

    fn edit_buffer(&self) -> Input {
        Input::new(self.value().to_string()).with_cursor(self.cursor())
    }

    fn apply_edit<F>(&mut self, edit: F) -> EventHandlingStatus
    where
        F: FnOnce(&mut Input) -> Option<StateChanged>,
    {
        let mut buffer = self.edit_buffer();
        let value_changed = edit(&mut buffer).is_some_and(|changed| changed.value);

        if value_changed && self.props.is_read_only {
            return EventHandlingStatus::Consumed;
        }

        match &mut self.source {
            TextSource::Owned(input) => *input = buffer.clone(),
            TextSource::Controlled { cursor, .. } => *cursor = buffer.cursor(),
        }

        if value_changed {
            self.on_change_text(buffer.value().to_string());
        }
        EventHandlingStatus::Consumed
    }

    fn on_change_text(&mut self, value: String) {
        match &mut self.source {
            TextSource::Owned(input) => {
                if input.value() != value {
                    *input = Input::new(value.clone());
                }
            }
            TextSource::Controlled { on_change, .. } => on_change(&value),
        }
        self.run_validation(&value);
    }

    fn run_validation(&mut self, value: &str) {
        let outcome = validation::validate(&self.props.validation_rules, value);
        let is_valid = outcome.is_valid();
        self.error = outcome.into_error();
        debug!(id = self.id, is_valid, error = ?self.error, "text field validated");

        if let Some(callback) = &self.props.on_validation_complete {
            callback(is_valid);
        }
    }

    fn wrapper_style(&self) -> WrapperStyle {
        let colors = theme::resolve(self.scheme);
        WrapperStyle::compose(style_layers(
            colors.tint,
            self.props.variant,
            self.error.is_some(),
            self.props.is_disabled,
        ))
    }

    fn decoration(&self, span: &Span<'static>) -> Span<'static> {
        if self.props.is_disabled {
            span.clone().patch_style(Style::default().add_modifier(Modifier::DIM))
        } else {
            span.clone()
        }
    }

    /// Spinner while loading, otherwise the right icon
    fn right_slot(&self) -> Option<Span<'static>> {
        if self.props.is_loading {
            Some(Span::styled(
                SPINNER_FRAMES[self.spinner_frame],
                Style::default().fg(Color::Gray),
            ))
        } else {
            self.props.right_icon.as_ref().map(|icon| self.decoration(icon))
        }
    }

    fn toggle_icon(&self) -> Option<Span<'static>> {
        if !self.props.secure_text_entry || self.props.is_disabled {
            return None;
        }
        let name = if self.secure_hidden {
            IconName::EyeOff
        } else {
            IconName::Eye
        };
        Some(
            Icon::new(name)
                .color(self.props.secure_text_icon_color)
                .into(),
        )
    }

    fn areas(&self, area: Rect) -> FieldAreas {
        let style = self.wrapper_style();
        let [label, wrapper, error] = Layout::vertical([
            Constraint::Length(u16::from(self.props.label.is_some())),
            Constraint::Length(style.height()),
            Constraint::Length(u16::from(self.error.is_some())),
        ])
        .areas(area);
        let inner = style.block().inner(wrapper);

        let left_width = self.props.left_icon.as_ref().map(|s| s.width() as u16);
        let right_width = self.right_slot().map(|s| s.width() as u16);
        let toggle_width = self.toggle_icon().map(|_| TOGGLE_ICON_SIZE);

        let mut constraints = Vec::with_capacity(4);
        constraints.extend(left_width.map(Constraint::Length));
        constraints.push(Constraint::Fill(1));
        constraints.extend(right_width.map(Constraint::Length));
        constraints.extend(toggle_width.map(Constraint::Length));
        let chunks = Layout::horizontal(constraints).spacing(1).split(inner);

        let mut chunks = chunks.iter().copied();
        let left = left_width.and_then(|_| chunks.next());
        let input = chunks.next().unwrap_or_default();
        let right = right_width.and_then(|_| chunks.next());
        let toggle = toggle_width.and_then(|_| chunks.next());

        FieldAreas {
            label,
            wrapper,
            left,
            input,
            right,
            toggle,
            error,
        }
    }

    /// The text as drawn on screen, with the cursor at the same character index
    fn view_input(&self) -> Input {
        let shown = if self.is_masked() {
            MASK.repeat(self.value().chars().count())
        } else {
            self.value().to_string()
        };
        Input::new(shown).with_cursor(self.cursor())
    }

    fn render_text(&self, area: Rect, buf: &mut Buffer, colors: &ColorMap) {
        if self.value().is_empty() {
            if let Some(placeholder) = &self.props.placeholder {
                Paragraph::new(placeholder.as_str())
                    .style(Style::default().fg(colors.tab_icon_default))
                    .render(area, buf);
            }
            return;
        }

        let view = self.view_input();
        let scroll = view.visual_scroll(area.width as usize);
        let fg = if self.props.is_disabled {
            Color::Gray
        } else {
            colors.text
        };
        Paragraph::new(view.value())
            .style(Style::default().fg(fg))
            .scroll((0, scroll as u16))
            .render(area, buf);
    }

    /// Terminal cursor position while editing
    pub fn cursor_position(&self, area: Rect) -> Option<Position> {
        if self.focus != FocusState::Editing {
            return None;
        }
        let input = self.areas(area).input;
        if input.width == 0 || input.height == 0 {
            return None;
        }
        let view = self.view_input();
        let scroll = view.visual_scroll(input.width as usize);
        let x = view.visual_cursor().max(scroll) - scroll;
        Some(Position::new(input.x + x as u16, input.y))
    }

    pub fn get_help_msg(&self) -> HelpMsg {
        let mut msg = HelpMsg::default();
        match self.focus {
            FocusState::Editing => {
                msg.push(HelpEntry::new(KeyCode::Esc, "Stop editing"));
                if self.toggle_icon().is_some() {
                    msg.push(HelpEntry::new(toggle_visibility_key(), "Show/hide text"));
                }
            }
            FocusState::Focused => {
                if !self.props.is_disabled {
                    msg.push(HelpEntry::new(KeyCode::Enter, "Start editing"));
                }
                if self.toggle_icon().is_some() {
                    msg.push(HelpEntry::new('v', "Show/hide text"));
                }
            }
            FocusState::Idle => {}
        }
        msg
    }
}

impl Widget for &TextField {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = theme::resolve(self.scheme);
        let areas = self.areas(area);

        if let Some(label) = &self.props.label {
            Line::styled(label.as_str(), Style::default().fg(colors.text)).render(areas.label, buf);
        }

        self.wrapper_style().block().render(areas.wrapper, buf);

        if let (Some(rect), Some(icon)) = (areas.left, &self.props.left_icon) {
            self.decoration(icon).render(rect, buf);
        }
        self.render_text(areas.input, buf, colors);
        if let (Some(rect), Some(slot)) = (areas.right, self.right_slot()) {
            slot.render(rect, buf);
        }
        if let (Some(rect), Some(toggle)) = (areas.toggle, self.toggle_icon()) {
            toggle.render(rect, buf);
        }

        if let Some(error) = &self.error {
            Line::styled(error.as_str(), Style::default().fg(ERROR_COLOR)).render(areas.error, buf);
        }
    }
}

impl WidgetExt for TextField {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(&*self, area);
        if let Some(position) = self.cursor_position(area) {
            frame.set_cursor_position(position);
        }
    }
}

impl EventLoopParticipant for TextField {
    fn handle_events(&mut self, event: &Event) -> EventHandlingStatus {
        if self.focus != FocusState::Editing || self.props.is_disabled {
            return EventHandlingStatus::ShouldPropagate;
        }
        match event {
            Event::Key(key) => {
                if KeyEvent::from(*key) == toggle_visibility_key() {
                    self.toggle_secure_visibility();
                    return EventHandlingStatus::Consumed;
                }
                self.apply_edit(|input| input.handle_event(&CrosstermEvent::Key(*key)))
            }
            // the field is single line, so newlines and other control characters are dropped
            Event::Paste(text) => self.apply_edit(|input| {
                text.chars().filter(|c| !c.is_control()).fold(None, |changed, c| {
                    input.handle(InputRequest::InsertChar(c)).or(changed)
                })
            }),
            _ => EventHandlingStatus::ShouldPropagate,
        }
    }

    fn update(&mut self, action: Action) {
        if let Action::Tick = action {
            if self.props.is_loading {
                self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
            }
        }
    }
}

impl Component for TextField {
    fn get_id(&self) -> u64 {
        self.id
    }

    fn height(&self) -> u16 {
        u16::from(self.props.label.is_some())
            + self.wrapper_style().height()
            + u16::from(self.error.is_some())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use insta::assert_snapshot;
    use ratatui::{Terminal, backend::TestBackend, buffer::Cell};

    use super::*;

    fn email_rules() -> Vec<ValidationRule> {
        vec![
            ValidationRule::longer_than(5, "too short"),
            ValidationRule::contains("@", "needs @"),
        ]
    }

    fn recorder() -> (Arc<Mutex<Vec<bool>>>, impl Fn(bool) + Send + Sync + 'static) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();
        (calls, move |valid| sink.lock().unwrap().push(valid))
    }

    fn editing(mut field: TextField) -> TextField {
        assert!(field.set_focus(FocusState::Editing));
        field
    }

    fn type_str(field: &mut TextField, s: &str) {
        for c in s.chars() {
            let _ = field.handle_events(&c.into());
        }
    }

    fn draw(field: &mut TextField, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                WidgetExt::render(field, f, area);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn screen(field: &mut TextField, width: u16, height: u16) -> String {
        draw(field, width, height)
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn cell<'a>(buffer: &'a Buffer, symbol: &str) -> &'a Cell {
        buffer
            .content()
            .iter()
            .find(|c| c.symbol() == symbol)
            .unwrap_or_else(|| panic!("{symbol} not rendered"))
    }

    #[test]
    fn uncontrolled_seed() {
        let field = TextField::new(1, FieldProps::default(), ValueMode::uncontrolled(Some("a"), Some("b")));
        assert_eq!(field.value(), "a");
        let field = TextField::new(1, FieldProps::default(), ValueMode::uncontrolled(None, Some("b")));
        assert_eq!(field.value(), "b");
        let field = TextField::new(1, FieldProps::default(), ValueMode::uncontrolled(None, None));
        assert_eq!(field.value(), "");
        assert!(!field.is_controlled());
    }

    #[test]
    fn validation_scenario() {
        let (calls, callback) = recorder();
        let mut field = editing(TextField::new(
            1,
            FieldProps::default()
                .with_validation_rules(email_rules())
                .on_validation_complete(callback),
            ValueMode::default(),
        ));

        type_str(&mut field, "ab");
        assert_eq!(field.value(), "ab");
        assert_snapshot!(field.error().unwrap(), @"too short needs @");
        assert_eq!(*calls.lock().unwrap(), vec![false, false]);

        type_str(&mut field, "cdef@x");
        assert_eq!(field.value(), "abcdef@x");
        assert_eq!(field.error(), None);
        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 8);
        assert_eq!(calls.last(), Some(&true));
    }

    #[test]
    fn empty_rules_always_valid() {
        let (calls, callback) = recorder();
        let mut field = TextField::new(
            1,
            FieldProps::default().on_validation_complete(callback),
            ValueMode::default(),
        );
        field.change_text("");
        field.change_text("x");
        assert_eq!(field.error(), None);
        assert_eq!(*calls.lock().unwrap(), vec![true, true]);
    }

    #[test]
    fn cursor_keys_are_not_change_events() {
        let (calls, callback) = recorder();
        let mut field = editing(TextField::new(
            1,
            FieldProps::default().on_validation_complete(callback),
            ValueMode::uncontrolled(Some("ab"), None),
        ));

        let status = field.handle_events(&KeyCode::Left.into());
        assert!(matches!(status, EventHandlingStatus::Consumed));
        assert!(calls.lock().unwrap().is_empty());

        type_str(&mut field, "c");
        assert_eq!(field.value(), "acb");
        assert_eq!(*calls.lock().unwrap(), vec![true]);
    }

    #[test]
    fn paste_is_one_change_event() {
        let (calls, callback) = recorder();
        let mut field = editing(TextField::new(
            1,
            FieldProps::default()
                .with_validation_rules(email_rules())
                .on_validation_complete(callback),
            ValueMode::default(),
        ));
        let _ = field.handle_events(&Event::Paste("me@mail.com".into()));
        assert_eq!(field.value(), "me@mail.com");
        assert_eq!(*calls.lock().unwrap(), vec![true]);
    }

    #[test]
    fn paste_drops_control_characters() {
        let (calls, callback) = recorder();
        let mut field = editing(TextField::new(
            1,
            FieldProps::default().on_validation_complete(callback),
            ValueMode::default(),
        ));
        let _ = field.handle_events(&Event::Paste("a\nb\r\t".into()));
        assert_eq!(field.value(), "ab");
        assert_eq!(*calls.lock().unwrap(), vec![true]);

        // nothing printable left, so nothing changed
        let _ = field.handle_events(&Event::Paste("\r\n".into()));
        assert_eq!(field.value(), "ab");
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn controlled_value_is_owned_by_caller() {
        let changes = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = changes.clone();
        let (calls, callback) = recorder();
        let mut field = editing(TextField::new(
            1,
            FieldProps::default()
                .with_validation_rules(vec![ValidationRule::longer_than(1, "short")])
                .on_validation_complete(callback),
            ValueMode::controlled("x", move |v| sink.lock().unwrap().push(v.to_string())),
        ));
        assert!(field.is_controlled());

        type_str(&mut field, "y");
        assert_eq!(field.value(), "x");
        assert_eq!(*changes.lock().unwrap(), vec!["xy".to_string()]);
        assert_eq!(*calls.lock().unwrap(), vec![true]);
        assert_eq!(field.error(), None);

        // the caller decides not to accept the change, the next edit starts from "x" again
        type_str(&mut field, "z");
        assert_eq!(field.value(), "x");
        assert_eq!(changes.lock().unwrap().last().unwrap(), "xz");

        field.set_value("hello");
        assert_eq!(field.value(), "hello");
    }

    #[test]
    fn uncontrolled_ignores_set_value() {
        let mut field = TextField::new(1, FieldProps::default(), ValueMode::uncontrolled(None, Some("seed")));
        field.set_value("other");
        assert_eq!(field.value(), "seed");
    }

    #[test]
    fn toggle_visibility() {
        let (calls, callback) = recorder();
        let mut field = editing(TextField::new(
            1,
            FieldProps::default()
                .with_secure_text_entry(true)
                .on_validation_complete(callback),
            ValueMode::uncontrolled(Some("secret"), None),
        ));
        assert!(field.is_masked());
        let text = screen(&mut field, 20, 2);
        assert!(text.contains("••••••"));
        assert!(!text.contains("secret"));
        assert!(text.contains("◌"));

        let status = field.handle_events(&Event::Key(toggle_visibility_key().0));
        assert!(matches!(status, EventHandlingStatus::Consumed));
        assert!(!field.is_masked());
        assert_eq!(field.value(), "secret");
        assert!(calls.lock().unwrap().is_empty());
        let text = screen(&mut field, 20, 2);
        assert!(text.contains("secret"));
        assert!(text.contains("◉"));

        field.toggle_secure_visibility();
        assert!(field.is_masked());
    }

    #[test]
    fn disabled_blocks_editing_and_toggle() {
        let (calls, callback) = recorder();
        let mut field = TextField::new(
            1,
            FieldProps::default()
                .with_disabled(true)
                .with_secure_text_entry(true)
                .with_right_icon(Icon::new(IconName::Checkmark))
                .on_validation_complete(callback),
            ValueMode::uncontrolled(Some("pw"), None),
        );
        assert!(!field.set_focus(FocusState::Editing));
        assert!(field.set_focus(FocusState::Focused));
        assert!(matches!(
            field.handle_events(&'a'.into()),
            EventHandlingStatus::ShouldPropagate
        ));
        field.change_text("changed");
        assert_eq!(field.value(), "pw");
        assert!(calls.lock().unwrap().is_empty());

        field.toggle_secure_visibility();
        assert!(field.is_masked());

        let buffer = draw(&mut field, 20, 2);
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(!text.contains("◌"));
        assert!(!text.contains("◉"));
        assert!(cell(&buffer, "✓").modifier.contains(Modifier::DIM));
    }

    #[test]
    fn disabled_dims_decorations() {
        let mut field = TextField::new(
            1,
            FieldProps::default()
                .with_disabled(true)
                .with_left_icon(Icon::new(IconName::Person)),
            ValueMode::uncontrolled(Some("x"), None),
        );
        let buffer = draw(&mut field, 20, 2);
        assert!(cell(&buffer, "☺").modifier.contains(Modifier::DIM));
        assert_eq!(cell(&buffer, "x").fg, Color::Gray);
    }

    #[test]
    fn enabled_icons_are_not_dimmed() {
        let mut field = TextField::new(
            1,
            FieldProps::default()
                .with_left_icon(Icon::new(IconName::Person))
                .with_right_icon(Icon::new(IconName::Checkmark)),
            ValueMode::uncontrolled(Some("x"), None),
        );
        let buffer = draw(&mut field, 20, 2);
        assert!(!cell(&buffer, "☺").modifier.contains(Modifier::DIM));
        assert!(!cell(&buffer, "✓").modifier.contains(Modifier::DIM));
        assert_ne!(cell(&buffer, "x").fg, Color::Gray);
    }

    #[test]
    fn read_only_blocks_changes() {
        let (calls, callback) = recorder();
        let mut field = editing(TextField::new(
            1,
            FieldProps::default()
                .with_read_only(true)
                .on_validation_complete(callback),
            ValueMode::uncontrolled(None, Some("fixed")),
        ));
        type_str(&mut field, "abc");
        let _ = field.handle_events(&KeyCode::Backspace.into());
        let _ = field.handle_events(&Event::Paste("more".into()));
        assert_eq!(field.value(), "fixed");
        assert!(calls.lock().unwrap().is_empty());
        assert!(matches!(
            field.handle_events(&KeyCode::Home.into()),
            EventHandlingStatus::Consumed
        ));
    }

    #[test]
    fn loading_replaces_right_icon() {
        let mut field = TextField::new(
            1,
            FieldProps::default()
                .with_loading(true)
                .with_right_icon(Icon::new(IconName::Checkmark)),
            ValueMode::default(),
        );
        let text = screen(&mut field, 20, 2);
        assert!(text.contains(SPINNER_FRAMES[0]));
        assert!(!text.contains("✓"));

        field.update(Action::Tick);
        let text = screen(&mut field, 20, 2);
        assert!(text.contains(SPINNER_FRAMES[1]));
    }

    #[test]
    fn layout_rows() {
        let mut field = TextField::new(
            1,
            FieldProps::default()
                .with_label("Email")
                .with_variant(Variant::Outlined)
                .with_validation_rules(email_rules()),
            ValueMode::default(),
        );
        assert_eq!(field.height(), 4);
        field.change_text("ab");
        assert_eq!(field.height(), 5);

        let text = screen(&mut field, 30, 5);
        assert!(text.starts_with("Email"));
        assert!(text.contains("too short needs @"));

        let ghost = TextField::new(1, FieldProps::default().with_variant(Variant::Ghost), ValueMode::default());
        assert_eq!(ghost.height(), 1);
        let underline = TextField::new(1, FieldProps::default(), ValueMode::default());
        assert_eq!(underline.height(), 2);
    }

    #[test]
    fn placeholder_and_cursor() {
        let mut field = TextField::new(
            1,
            FieldProps::default().with_placeholder("Enter your name"),
            ValueMode::default(),
        );
        let text = screen(&mut field, 30, 2);
        assert!(text.contains("Enter your name"));

        let area = Rect::new(0, 0, 30, 2);
        assert_eq!(field.cursor_position(area), None);
        field.set_focus(FocusState::Editing);
        type_str(&mut field, "ab");
        // one cell of horizontal padding
        assert_eq!(field.cursor_position(area), Some(Position::new(3, 0)));
    }

    #[test]
    fn help_msg() {
        let mut field = TextField::new(
            1,
            FieldProps::default().with_secure_text_entry(true),
            ValueMode::default(),
        );
        assert_eq!(String::from(field.get_help_msg()), "");
        field.set_focus(FocusState::Focused);
        assert_eq!(
            String::from(field.get_help_msg()),
            "Start editing: enter | Show/hide text: v"
        );
        field.set_focus(FocusState::Editing);
        assert_eq!(
            String::from(field.get_help_msg()),
            "Stop editing: esc | Show/hide text: ctrl-r"
        );
    }
}
