use ratatui::{
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Padding},
};
use strum::{Display, EnumString};

/// Border style of a text field
#[derive(Display, EnumString, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Variant {
    /// No border at all
    Ghost,
    /// Thick border on every side
    Outlined,
    /// Border on the bottom edge only
    #[default]
    Underline,
}

/// One override applied on top of the wrapper style.
///
/// Layers are applied in order, a later layer wins over an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StyleLayer {
    Base { tint: Color },
    Variant(Variant),
    Error,
    Disabled,
}

pub(crate) const ERROR_COLOR: Color = Color::Red;
pub(crate) const DISABLED_COLOR: Color = Color::Gray;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WrapperStyle {
    pub borders: Borders,
    pub border_type: BorderType,
    pub border_color: Color,
}

impl Default for WrapperStyle {
    fn default() -> Self {
        Self {
            borders: Borders::ALL,
            border_type: BorderType::Rounded,
            border_color: Color::Reset,
        }
    }
}

impl WrapperStyle {
    fn apply(self, layer: StyleLayer) -> Self {
        match layer {
            StyleLayer::Base { tint } => Self {
                borders: Borders::ALL,
                border_type: BorderType::Rounded,
                border_color: tint,
            },
            StyleLayer::Variant(Variant::Ghost) => Self {
                borders: Borders::NONE,
                ..self
            },
            StyleLayer::Variant(Variant::Outlined) => Self {
                borders: Borders::ALL,
                border_type: BorderType::Thick,
                ..self
            },
            StyleLayer::Variant(Variant::Underline) => Self {
                borders: Borders::BOTTOM,
                ..self
            },
            StyleLayer::Error => Self {
                border_color: ERROR_COLOR,
                ..self
            },
            StyleLayer::Disabled => Self {
                border_color: DISABLED_COLOR,
                ..self
            },
        }
    }

    /// Fold `layers` over the default style
    pub fn compose<I: IntoIterator<Item = StyleLayer>>(layers: I) -> Self {
        layers
            .into_iter()
            .fold(WrapperStyle::default(), WrapperStyle::apply)
    }

    /// Rows taken by the wrapper around a single line of text
    pub fn height(&self) -> u16 {
        1 + u16::from(self.borders.contains(Borders::TOP))
            + u16::from(self.borders.contains(Borders::BOTTOM))
    }

    pub fn block(&self) -> Block<'static> {
        Block::default()
            .borders(self.borders)
            .border_type(self.border_type)
            .border_style(Style::default().fg(self.border_color))
            .padding(Padding::horizontal(1))
    }
}

/// Ordered layers for the given field state: base, variant, error, disabled.
pub(crate) fn style_layers(
    tint: Color,
    variant: Variant,
    has_error: bool,
    disabled: bool,
) -> Vec<StyleLayer> {
    let mut layers = vec![StyleLayer::Base { tint }, StyleLayer::Variant(variant)];
    if has_error {
        layers.push(StyleLayer::Error);
    }
    if disabled {
        layers.push(StyleLayer::Disabled);
    }
    layers
}
