//! Light/dark color tables.
//!
//! Every widget looks colors up by semantic role instead of hard coding them,
//! so switching the [`ColorScheme`] re-themes the whole screen on the next frame.

use lazy_static::lazy_static;
use ratatui::style::Color;
use serde::Deserialize;
use strum::{Display, EnumString};

#[derive(
    Display, EnumString, Deserialize, clap::ValueEnum, Default, Debug, Clone, Copy, PartialEq, Eq,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn toggled(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }
}

/// Semantic color roles
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "camelCase")]
pub enum ColorRole {
    Text,
    Background,
    Tint,
    Icon,
    TabIconDefault,
    TabIconSelected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMap {
    pub text: Color,
    pub background: Color,
    pub tint: Color,
    pub icon: Color,
    pub tab_icon_default: Color,
    pub tab_icon_selected: Color,
}

impl ColorMap {
    pub fn get(&self, role: ColorRole) -> Color {
        match role {
            ColorRole::Text => self.text,
            ColorRole::Background => self.background,
            ColorRole::Tint => self.tint,
            ColorRole::Icon => self.icon,
            ColorRole::TabIconDefault => self.tab_icon_default,
            ColorRole::TabIconSelected => self.tab_icon_selected,
        }
    }
}

const TINT_LIGHT: Color = Color::Rgb(0x0a, 0x7e, 0xa4);
const TINT_DARK: Color = Color::Rgb(0xff, 0xff, 0xff);

lazy_static! {
    static ref LIGHT: ColorMap = ColorMap {
        text: Color::Rgb(0x11, 0x18, 0x1c),
        background: Color::Rgb(0xff, 0xff, 0xff),
        tint: TINT_LIGHT,
        icon: Color::Rgb(0x68, 0x70, 0x76),
        tab_icon_default: Color::Rgb(0x68, 0x70, 0x76),
        tab_icon_selected: TINT_LIGHT,
    };
    static ref DARK: ColorMap = ColorMap {
        text: Color::Rgb(0xec, 0xed, 0xee),
        background: Color::Rgb(0x15, 0x17, 0x18),
        tint: TINT_DARK,
        icon: Color::Rgb(0x9b, 0xa1, 0xa6),
        tab_icon_default: Color::Rgb(0x9b, 0xa1, 0xa6),
        tab_icon_selected: TINT_DARK,
    };
}

/// Resolve the color table for a scheme preference. An unset preference is light.
pub fn resolve(scheme: Option<ColorScheme>) -> &'static ColorMap {
    match scheme.unwrap_or_default() {
        ColorScheme::Light => &LIGHT,
        ColorScheme::Dark => &DARK,
    }
}
