//! Widget theme system.
//!
//! A [`FormTheme`] names every color the form widgets draw with. Built-in
//! themes live here; extra themes ship as TOML files embedded in the binary
//! and users can drop their own under the themes directory.

use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Complete theme for the form widgets.
#[derive(Debug, Clone)]
pub struct FormTheme {
    pub name: String,

    // Borders, by emphasis
    pub border_normal: Color,
    pub border_focused: Color,
    pub border_error: Color,

    // Text
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_disabled: Color,

    // Floating label
    pub label: Color,
    pub label_floated: Color,
    pub label_error: Color,

    // Dropdown option rows
    pub option_text: Color,
    pub option_selected: Color,
    pub option_highlight_bg: Color,

    pub background: Color,
}

impl FormTheme {
    pub fn dark() -> FormTheme {
        FormTheme {
            name: "dark".to_string(),

            border_normal: Color::DarkGray,
            border_focused: Color::Rgb(218, 45, 126),
            border_error: Color::Rgb(204, 0, 0),

            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_disabled: Color::DarkGray,

            label: Color::Gray,
            label_floated: Color::Rgb(218, 45, 126),
            label_error: Color::Rgb(204, 0, 0),

            option_text: Color::White,
            option_selected: Color::Yellow,
            option_highlight_bg: Color::Rgb(40, 40, 40),

            background: Color::Black,
        }
    }

    pub fn light() -> FormTheme {
        FormTheme {
            name: "light".to_string(),

            border_normal: Color::Gray,
            border_focused: Color::Rgb(22, 30, 144),
            border_error: Color::Rgb(204, 0, 0),

            text_primary: Color::Black,
            text_secondary: Color::DarkGray,
            text_disabled: Color::Gray,

            label: Color::DarkGray,
            label_floated: Color::Rgb(22, 30, 144),
            label_error: Color::Rgb(204, 0, 0),

            option_text: Color::Black,
            option_selected: Color::Rgb(22, 30, 144),
            option_highlight_bg: Color::Rgb(220, 220, 220),

            background: Color::White,
        }
    }

    /// Look up a built-in theme by name.
    pub fn builtin(name: &str) -> Option<FormTheme> {
        match name.to_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// Parse a theme from its TOML representation.
    pub fn from_toml_str(raw: &str) -> Result<FormTheme> {
        let file: ThemeFile = toml::from_str(raw).context("Failed to parse theme TOML")?;
        file.into_theme()
    }
}

impl Default for FormTheme {
    fn default() -> Self {
        Self::dark()
    }
}

/// On-disk theme representation: colors as hex or named strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeFile {
    pub name: String,
    pub border_normal: String,
    pub border_focused: String,
    pub border_error: String,
    pub text_primary: String,
    pub text_secondary: String,
    pub text_disabled: String,
    pub label: String,
    pub label_floated: String,
    pub label_error: String,
    pub option_text: String,
    pub option_selected: String,
    pub option_highlight_bg: String,
    pub background: String,
}

impl ThemeFile {
    fn into_theme(self) -> Result<FormTheme> {
        let theme_name = self.name.clone();
        let resolve = move |field: &str, value: &str| -> Result<Color> {
            parse_color(value).with_context(|| {
                format!("Theme '{}': bad color '{}' for {}", theme_name, value, field)
            })
        };

        Ok(FormTheme {
            border_normal: resolve("border_normal", &self.border_normal)?,
            border_focused: resolve("border_focused", &self.border_focused)?,
            border_error: resolve("border_error", &self.border_error)?,
            text_primary: resolve("text_primary", &self.text_primary)?,
            text_secondary: resolve("text_secondary", &self.text_secondary)?,
            text_disabled: resolve("text_disabled", &self.text_disabled)?,
            label: resolve("label", &self.label)?,
            label_floated: resolve("label_floated", &self.label_floated)?,
            label_error: resolve("label_error", &self.label_error)?,
            option_text: resolve("option_text", &self.option_text)?,
            option_selected: resolve("option_selected", &self.option_selected)?,
            option_highlight_bg: resolve("option_highlight_bg", &self.option_highlight_bg)?,
            background: resolve("background", &self.background)?,
            name: self.name,
        })
    }
}

/// Parse a color string: "#rrggbb" hex or a named terminal color.
pub fn parse_color(color_str: &str) -> Option<Color> {
    if let Some(hex) = color_str.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }

    match color_str.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "white" => Some(Color::White),
        _ => None,
    }
}
