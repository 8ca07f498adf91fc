//! Pure style computation for the form widgets.
//!
//! Every function here maps `(state, config, theme)` to a ready-to-render
//! descriptor, evaluated fresh each frame. Nothing is cached or mutated
//! between renders.

use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};

use crate::theme::FormTheme;

/// Visual emphasis of a widget border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderEmphasis {
    #[default]
    Normal,
    Focused,
    Error,
}

impl BorderEmphasis {
    /// Resolve against the external error flag: error always wins visually.
    pub fn resolve(self, is_error: bool) -> BorderEmphasis {
        if is_error {
            BorderEmphasis::Error
        } else {
            self
        }
    }
}

/// Computed chrome for a widget frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameStyle {
    pub border: Style,
    pub text: Style,
    pub alignment: Alignment,
}

/// Frame chrome from controller state.
pub fn frame_style(
    emphasis: BorderEmphasis,
    is_error: bool,
    disabled: bool,
    is_rtl: bool,
    theme: &FormTheme,
) -> FrameStyle {
    let border_color = match emphasis.resolve(is_error) {
        BorderEmphasis::Normal => theme.border_normal,
        BorderEmphasis::Focused => theme.border_focused,
        BorderEmphasis::Error => theme.border_error,
    };

    let mut border = Style::default().fg(border_color);
    let mut text = Style::default().fg(theme.text_primary);
    if disabled {
        border = border.add_modifier(Modifier::DIM);
        text = Style::default().fg(theme.text_disabled);
    }

    FrameStyle {
        border,
        text,
        alignment: text_alignment(is_rtl),
    }
}

/// Text alignment mirrored under RTL.
pub fn text_alignment(is_rtl: bool) -> Alignment {
    if is_rtl {
        Alignment::Right
    } else {
        Alignment::Left
    }
}

/// Horizontal padding `(left, right)` in columns, anchor side mirrored
/// under RTL.
pub fn header_padding(is_rtl: bool) -> (u16, u16) {
    if is_rtl {
        (2, 1)
    } else {
        (1, 2)
    }
}

/// Style for one dropdown option row.
///
/// `revealed` is false while the reveal animation is still in flight; rows
/// render dimmed until the list has fully faded in.
pub fn option_row_style(
    is_selected: bool,
    is_highlighted: bool,
    revealed: bool,
    theme: &FormTheme,
) -> Style {
    let mut style = if is_selected {
        Style::default()
            .fg(theme.option_selected)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.option_text)
    };
    if is_highlighted {
        style = style.bg(theme.option_highlight_bg);
    }
    if !revealed {
        style = style.add_modifier(Modifier::DIM);
    }
    style
}

/// Floating-label style.
///
/// The floated label renders in the accent color; the resting label sits in
/// the field like a placeholder. The error flag overrides both.
pub fn label_style(floated: bool, is_error: bool, theme: &FormTheme) -> Style {
    if is_error {
        return Style::default().fg(theme.label_error);
    }
    if floated {
        Style::default()
            .fg(theme.label_floated)
            .add_modifier(Modifier::ITALIC)
    } else {
        Style::default().fg(theme.label)
    }
}
