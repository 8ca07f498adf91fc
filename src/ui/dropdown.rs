//! Single-select dropdown with an animated option list.
//!
//! Activating the header grows the option list over 200 ms while the
//! indicator sweeps from pointing down to pointing up. Selecting a row
//! collapses the list and reports the choice. An empty option list leaves
//! the widget rendered but inert.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::animation::{AnimationDriver, Easing};
use crate::style::{self, BorderEmphasis};
use crate::theme::FormTheme;

/// Height of the bordered header row.
pub const HEADER_HEIGHT: u16 = 3;
/// Height of one option row.
const OPTION_ROW_HEIGHT: u16 = 1;
/// Option counts at or below this get one row-height unit each.
const UNCAPPED_OPTION_COUNT: usize = 3;
/// List height cap once the option count exceeds `UNCAPPED_OPTION_COUNT`.
const CAPPED_LIST_HEIGHT: u16 = 4;
/// Internal scrolling turns on only beyond this option count.
const SCROLL_THRESHOLD: usize = 4;
/// Fixed expand/collapse timing.
const EXPAND_DURATION: Duration = Duration::from_millis(200);

/// Construction options for [`DropDown`].
#[derive(Debug, Clone, Default)]
pub struct DropDownConfig {
    /// Label shown while nothing is selected.
    pub placeholder: String,
    /// Mirror text alignment and the indicator anchor side.
    pub is_rtl: bool,
    /// Force the error border color, overriding focus emphasis.
    pub is_error: bool,
    /// Fixed width in the host layout; the host picks one otherwise.
    pub width: Option<u16>,
}

/// What a routed input event did to the dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropDownEvent {
    /// The list opened. The host should dismiss any text-input focus.
    Expanded,
    /// The list closed without a new selection.
    Collapsed,
    /// An option was committed (the list also closed).
    Selected(String),
}

/// Where a click landed on the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropDownHit {
    Header,
    Option(usize),
}

/// Single-select dropdown widget.
pub struct DropDown {
    config: DropDownConfig,
    options: Arc<[String]>,
    selected_value: String,
    is_expanded: bool,
    emphasis: BorderEmphasis,
    anim: AnimationDriver,
    /// Row the keyboard cursor sits on while expanded.
    highlighted: usize,
    /// First visible row when the list scrolls internally.
    scroll_offset: usize,
    last_reset_signal: bool,
    on_value_selected: Option<Box<dyn FnMut(&str)>>,
}

impl DropDown {
    pub fn new(config: DropDownConfig, options: Vec<String>) -> Self {
        Self {
            config,
            options: options.into(),
            selected_value: String::new(),
            is_expanded: false,
            emphasis: BorderEmphasis::Normal,
            anim: AnimationDriver::new(0.0),
            highlighted: 0,
            scroll_offset: 0,
            last_reset_signal: false,
            on_value_selected: None,
        }
    }

    /// Register the selection callback, invoked once per committed option.
    pub fn set_on_value_selected(&mut self, callback: Box<dyn FnMut(&str)>) {
        self.on_value_selected = Some(callback);
    }

    /// Width override from the construction options.
    pub fn preferred_width(&self) -> Option<u16> {
        self.config.width
    }

    /// An empty option list disables all interaction.
    pub fn is_disabled(&self) -> bool {
        self.options.is_empty()
    }

    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    /// The committed option, empty when nothing is selected yet.
    pub fn selected_value(&self) -> &str {
        &self.selected_value
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Header label: the selection if present, else the placeholder.
    pub fn display_label(&self) -> &str {
        if self.selected_value.is_empty() {
            &self.config.placeholder
        } else {
            &self.selected_value
        }
    }

    /// Update the external error flag.
    pub fn set_error(&mut self, is_error: bool) {
        self.config.is_error = is_error;
    }

    /// Flip between collapsed and expanded.
    ///
    /// State is committed before the animation retarget, so the visuals can
    /// never run ahead of the controller.
    pub fn toggle(&mut self, now: Instant) -> Option<DropDownEvent> {
        if self.is_disabled() {
            return None;
        }
        self.is_expanded = !self.is_expanded;
        if self.is_expanded {
            self.emphasis = BorderEmphasis::Focused;
            self.highlighted = self
                .options
                .iter()
                .position(|o| *o == self.selected_value)
                .unwrap_or(0);
            self.keep_highlight_visible();
            self.anim.animate_to(1.0, EXPAND_DURATION, Easing::DEFAULT, now);
            tracing::debug!("dropdown expanded ({} options)", self.options.len());
            Some(DropDownEvent::Expanded)
        } else {
            self.emphasis = BorderEmphasis::Normal;
            self.anim.animate_to(0.0, EXPAND_DURATION, Easing::DEFAULT, now);
            Some(DropDownEvent::Collapsed)
        }
    }

    /// Commit the option at `index` and collapse.
    pub fn select(&mut self, index: usize, now: Instant) -> Option<DropDownEvent> {
        if self.is_disabled() || !self.is_expanded {
            return None;
        }
        let option = self.options.get(index)?.clone();
        self.selected_value = option.clone();
        if let Some(callback) = self.on_value_selected.as_mut() {
            callback(&option);
        }
        tracing::debug!("dropdown selected {:?}", option);
        self.toggle(now);
        Some(DropDownEvent::Selected(option))
    }

    /// Edge-triggered external reset: on a false→true transition the
    /// selection clears and an expanded list collapses.
    pub fn set_reset_signal(&mut self, signal: bool, now: Instant) {
        let fired = signal && !self.last_reset_signal;
        self.last_reset_signal = signal;
        if !fired {
            return;
        }
        self.selected_value.clear();
        if self.is_expanded {
            self.toggle(now);
        }
        tracing::debug!("dropdown reset");
    }

    /// Fully expanded option-list height: one row per option up to three
    /// options, capped after that.
    pub fn list_height(&self) -> u16 {
        let count = self.options.len();
        if count > UNCAPPED_OPTION_COUNT {
            CAPPED_LIST_HEIGHT
        } else {
            count as u16 * OPTION_ROW_HEIGHT
        }
    }

    /// Internal scrolling only once the options outgrow the capped list.
    pub fn scroll_enabled(&self) -> bool {
        self.options.len() > SCROLL_THRESHOLD
    }

    /// Rows the widget wants at `now`: the header plus however much of the
    /// list the growth animation has revealed.
    pub fn desired_height(&self, now: Instant) -> u16 {
        let revealed =
            self.anim
                .interpolate(now, (0.0, 1.0), (0.0, f32::from(self.list_height())), true);
        HEADER_HEIGHT + revealed.round() as u16
    }

    /// Fold a finished expand/collapse tween. Called once per frame.
    pub fn settle(&mut self, now: Instant) {
        self.anim.settle(now);
    }

    /// Route a key event. Returns what it did, if anything.
    pub fn input(&mut self, key: KeyEvent, now: Instant) -> Option<DropDownEvent> {
        if self.is_disabled() {
            return None;
        }
        if !self.is_expanded {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.toggle(now),
                _ => None,
            };
        }
        match key.code {
            KeyCode::Esc => self.toggle(now),
            KeyCode::Enter => self.select(self.highlighted, now),
            KeyCode::Up => {
                self.highlighted = self.highlighted.saturating_sub(1);
                self.keep_highlight_visible();
                None
            }
            KeyCode::Down => {
                if self.highlighted + 1 < self.options.len() {
                    self.highlighted += 1;
                }
                self.keep_highlight_visible();
                None
            }
            _ => None,
        }
    }

    /// Route a mouse event given the rect the widget was last rendered in.
    pub fn mouse(&mut self, event: MouseEvent, area: Rect, now: Instant) -> Option<DropDownEvent> {
        if !matches!(event.kind, MouseEventKind::Down(MouseButton::Left)) {
            return None;
        }
        match self.hit_test(event.column, event.row, area)? {
            DropDownHit::Header => self.toggle(now),
            DropDownHit::Option(index) => self.select(index, now),
        }
    }

    /// Which part of the widget a click at `(x, y)` lands on, if any.
    /// Option rows only hit while the list is expanded.
    pub fn hit_test(&self, x: u16, y: u16, area: Rect) -> Option<DropDownHit> {
        if x < area.x || x >= area.x + area.width || y < area.y {
            return None;
        }
        if y < area.y + HEADER_HEIGHT {
            return Some(DropDownHit::Header);
        }
        if !self.is_expanded {
            return None;
        }
        let row = (y - area.y - HEADER_HEIGHT) as usize;
        if row >= self.list_height() as usize {
            return None;
        }
        let index = self.scroll_offset + row;
        if index < self.options.len() {
            Some(DropDownHit::Option(index))
        } else {
            None
        }
    }

    fn keep_highlight_visible(&mut self) {
        if !self.scroll_enabled() {
            self.scroll_offset = 0;
            return;
        }
        let window = CAPPED_LIST_HEIGHT as usize;
        if self.highlighted < self.scroll_offset {
            self.scroll_offset = self.highlighted;
        } else if self.highlighted >= self.scroll_offset + window {
            self.scroll_offset = self.highlighted + 1 - window;
        }
    }

    /// Indicator glyph from the interpolated rotation angle (0° points
    /// down, 180° points up).
    fn indicator_glyph(&self, now: Instant) -> char {
        let degrees = self.anim.interpolate(now, (0.0, 1.0), (0.0, 180.0), true);
        if degrees < 60.0 {
            '▼'
        } else if degrees < 120.0 {
            '►'
        } else {
            '▲'
        }
    }

    /// Render header and whatever part of the list the animation has
    /// revealed. The list overdraws content below the widget, so hosts
    /// render dropdowns last.
    pub fn render(&self, area: Rect, buf: &mut Buffer, now: Instant, theme: &FormTheme) {
        if area.width < 4 || area.height < HEADER_HEIGHT {
            return;
        }

        let frame = style::frame_style(
            self.emphasis,
            self.config.is_error,
            self.is_disabled(),
            self.config.is_rtl,
            theme,
        );

        let header_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: HEADER_HEIGHT,
        };
        Clear.render(header_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(frame.border)
            .style(ratatui::style::Style::default().bg(theme.background));
        let inner = block.inner(header_area);
        block.render(header_area, buf);

        // Header line: label on the text side, indicator on the anchor side.
        let (pad_left, pad_right) = style::header_padding(self.config.is_rtl);
        let glyph = self.indicator_glyph(now);
        let label_width = inner
            .width
            .saturating_sub(pad_left + pad_right + 2) as usize;
        let label = truncate(self.display_label(), label_width);
        let label_style = if self.selected_value.is_empty() {
            ratatui::style::Style::default().fg(theme.text_secondary)
        } else {
            frame.text
        };

        let spans = if self.config.is_rtl {
            vec![
                Span::raw(" ".repeat(pad_right as usize)),
                Span::styled(glyph.to_string(), frame.border),
                Span::styled(format!("{:>width$}", label, width = label_width), label_style),
                Span::raw(" ".repeat(pad_left as usize)),
            ]
        } else {
            vec![
                Span::raw(" ".repeat(pad_left as usize)),
                Span::styled(format!("{:<width$}", label, width = label_width), label_style),
                Span::styled(glyph.to_string(), frame.border),
                Span::raw(" ".repeat(pad_right as usize)),
            ]
        };
        Paragraph::new(Line::from(spans)).render(inner, buf);

        // Revealed slice of the option list.
        let revealed = self
            .anim
            .interpolate(now, (0.0, 1.0), (0.0, f32::from(self.list_height())), true)
            .round() as u16;
        let revealed = revealed
            .min(area.height.saturating_sub(HEADER_HEIGHT))
            .min(self.list_height());
        if revealed == 0 {
            return;
        }
        let fully_revealed = self.anim.is_settled(now) && self.is_expanded;

        let list_area = Rect {
            x: area.x,
            y: area.y + HEADER_HEIGHT,
            width: area.width,
            height: revealed,
        };
        Clear.render(list_area, buf);

        let mut lines = Vec::with_capacity(revealed as usize);
        for row in 0..revealed as usize {
            let index = self.scroll_offset + row;
            let Some(option) = self.options.get(index) else {
                break;
            };
            let row_style = style::option_row_style(
                *option == self.selected_value,
                self.is_expanded && index == self.highlighted,
                fully_revealed,
                theme,
            );
            let text = truncate(option, area.width.saturating_sub(2) as usize);
            lines.push(Line::from(vec![
                Span::raw(" "),
                Span::styled(format!("{:<width$}", text, width = area.width.saturating_sub(2) as usize), row_style),
                Span::raw(" "),
            ]));
        }
        Paragraph::new(lines)
            .style(ratatui::style::Style::default().bg(theme.background))
            .alignment(frame.alignment)
            .render(list_area, buf);
    }
}

/// Truncate to at most `width` characters, one row, no wrapping.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        text.chars().take(width.saturating_sub(1)).collect::<String>() + "…"
    }
}
