//! Floating-label text input.
//!
//! Wraps a [`tui_textarea::TextArea`] entry primitive and animates the
//! label between resting in the field (overlapping where text goes) and
//! floating on the top border. The label floats whenever the field is
//! focused or holds text, and only settles back down when both are false.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, BorderType, Borders, Clear, Widget},
};
use tui_textarea::TextArea;

use crate::animation::{AnimationDriver, Easing};
use crate::style::{self, BorderEmphasis};
use crate::theme::FormTheme;

/// Height of the bordered single-line field.
pub const FIELD_HEIGHT: u16 = 3;
/// Height of the bordered multiline field.
pub const MULTILINE_FIELD_HEIGHT: u16 = 5;
/// Character cap enforced under weight mode; oversize changes are dropped
/// wholesale, never truncated.
const WEIGHT_MAX_CHARS: usize = 10;
/// Fixed label float timing.
const FLOAT_DURATION: Duration = Duration::from_millis(150);

/// Keyboard hint carried for the host; the terminal has no soft keyboard,
/// so this is surfaced, not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyboardType {
    #[default]
    Default,
    Numeric,
    Email,
    Phone,
}

/// Construction options for [`Input`].
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    /// Label text; rests in the field while empty and unfocused.
    pub placeholder: String,
    /// Initial controlled value.
    pub value: String,
    /// Mirror text alignment and the label anchor side.
    pub is_rtl: bool,
    /// Force the error border/label color, overriding focus emphasis.
    pub is_error: bool,
    /// Mask entered characters.
    pub secure_entry: bool,
    /// Hard cap on entered characters; further insertion is ignored.
    pub max_length: Option<usize>,
    /// Multi-row editing (taller field, Enter inserts a newline).
    pub multiline: bool,
    /// Soft-keyboard hint, surfaced to the host.
    pub keyboard_type: KeyboardType,
    /// Platform content-type hint, surfaced to the host.
    pub content_type: Option<String>,
    /// Ask the host to focus this field at mount.
    pub auto_focus: bool,
    /// Weight-entry mode: silently reject changes past ten characters.
    pub is_weight: bool,
    /// Fixed width in the host layout; the host picks one otherwise.
    pub width: Option<u16>,
}

/// What a routed input event did to the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The text changed; carries the new value.
    Changed(String),
    /// Enter was pressed on a single-line field.
    Submitted(String),
}

/// Floating-label text input widget.
pub struct Input {
    config: InputConfig,
    textarea: TextArea<'static>,
    is_focused: bool,
    has_value: bool,
    emphasis: BorderEmphasis,
    label_anim: AnimationDriver,
    on_change_text: Option<Box<dyn FnMut(&str)>>,
}

impl Input {
    pub fn new(config: InputConfig) -> Self {
        let textarea = build_textarea(&config, &config.value);
        let has_value = !config.value.is_empty();
        let mut label_anim = AnimationDriver::new(0.0);
        if has_value {
            // A mounted value floats the label with no animation delay.
            label_anim.snap_to(1.0);
        }

        Self {
            config,
            textarea,
            is_focused: false,
            has_value,
            emphasis: BorderEmphasis::Normal,
            label_anim,
            on_change_text: None,
        }
    }

    /// Register the change callback, invoked once per accepted text change.
    pub fn set_on_change_text(&mut self, callback: Box<dyn FnMut(&str)>) {
        self.on_change_text = Some(callback);
    }

    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    pub fn has_value(&self) -> bool {
        self.has_value
    }

    /// Current text.
    pub fn value(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn keyboard_type(&self) -> KeyboardType {
        self.config.keyboard_type
    }

    pub fn content_type(&self) -> Option<&str> {
        self.config.content_type.as_deref()
    }

    pub fn auto_focus(&self) -> bool {
        self.config.auto_focus
    }

    /// Width override from the construction options.
    pub fn preferred_width(&self) -> Option<u16> {
        self.config.width
    }

    /// Update the external error flag.
    pub fn set_error(&mut self, is_error: bool) {
        self.config.is_error = is_error;
    }

    /// Focus edge: emphasis rises and an empty field floats its label.
    pub fn focus(&mut self, now: Instant) {
        if self.is_focused {
            return;
        }
        self.is_focused = true;
        self.emphasis = BorderEmphasis::Focused;
        self.textarea
            .set_cursor_style(Style::default().add_modifier(ratatui::style::Modifier::REVERSED));
        if !self.has_value {
            self.label_anim
                .animate_to(1.0, FLOAT_DURATION, Easing::Linear, now);
        }
        tracing::trace!("input focused");
    }

    /// Blur edge: emphasis drops and an empty field lowers its label.
    pub fn blur(&mut self, now: Instant) {
        if !self.is_focused {
            return;
        }
        self.is_focused = false;
        self.emphasis = BorderEmphasis::Normal;
        self.textarea.set_cursor_style(Style::default());
        if !self.has_value {
            self.label_anim
                .animate_to(0.0, FLOAT_DURATION, Easing::Linear, now);
        }
        tracing::trace!("input blurred");
    }

    /// Controlled-value update from the owner.
    ///
    /// A non-empty value arriving while the label rests floats it; an empty
    /// value arriving while floated and unfocused lowers it. The owner is
    /// not re-notified.
    pub fn set_value(&mut self, text: &str, now: Instant) {
        if text == self.value() {
            return;
        }
        self.textarea = build_textarea(&self.config, text);
        if self.is_focused {
            self.textarea.set_cursor_style(
                Style::default().add_modifier(ratatui::style::Modifier::REVERSED),
            );
        }
        self.has_value = !text.is_empty();

        if self.has_value && self.label_anim.target() < 1.0 {
            self.label_anim
                .animate_to(1.0, FLOAT_DURATION, Easing::Linear, now);
        } else if !self.has_value && self.label_anim.target() > 0.0 && !self.is_focused {
            self.label_anim
                .animate_to(0.0, FLOAT_DURATION, Easing::Linear, now);
        }
    }

    /// Route a key event to the entry primitive, subject to the caps.
    pub fn handle_key(&mut self, key: KeyEvent, _now: Instant) -> Option<InputEvent> {
        if !self.is_focused {
            return None;
        }

        match key.code {
            KeyCode::Enter if !self.config.multiline => {
                return Some(InputEvent::Submitted(self.value()));
            }
            KeyCode::Enter => {
                if self.rejects_insertion(1) {
                    return None;
                }
                self.textarea.insert_newline();
                return self.after_edit();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.rejects_insertion(1) {
                    return None;
                }
                self.textarea.insert_char(c);
                return self.after_edit();
            }
            _ => {}
        }

        // Everything else (backspace, delete, cursor motion, selections)
        // goes straight to the primitive.
        let before = self.value();
        self.textarea.input(key);
        let after = self.value();
        if after == before {
            None
        } else {
            self.after_edit()
        }
    }

    /// Paste `text` at the cursor, subject to the caps.
    pub fn insert_text(&mut self, text: &str, _now: Instant) -> Option<InputEvent> {
        if !self.is_focused || text.is_empty() {
            return None;
        }
        if self.rejects_insertion(text.chars().count()) {
            return None;
        }
        self.textarea.insert_str(text);
        self.after_edit()
    }

    /// Fold a finished label tween. Called once per frame.
    pub fn settle(&mut self, now: Instant) {
        self.label_anim.settle(now);
    }

    /// Rows the widget wants in the host layout.
    pub fn desired_height(&self) -> u16 {
        if self.config.multiline {
            MULTILINE_FIELD_HEIGHT
        } else {
            FIELD_HEIGHT
        }
    }

    /// Whether a change growing the text by `added` characters is dropped.
    ///
    /// Weight mode rejects the whole change past its cap; `max_length` is
    /// the primitive's stop-typing cap. Neither truncates.
    fn rejects_insertion(&self, added: usize) -> bool {
        let next = self.value().chars().count() + added;
        if self.config.is_weight && next > WEIGHT_MAX_CHARS {
            tracing::trace!("weight cap hit, change dropped");
            return true;
        }
        if let Some(max) = self.config.max_length {
            if next > max {
                return true;
            }
        }
        false
    }

    fn after_edit(&mut self) -> Option<InputEvent> {
        let text = self.value();
        self.has_value = !text.is_empty();
        // The floated position is only re-evaluated on focus/blur edges;
        // while focused the label is already up.
        if let Some(callback) = self.on_change_text.as_mut() {
            callback(&text);
        }
        Some(InputEvent::Changed(text))
    }

    /// Render the bordered field, the entry text, and the label at its
    /// interpolated float position.
    pub fn render(&self, area: Rect, buf: &mut Buffer, now: Instant, theme: &FormTheme) {
        if area.width < 4 || area.height < FIELD_HEIGHT {
            return;
        }

        let field_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: self.desired_height().min(area.height),
        };
        Clear.render(field_area, buf);

        let frame = style::frame_style(
            self.emphasis,
            self.config.is_error,
            false,
            self.config.is_rtl,
            theme,
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(frame.border)
            .style(Style::default().bg(theme.background));
        let inner = block.inner(field_area);
        block.render(field_area, buf);

        (&self.textarea).render(inner, buf);

        // Label position: row 1 resting in the field, row 0 floated onto
        // the top border, interpolated between them while the tween runs.
        let row_offset = self
            .label_anim
            .interpolate(now, (0.0, 1.0), (1.0, 0.0), true)
            .round() as u16;
        let floated = self.label_anim.progress(now) >= 0.5;
        let label_style = style::label_style(floated, self.config.is_error, theme)
            .bg(theme.background);

        let label_y = field_area.y + row_offset;
        let max_label = field_area.width.saturating_sub(4) as usize;
        let mut label: String = self.config.placeholder.chars().take(max_label).collect();
        if floated && !label.is_empty() {
            label = format!(" {} ", label);
        }
        if label.is_empty() {
            return;
        }
        let label_x = if self.config.is_rtl {
            field_area.x + field_area.width - 2 - label.chars().count() as u16
        } else {
            field_area.x + 2
        };
        // While resting, the label only shows when it is not covering text.
        if floated || !self.has_value {
            buf.set_string(label_x, label_y, &label, label_style);
        }
    }
}

/// Build the entry primitive with the construction options applied.
fn build_textarea(config: &InputConfig, text: &str) -> TextArea<'static> {
    let lines: Vec<String> = if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').map(str::to_string).collect()
    };
    let mut textarea = TextArea::new(lines);
    textarea.set_cursor_line_style(Style::default());
    textarea.set_cursor_style(Style::default());
    textarea.set_alignment(style::text_alignment(config.is_rtl));
    if config.secure_entry {
        textarea.set_mask_char('•');
    }
    textarea.move_cursor(tui_textarea::CursorMove::Bottom);
    textarea.move_cursor(tui_textarea::CursorMove::End);
    textarea
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn key(c: char) -> KeyEvent {
        KeyEvent::from(KeyCode::Char(c))
    }

    fn typed(input: &mut Input, text: &str, now: Instant) {
        for c in text.chars() {
            input.handle_key(key(c), now);
        }
    }

    #[test]
    fn test_focus_floats_empty_label() {
        let now = Instant::now();
        let mut input = Input::new(InputConfig::default());
        assert_eq!(input.label_anim.target(), 0.0);

        input.focus(now);
        assert!(input.is_focused());
        assert_eq!(input.label_anim.target(), 1.0);

        input.blur(now);
        assert!(!input.is_focused());
        assert_eq!(input.label_anim.target(), 0.0);
    }

    #[test]
    fn test_blur_keeps_label_floated_with_value() {
        let now = Instant::now();
        let mut input = Input::new(InputConfig::default());
        input.focus(now);
        typed(&mut input, "a", now);
        assert!(input.has_value());

        input.blur(now);
        assert_eq!(input.label_anim.target(), 1.0);
    }

    #[test]
    fn test_mount_with_value_floats_without_animation() {
        let now = Instant::now();
        let input = Input::new(InputConfig {
            value: "prefilled".to_string(),
            ..InputConfig::default()
        });
        // Snapped, not animated: already settled at 1 with no frames run.
        assert_eq!(input.label_anim.progress(now), 1.0);
        assert!(input.label_anim.is_settled(now));
        assert!(input.has_value());
        assert_eq!(input.value(), "prefilled");
    }

    #[test]
    fn test_mount_empty_stays_unfloated() {
        let now = Instant::now();
        let input = Input::new(InputConfig::default());
        assert_eq!(input.label_anim.progress(now), 0.0);
        assert!(!input.has_value());
    }

    #[test]
    fn test_text_change_propagates_to_owner() {
        let now = Instant::now();
        let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut input = Input::new(InputConfig::default());
        input.set_on_change_text(Box::new(move |text| {
            sink.borrow_mut().push(text.to_string());
        }));

        input.focus(now);
        typed(&mut input, "hi", now);
        assert_eq!(*seen.borrow(), vec!["h".to_string(), "hi".to_string()]);
    }

    #[test]
    fn test_missing_callback_is_silent() {
        let now = Instant::now();
        let mut input = Input::new(InputConfig::default());
        input.focus(now);
        let event = input.handle_key(key('x'), now);
        assert_eq!(event, Some(InputEvent::Changed("x".to_string())));
        assert_eq!(input.value(), "x");
    }

    #[test]
    fn test_weight_cap_rejects_eleventh_char() {
        let now = Instant::now();
        let calls: Rc<RefCell<usize>> = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);

        let mut input = Input::new(InputConfig {
            is_weight: true,
            ..InputConfig::default()
        });
        input.set_on_change_text(Box::new(move |_| {
            *counter.borrow_mut() += 1;
        }));
        input.focus(now);

        typed(&mut input, "0123456789", now);
        assert_eq!(input.value(), "0123456789");
        assert_eq!(*calls.borrow(), 10);

        // The eleventh character is dropped wholesale: no state change, no
        // callback, no truncation.
        let event = input.handle_key(key('9'), now);
        assert_eq!(event, None);
        assert_eq!(input.value(), "0123456789");
        assert!(input.has_value());
        assert_eq!(*calls.borrow(), 10);
    }

    #[test]
    fn test_weight_cap_rejects_oversize_paste() {
        let now = Instant::now();
        let mut input = Input::new(InputConfig {
            is_weight: true,
            ..InputConfig::default()
        });
        input.focus(now);
        typed(&mut input, "123456", now);

        assert_eq!(input.insert_text("7890123", now), None);
        assert_eq!(input.value(), "123456");

        assert!(input.insert_text("7890", now).is_some());
        assert_eq!(input.value(), "1234567890");
    }

    #[test]
    fn test_max_length_stops_typing() {
        let now = Instant::now();
        let mut input = Input::new(InputConfig {
            max_length: Some(3),
            ..InputConfig::default()
        });
        input.focus(now);
        typed(&mut input, "abcd", now);
        assert_eq!(input.value(), "abc");
    }

    #[test]
    fn test_deletion_always_allowed_at_cap() {
        let now = Instant::now();
        let mut input = Input::new(InputConfig {
            is_weight: true,
            ..InputConfig::default()
        });
        input.focus(now);
        typed(&mut input, "0123456789", now);

        let event = input.handle_key(KeyEvent::from(KeyCode::Backspace), now);
        assert_eq!(event, Some(InputEvent::Changed("012345678".to_string())));
    }

    #[test]
    fn test_submit_on_single_line_enter() {
        let now = Instant::now();
        let mut input = Input::new(InputConfig::default());
        input.focus(now);
        typed(&mut input, "go", now);
        let event = input.handle_key(KeyEvent::from(KeyCode::Enter), now);
        assert_eq!(event, Some(InputEvent::Submitted("go".to_string())));
    }

    #[test]
    fn test_multiline_enter_inserts_newline() {
        let now = Instant::now();
        let mut input = Input::new(InputConfig {
            multiline: true,
            ..InputConfig::default()
        });
        input.focus(now);
        typed(&mut input, "ab", now);
        input.handle_key(KeyEvent::from(KeyCode::Enter), now);
        typed(&mut input, "cd", now);
        assert_eq!(input.value(), "ab\ncd");
    }

    #[test]
    fn test_set_value_reconciliation() {
        let now = Instant::now();
        let mut input = Input::new(InputConfig::default());

        // Owner pushes a value while the label rests: it floats.
        input.set_value("owner text", now);
        assert!(input.has_value());
        assert_eq!(input.label_anim.target(), 1.0);

        // Owner clears it while unfocused: it lowers.
        input.set_value("", now);
        assert!(!input.has_value());
        assert_eq!(input.label_anim.target(), 0.0);

        // Cleared while focused: stays floated for the focus.
        input.focus(now);
        input.set_value("x", now);
        input.set_value("", now);
        assert_eq!(input.label_anim.target(), 1.0);
    }

    #[test]
    fn test_unfocused_field_ignores_keys() {
        let now = Instant::now();
        let mut input = Input::new(InputConfig::default());
        assert_eq!(input.handle_key(key('a'), now), None);
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_focus_edges_are_idempotent() {
        let start = Instant::now();
        let mut input = Input::new(InputConfig::default());
        input.focus(start);
        let settled = start + Duration::from_millis(200);
        input.settle(settled);

        // A second focus() must not restart the finished tween.
        input.focus(settled);
        assert!(input.label_anim.is_settled(settled));
        assert_eq!(input.label_anim.progress(settled), 1.0);
    }

    #[test]
    fn test_render_smoke_floated_and_resting() {
        let start = Instant::now();
        let theme = FormTheme::dark();
        let area = Rect::new(0, 0, 24, 3);

        // Resting: the label sits inside the field.
        let input = Input::new(InputConfig {
            placeholder: "Name".to_string(),
            ..InputConfig::default()
        });
        let mut buf = Buffer::empty(area);
        input.render(area, &mut buf, start, &theme);
        let row1: String = (0..24).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row1.contains("Name"));

        // Floated: the label moves onto the top border.
        let mut input = Input::new(InputConfig {
            placeholder: "Name".to_string(),
            value: "Ada".to_string(),
            ..InputConfig::default()
        });
        input.settle(start);
        let mut buf = Buffer::empty(area);
        input.render(area, &mut buf, start, &theme);
        let row0: String = (0..24).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(row0.contains("Name"));
    }

    #[test]
    fn test_secure_entry_masks_rendered_text() {
        let start = Instant::now();
        let theme = FormTheme::dark();
        let area = Rect::new(0, 0, 24, 3);

        let mut input = Input::new(InputConfig {
            placeholder: "Password".to_string(),
            secure_entry: true,
            ..InputConfig::default()
        });
        input.focus(start);
        typed(&mut input, "secret", start);

        let mut buf = Buffer::empty(area);
        input.render(area, &mut buf, start, &theme);
        let row1: String = (0..24).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(!row1.contains("secret"));
        assert!(row1.contains('•'));
    }
}
