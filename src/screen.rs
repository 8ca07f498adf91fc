//! Event routing across a form of widgets.
//!
//! [`FormScreen`] owns one dropdown and any number of inputs, tracks which
//! widget holds focus, and routes key/mouse events to it. It also enforces
//! the one cross-widget rule: a dropdown opening dismisses text-input
//! focus, the way a native picker dismisses the keyboard.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::{buffer::Buffer, layout::Rect};

use crate::theme::FormTheme;
use crate::ui::{DropDown, DropDownEvent, Input, InputEvent};

/// Fraction of the host width the widgets occupy, in percent.
const WIDGET_WIDTH_PCT: u16 = 78;
/// Blank rows between stacked widgets.
const WIDGET_GAP: u16 = 1;

/// Something a widget did that the host may care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The dropdown committed an option.
    SelectionMade(String),
    /// An input's text changed.
    InputChanged { index: usize, text: String },
    /// Enter was pressed on a single-line input.
    InputSubmitted { index: usize, text: String },
}

/// Focus ring position 0 is the dropdown; inputs follow in order.
pub struct FormScreen {
    dropdown: DropDown,
    inputs: Vec<Input>,
    focus: usize,
}

impl FormScreen {
    /// Build the screen. An input constructed with `auto_focus` receives
    /// the initial focus edge immediately.
    pub fn new(dropdown: DropDown, inputs: Vec<Input>, now: Instant) -> Self {
        let mut screen = Self {
            dropdown,
            inputs,
            focus: 0,
        };
        if let Some(index) = screen.inputs.iter().position(Input::auto_focus) {
            screen.focus = index + 1;
            screen.inputs[index].focus(now);
        }
        screen
    }

    pub fn dropdown(&self) -> &DropDown {
        &self.dropdown
    }

    pub fn dropdown_mut(&mut self) -> &mut DropDown {
        &mut self.dropdown
    }

    pub fn input(&self, index: usize) -> Option<&Input> {
        self.inputs.get(index)
    }

    pub fn input_mut(&mut self, index: usize) -> Option<&mut Input> {
        self.inputs.get_mut(index)
    }

    /// Index of the focused input, if an input (not the dropdown) has
    /// focus.
    pub fn focused_input(&self) -> Option<usize> {
        self.focus.checked_sub(1)
    }

    /// Forward the external reset signal to the dropdown.
    pub fn set_reset_signal(&mut self, signal: bool, now: Instant) {
        self.dropdown.set_reset_signal(signal, now);
    }

    /// Flip the external error flag on every widget.
    pub fn set_error(&mut self, is_error: bool) {
        self.dropdown.set_error(is_error);
        for input in &mut self.inputs {
            input.set_error(is_error);
        }
    }

    /// Route a key event to the focused widget.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<FormEvent> {
        match key.code {
            KeyCode::Tab => {
                self.cycle_focus(1, now);
                return None;
            }
            KeyCode::BackTab => {
                self.cycle_focus(-1, now);
                return None;
            }
            _ => {}
        }

        // An open list captures the keyboard until it closes.
        if self.dropdown.is_expanded() || self.focus == 0 {
            let event = self.dropdown.input(key, now);
            return self.apply_dropdown_event(event, now);
        }

        let index = self.focus - 1;
        let event = self.inputs[index].handle_key(key, now);
        Self::map_input_event(index, event)
    }

    /// Route a mouse event using the same layout the last frame rendered.
    pub fn handle_mouse(&mut self, event: MouseEvent, area: Rect, now: Instant) -> Option<FormEvent> {
        let (dropdown_rect, input_rects) = self.layout(area, now);

        // The dropdown renders on top, so it gets first claim.
        if self.dropdown.hit_test(event.column, event.row, dropdown_rect).is_some() {
            let dd_event = self.dropdown.mouse(event, dropdown_rect, now);
            return self.apply_dropdown_event(dd_event, now);
        }

        for (index, rect) in input_rects.iter().enumerate() {
            let inside = event.column >= rect.x
                && event.column < rect.x + rect.width
                && event.row >= rect.y
                && event.row < rect.y + rect.height;
            if inside {
                self.focus_input(index, now);
                return None;
            }
        }
        None
    }

    /// Route pasted text to the focused input.
    pub fn handle_paste(&mut self, text: &str, now: Instant) -> Option<FormEvent> {
        let index = self.focused_input()?;
        let event = self.inputs[index].insert_text(text, now);
        Self::map_input_event(index, event)
    }

    /// Move focus to input `index`, blurring whatever held it.
    pub fn focus_input(&mut self, index: usize, now: Instant) {
        if index >= self.inputs.len() {
            return;
        }
        for (i, input) in self.inputs.iter_mut().enumerate() {
            if i != index {
                input.blur(now);
            }
        }
        self.inputs[index].focus(now);
        self.focus = index + 1;
    }

    fn cycle_focus(&mut self, direction: i32, now: Instant) {
        // Moving focus away closes an open list.
        if self.dropdown.is_expanded() {
            self.dropdown.toggle(now);
        }

        if let Some(old) = self.focused_input() {
            self.inputs[old].blur(now);
        }

        let stops = self.inputs.len() + 1;
        let next = (self.focus as i32 + direction).rem_euclid(stops as i32) as usize;
        self.focus = next;

        if let Some(index) = self.focused_input() {
            self.inputs[index].focus(now);
        }
    }

    fn apply_dropdown_event(
        &mut self,
        event: Option<DropDownEvent>,
        now: Instant,
    ) -> Option<FormEvent> {
        match event? {
            DropDownEvent::Expanded => {
                // State committed first, then the keyboard goes away.
                for input in &mut self.inputs {
                    input.blur(now);
                }
                self.focus = 0;
                None
            }
            DropDownEvent::Collapsed => None,
            DropDownEvent::Selected(value) => Some(FormEvent::SelectionMade(value)),
        }
    }

    fn map_input_event(index: usize, event: Option<InputEvent>) -> Option<FormEvent> {
        match event? {
            InputEvent::Changed(text) => Some(FormEvent::InputChanged { index, text }),
            InputEvent::Submitted(text) => Some(FormEvent::InputSubmitted { index, text }),
        }
    }

    /// Stack the widgets vertically, centered, each at its preferred width
    /// or 78% of the host. The dropdown's slot tracks its growth animation
    /// so the inputs below slide down as the list opens.
    pub fn layout(&self, area: Rect, now: Instant) -> (Rect, Vec<Rect>) {
        let default_width =
            ((u32::from(area.width) * u32::from(WIDGET_WIDTH_PCT) / 100) as u16).max(8);
        let mut y = area.y + 1;

        let dd_width = self.dropdown.preferred_width().unwrap_or(default_width).min(area.width);
        let dd_height = self
            .dropdown
            .desired_height(now)
            .min(area.height.saturating_sub(y - area.y));
        let dropdown_rect = Rect {
            x: area.x + (area.width - dd_width) / 2,
            y,
            width: dd_width,
            height: dd_height,
        };
        y += dd_height + WIDGET_GAP;

        let mut input_rects = Vec::with_capacity(self.inputs.len());
        for input in &self.inputs {
            let width = input.preferred_width().unwrap_or(default_width).min(area.width);
            let height = input
                .desired_height()
                .min((area.y + area.height).saturating_sub(y));
            input_rects.push(Rect {
                x: area.x + (area.width - width) / 2,
                y,
                width,
                height,
            });
            y += height + WIDGET_GAP;
        }
        (dropdown_rect, input_rects)
    }

    /// Settle finished tweens and render every widget; the dropdown last so
    /// its open list draws over the field below it.
    pub fn render(&mut self, area: Rect, buf: &mut Buffer, now: Instant, theme: &FormTheme) {
        self.dropdown.settle(now);
        for input in &mut self.inputs {
            input.settle(now);
        }

        let (dropdown_rect, input_rects) = self.layout(area, now);
        for (input, rect) in self.inputs.iter().zip(&input_rects) {
            input.render(*rect, buf, now, theme);
        }
        self.dropdown.render(dropdown_rect, buf, now, theme);
    }
}
