//! Animated form input widgets for ratatui.
//!
//! Two widgets share one pattern: a focus/expansion controller owns the
//! discrete state, an [`AnimationDriver`](animation::AnimationDriver)
//! advances a [0, 1] progress value toward the controller's target, and the
//! render path maps that progress onto rows, glyphs, and styles each frame.
//!
//! - [`ui::DropDown`]: single-select dropdown whose option list grows open
//!   over 200 ms while the indicator sweeps from ▼ to ▲.
//! - [`ui::Input`]: text field whose label floats from inside the field up
//!   onto the border whenever it is focused or holds text.
//!
//! [`screen::FormScreen`] routes events between widgets; the `formglide`
//! binary is a small demo form.

pub mod animation;
pub mod app;
pub mod config;
pub mod screen;
pub mod style;
pub mod theme;
pub mod ui;

pub use animation::{AnimationDriver, Easing};
pub use screen::{FormEvent, FormScreen};
pub use style::BorderEmphasis;
pub use theme::FormTheme;
pub use ui::{DropDown, DropDownConfig, DropDownEvent, Input, InputConfig, InputEvent, KeyboardType};
