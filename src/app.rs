//! Demo application shell.
//!
//! Sets the terminal up, runs the poll-driven frame loop, and wires a small
//! sample form: one dropdown and four inputs covering the plain, secure,
//! weight-capped, and multiline variants.

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Paragraph},
    Frame, Terminal,
};

use crate::config::Config;
use crate::screen::{FormEvent, FormScreen};
use crate::theme::FormTheme;
use crate::ui::{DropDown, DropDownConfig, Input, InputConfig, KeyboardType};

const TITLE: &str = " formglide ";
const HELP: &str = " Tab next field · Enter open/select · F5 reset · F2 error · Ctrl+Q quit ";

/// Terminal wrapper that restores the screen even on an error path.
struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl Tui {
    fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }

    fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Demo application state.
pub struct App {
    screen: FormScreen,
    theme: FormTheme,
    error_flag: bool,
    status: String,
}

impl App {
    pub fn new(config: &Config, theme: FormTheme, now: Instant) -> Self {
        Self {
            screen: build_form(config, now),
            theme,
            error_flag: false,
            status: String::new(),
        }
    }

    /// Handle an app-level key; returns true when the app should quit.
    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('c')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                return true;
            }
            KeyCode::F(2) => {
                self.error_flag = !self.error_flag;
                self.screen.set_error(self.error_flag);
                self.status = if self.error_flag {
                    "error flag on".to_string()
                } else {
                    "error flag off".to_string()
                };
            }
            KeyCode::F(5) => {
                // Pulse the edge-triggered reset signal.
                self.screen.set_reset_signal(true, now);
                self.screen.set_reset_signal(false, now);
                self.status = "form reset".to_string();
            }
            _ => {
                if let Some(event) = self.screen.handle_key(key, now) {
                    self.note(event);
                }
            }
        }
        false
    }

    fn note(&mut self, event: FormEvent) {
        self.status = match event {
            FormEvent::SelectionMade(value) => format!("selected {:?}", value),
            FormEvent::InputChanged { index, text } => {
                format!("field {} -> {:?}", index, text)
            }
            FormEvent::InputSubmitted { index, text } => {
                format!("field {} submitted {:?}", index, text)
            }
        };
    }

    /// Rect the form occupies: everything between the title and status rows.
    fn form_area(total: Rect) -> Rect {
        Rect {
            x: total.x,
            y: total.y + 1,
            width: total.width,
            height: total.height.saturating_sub(2),
        }
    }

    fn draw(&mut self, frame: &mut Frame<'_>, now: Instant) {
        let total = frame.area();
        let background = Block::default().style(Style::default().bg(self.theme.background));
        frame.render_widget(background, total);

        let title = Line::from(format!("{}·{}", TITLE, HELP))
            .style(Style::default().fg(self.theme.text_secondary));
        frame.render_widget(Paragraph::new(title), Rect { height: 1, ..total });

        self.screen
            .render(Self::form_area(total), frame.buffer_mut(), now, &self.theme);

        if total.height > 1 {
            let status_area = Rect {
                x: total.x,
                y: total.y + total.height - 1,
                width: total.width,
                height: 1,
            };
            let status = Paragraph::new(Line::from(format!(" {}", self.status)))
                .style(Style::default().fg(self.theme.text_secondary));
            frame.render_widget(status, status_area);
        }
    }
}

/// Wire the sample form from the demo configuration.
fn build_form(config: &Config, now: Instant) -> FormScreen {
    let dropdown = DropDown::new(
        DropDownConfig {
            placeholder: config.demo.dropdown_placeholder.clone(),
            is_rtl: config.rtl,
            ..DropDownConfig::default()
        },
        config.demo.options.clone(),
    );

    let inputs = vec![
        Input::new(InputConfig {
            placeholder: "Name".to_string(),
            is_rtl: config.rtl,
            auto_focus: true,
            ..InputConfig::default()
        }),
        Input::new(InputConfig {
            placeholder: "Password".to_string(),
            is_rtl: config.rtl,
            secure_entry: true,
            content_type: Some("password".to_string()),
            ..InputConfig::default()
        }),
        Input::new(InputConfig {
            placeholder: "Weight (kg)".to_string(),
            is_rtl: config.rtl,
            is_weight: true,
            keyboard_type: KeyboardType::Numeric,
            ..InputConfig::default()
        }),
        Input::new(InputConfig {
            placeholder: "Notes".to_string(),
            is_rtl: config.rtl,
            multiline: true,
            ..InputConfig::default()
        }),
    ];

    FormScreen::new(dropdown, inputs, now)
}

/// Run the demo until the user quits.
pub fn run(config: &Config, theme: FormTheme) -> Result<()> {
    let mut tui = Tui::new()?;
    let poll_timeout = Duration::from_millis(config.tick_rate_ms.max(1));
    let mut app = App::new(config, theme, Instant::now());

    loop {
        let now = Instant::now();
        tui.terminal.draw(|frame| app.draw(frame, now))?;

        while event::poll(poll_timeout)? {
            let now = Instant::now();
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key, now) {
                        tui.cleanup()?;
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => {
                    let area = App::form_area(Rect {
                        x: 0,
                        y: 0,
                        width: tui.terminal.size()?.width,
                        height: tui.terminal.size()?.height,
                    });
                    if let Some(event) = app.screen.handle_mouse(mouse, area, now) {
                        app.note(event);
                    }
                }
                Event::Paste(text) => {
                    if let Some(event) = app.screen.handle_paste(&text, now) {
                        app.note(event);
                    }
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_form_from_config() {
        let now = Instant::now();
        let config = Config::default();
        let form = build_form(&config, now);

        assert_eq!(form.dropdown().options().len(), 5);
        assert_eq!(form.dropdown().display_label(), "Select a city");
        // The name field auto-focuses at mount.
        assert_eq!(form.focused_input(), Some(0));
        assert!(form.input(3).is_some());
        assert!(form.input(4).is_none());
    }

    #[test]
    fn test_form_area_reserves_title_and_status() {
        let total = Rect::new(0, 0, 80, 24);
        let area = App::form_area(total);
        assert_eq!(area.y, 1);
        assert_eq!(area.height, 22);
    }

    #[test]
    fn test_reset_pulse_clears_selection() {
        let now = Instant::now();
        let config = Config::default();
        let mut app = App::new(&config, FormTheme::dark(), now);

        app.screen.dropdown_mut().toggle(now);
        app.screen.dropdown_mut().select(0, now);
        assert_eq!(app.screen.dropdown().selected_value(), "Tel Aviv");

        app.handle_key(KeyEvent::from(KeyCode::F(5)), now);
        assert_eq!(app.screen.dropdown().selected_value(), "");

        // The pulse re-arms the edge: a second reset works too.
        app.screen.dropdown_mut().toggle(now);
        app.screen.dropdown_mut().select(1, now);
        app.handle_key(KeyEvent::from(KeyCode::F(5)), now);
        assert_eq!(app.screen.dropdown().selected_value(), "");
    }
}
