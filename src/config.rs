//! Demo application configuration.
//!
//! Deserializes the demo's TOML settings, with defaults embedded at compile
//! time. A user copy lives under `~/.formglide/` (or `$FORMGLIDE_DIR`),
//! alongside a `themes/` directory for custom theme files.

use anyhow::{bail, Context, Result};
use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::theme::FormTheme;

// Embedded defaults; the app runs with no files on disk at all.
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");
static THEMES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/defaults/themes");

/// Top-level demo configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Theme name resolved through [`Config::resolve_theme`].
    #[serde(default = "default_theme_name")]
    pub active_theme: String,
    /// Frame poll interval in milliseconds.
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Mirror the form for right-to-left locales.
    #[serde(default)]
    pub rtl: bool,
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Contents of the demo form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DemoConfig {
    #[serde(default = "default_dropdown_placeholder")]
    pub dropdown_placeholder: String,
    #[serde(default = "default_options")]
    pub options: Vec<String>,
}

fn default_theme_name() -> String {
    "dark".to_string()
}

fn default_tick_rate() -> u64 {
    16
}

fn default_dropdown_placeholder() -> String {
    "Select a city".to_string()
}

fn default_options() -> Vec<String> {
    [
        "Tel Aviv",
        "Haifa",
        "Jerusalem",
        "Beer Sheva",
        "Eilat",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            active_theme: default_theme_name(),
            tick_rate_ms: default_tick_rate(),
            rtl: false,
            demo: DemoConfig::default(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            dropdown_placeholder: default_dropdown_placeholder(),
            options: default_options(),
        }
    }
}

impl Config {
    /// Data directory: `$FORMGLIDE_DIR` if set, else `~/.formglide`.
    pub fn base_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("FORMGLIDE_DIR") {
            return Ok(PathBuf::from(dir));
        }
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".formglide"))
    }

    /// User themes directory: `<base>/themes`.
    pub fn themes_dir() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("themes"))
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Otherwise the user file is read when
    /// present, and the embedded defaults apply when it is not.
    pub fn load(path: Option<PathBuf>) -> Result<Config> {
        let raw = match path {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?
            }
            None => {
                let user_path = Self::base_dir()?.join("config.toml");
                if user_path.exists() {
                    tracing::debug!("loading config from {}", user_path.display());
                    fs::read_to_string(&user_path)
                        .with_context(|| format!("Failed to read {}", user_path.display()))?
                } else {
                    DEFAULT_CONFIG.to_string()
                }
            }
        };

        toml::from_str(&raw).context("Failed to parse config TOML")
    }

    /// Resolve a theme name: user theme file, then an embedded theme file,
    /// then the built-ins, falling back to the dark theme.
    pub fn resolve_theme(&self, name_override: Option<&str>) -> FormTheme {
        let name = name_override.unwrap_or(&self.active_theme);
        let file_name = format!("{}.toml", name.to_lowercase());

        if let Ok(themes_dir) = Self::themes_dir() {
            let path = themes_dir.join(&file_name);
            if path.exists() {
                match fs::read_to_string(&path)
                    .map_err(anyhow::Error::from)
                    .and_then(|raw| FormTheme::from_toml_str(&raw))
                {
                    Ok(theme) => return theme,
                    Err(err) => {
                        tracing::warn!("ignoring broken theme {}: {:#}", path.display(), err);
                    }
                }
            }
        }

        if let Some(file) = THEMES_DIR.get_file(&file_name) {
            if let Some(raw) = file.contents_utf8() {
                match FormTheme::from_toml_str(raw) {
                    Ok(theme) => return theme,
                    Err(err) => {
                        tracing::warn!("ignoring broken embedded theme {}: {:#}", file_name, err);
                    }
                }
            }
        }

        FormTheme::builtin(name).unwrap_or_else(|| {
            tracing::warn!("unknown theme {:?}, using dark", name);
            FormTheme::dark()
        })
    }
}
