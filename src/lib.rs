//! Terminal admin console for the SDS distribution back office.
//!
//! A single-screen TUI over the SDS REST backend: seven entity sections
//! (users, products, warehouses, customers, orders, operations, stock)
//! rendered as one table at a time, with modal forms for create/edit flows
//! and a background worker executing the API calls.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      main (terminal shim)                │
//! │   key events ──► app::handler ──► actions ──► net worker │
//! │        ▲                                        │        │
//! │        └──────────── api outcomes ◄─────────────┘        │
//! ├──────────────────────────────────────────────────────────┤
//! │  app::state ──► ui::viewmodel ──► ui::renderer (ANSI)    │
//! ├──────────────────────────────────────────────────────────┤
//! │  api (reqwest + envelope)   sections (per-entity specs)  │
//! │  storage (token file)       domain (records, sessions)   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The handler is a pure state machine: it never performs I/O, it only
//! returns actions. Every API response carries the tag it was requested
//! under, and the handler drops responses whose target state is gone.

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod net;
pub mod observability;
pub mod sections;
pub mod storage;
pub mod ui;

use crate::domain::error::{ConsoleError, Result};
use crate::ui::theme::Theme;
use serde::Deserialize;
use std::path::PathBuf;
use url::Url;

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}

fn default_trace_level() -> String {
    "info".to_string()
}

/// Console configuration, read from
/// `~/.config/sds-console/config.toml`.
///
/// ```toml
/// base_url = "http://127.0.0.1:8000"
/// theme = "catppuccin-latte"
/// # theme_file = "/path/to/custom.toml"
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Backend base URL. `SDS_CONSOLE_URL` overrides it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Built-in theme name.
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Custom theme file; takes precedence over `theme`.
    #[serde(default)]
    pub theme_file: Option<PathBuf>,

    /// Log level when `RUST_LOG` is unset.
    #[serde(default = "default_trace_level")]
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            theme: default_theme(),
            theme_file: None,
            trace_level: default_trace_level(),
        }
    }
}

impl Config {
    /// Loads the configuration from the standard location, falling back to
    /// defaults when no file exists. The `SDS_CONSOLE_URL` environment
    /// variable overrides the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let path = infrastructure::paths::config_file();
        let mut config = match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).map_err(|e| {
                ConsoleError::Config(format!("invalid config {}: {e}", path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                return Err(ConsoleError::Config(format!(
                    "failed to read config {}: {e}",
                    path.display()
                )))
            }
        };

        if let Ok(url) = std::env::var("SDS_CONSOLE_URL") {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        Ok(config)
    }

    /// The parsed backend base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured URL is not a valid absolute URL.
    pub fn base(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .map_err(|e| ConsoleError::Config(format!("invalid base_url {}: {e}", self.base_url)))
    }

    /// Resolves the theme: custom file first, then built-in name, then the
    /// default. Unusable themes degrade with a log line rather than failing
    /// startup.
    #[must_use]
    pub fn resolve_theme(&self) -> Theme {
        if let Some(path) = &self.theme_file {
            match Theme::from_file(path) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "falling back to built-in theme");
                }
            }
        }
        Theme::from_name(&self.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %self.theme, "unknown theme name, using default");
            Theme::default()
        })
    }
}
