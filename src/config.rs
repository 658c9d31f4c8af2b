use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;
use crate::core::reveal::RevealPacing;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub reveal: RevealConfig,
    pub playback: PlaybackConfig,
    pub script: ScriptConfig,
    pub data: DataConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Below this width the three panes are stacked vertically.
    pub stack_below_width: u16,
}

/// Typing speeds for each pane.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// When false every reveal completes instantly.
    pub animate: bool,
    pub terminal_char_ms: u64,
    pub terminal_line_pause_ms: u64,
    pub explanation_char_ms: u64,
    pub form_char_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Delay between automatic step advances.
    pub interval_ms: u64,
    /// Start playing as soon as the demo opens.
    pub autoplay: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Script file to use instead of the built-in walkthrough.
    pub path: Option<PathBuf>,
}

/// Data directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory (logs live here).
    pub data_dir: Option<PathBuf>,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            stack_below_width: 90,
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            animate: true,
            terminal_char_ms: 20,
            terminal_line_pause_ms: 200,
            explanation_char_ms: 30,
            form_char_ms: 100,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            interval_ms: 3000,
            autoplay: false,
        }
    }
}

impl RevealConfig {
    pub fn terminal_pacing(&self) -> RevealPacing {
        RevealPacing::line_oriented(self.terminal_char_ms, self.terminal_line_pause_ms)
    }

    pub fn explanation_pacing(&self) -> RevealPacing {
        RevealPacing::per_char(self.explanation_char_ms)
    }

    pub fn form_pacing(&self) -> RevealPacing {
        RevealPacing::per_char(self.form_char_ms)
    }
}

impl AppConfig {
    /// Load configuration from `path`, or `~/.config/migration-showcase/config.toml`.
    ///
    /// A missing file yields `Default`. A file that exists but cannot be read
    /// or parsed is an error; callers fall back to `Default` and report it
    /// once logging is up.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);
        let contents = match std::fs::read_to_string(&config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: config_path,
                    source,
                })
            }
        };
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: config_path,
            source,
        })
    }

    /// `load`, falling back to `Default` on error. The error is handed back so
    /// it can be logged after the subscriber is installed.
    pub fn load_or_default(path: Option<&Path>) -> (Self, Option<ConfigError>) {
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("migration-showcase"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tui.tick_rate_ms.max(1))
    }

    pub fn playback_interval(&self) -> Duration {
        Duration::from_millis(self.playback.interval_ms)
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("migration-showcase").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
