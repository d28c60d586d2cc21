//! Startup configuration.
//!
//! Configuration is layered through figment, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. `warden.toml` in the current directory (or an explicit file)
//! 3. Environment variables with the `WARDEN_` prefix and `__` separator
//!    (`WARDEN_BOT__COMMAND_PREFIX=?` maps to `bot.command_prefix`)
//!
//! This covers only process startup; per-guild overrides live in the
//! engine's settings store, not here.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::error::{ConfigError, ConfigResult};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WardenConfig {
    /// Bot behavior settings.
    #[serde(default)]
    pub bot: BotConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Bot behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// The global default command prefix.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: char,

    /// Path of the per-guild settings document.
    #[serde(default = "default_settings_path")]
    pub settings_path: PathBuf,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            command_prefix: default_command_prefix(),
            settings_path: default_settings_path(),
        }
    }
}

fn default_command_prefix() -> char {
    '!'
}

fn default_settings_path() -> PathBuf {
    PathBuf::from("settings.json")
}

/// Logging settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

/// Minimum log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace-level output.
    Trace,
    /// Debug-level output.
    Debug,
    /// Info-level output (default).
    #[default]
    Info,
    /// Warnings and errors only.
    Warn,
    /// Errors only.
    Error,
}

impl LogLevel {
    /// The level as a filter directive string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Converts to a `tracing` level.
    pub fn to_tracing_level(self) -> Level {
        match self {
            Self::Trace => Level::TRACE,
            Self::Debug => Level::DEBUG,
            Self::Info => Level::INFO,
            Self::Warn => Level::WARN,
            Self::Error => Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line output (default).
    #[default]
    Compact,
    /// Full fmt layer output.
    Full,
    /// Multi-line human-oriented output.
    Pretty,
}

/// Loads [`WardenConfig`] from files and the environment.
///
/// ```rust,ignore
/// let config = ConfigLoader::new().load()?;
/// let config = ConfigLoader::new().file("config/warden.toml").load()?;
/// ```
#[derive(Default)]
pub struct ConfigLoader {
    config_file: Option<PathBuf>,
    load_env: bool,
}

impl ConfigLoader {
    /// Creates a loader with defaults: `warden.toml` search plus
    /// environment variables.
    pub fn new() -> Self {
        Self {
            config_file: None,
            load_env: true,
        }
    }

    /// Sets a specific configuration file to load. The file must exist.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Loads and returns the configuration.
    pub fn load(self) -> ConfigResult<WardenConfig> {
        let mut figment = Figment::from(Serialized::defaults(WardenConfig::default()));

        if let Some(path) = self.config_file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path));
            }
            figment = figment.merge(Toml::file(path));
        } else {
            // Optional: absence just means defaults.
            figment = figment.merge(Toml::file("warden.toml"));
        }

        if self.load_env {
            figment = figment.merge(Env::prefixed("WARDEN_").split("__"));
        }

        figment
            .extract()
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
