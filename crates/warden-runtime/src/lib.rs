//! Process glue for the Warden guild bot.
//!
//! Everything here is thin: configuration loading (figment), logging
//! setup (tracing-subscriber), and the [`Runtime`] that drives gateway
//! events into the engine's dispatcher until a shutdown signal arrives.
//! The interesting logic lives in [`warden_engine`].

pub mod config;
mod error;
pub mod logging;
mod runtime;

pub use config::{BotConfig, ConfigLoader, LogFormat, LogLevel, LoggingConfig, WardenConfig};
pub use error::{ConfigError, ConfigResult, RuntimeError, RuntimeResult};
pub use runtime::Runtime;
