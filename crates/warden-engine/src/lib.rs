//! Command authorisation and dispatch engine for the Warden guild bot.
//!
//! The engine turns raw incoming messages into command invocations,
//! resolves per-guild configuration (command prefix, message-deletion
//! policy), gates privileged commands behind per-guild authorisation, and
//! persists configuration overrides to a single JSON settings file.
//!
//! # Data flow
//!
//! ```text
//! GatewayEvent -> Dispatcher -> parse -> CommandRegistry lookup
//!              -> central elevation check -> handler -> SettingsStore
//! ```
//!
//! Everything platform-specific stays behind the traits in
//! [`warden_core`]; this crate holds only the logic.

pub mod authority;
pub mod commands;
pub mod context;
pub mod dispatch;
mod error;
pub mod parse;
pub mod registry;
pub mod settings;
pub mod store;

#[cfg(test)]
mod testutil;

pub use authority::{Actor, NotAuthorisedError};
pub use context::CommandContext;
pub use dispatch::Dispatcher;
pub use error::{CommandError, CommandResult, SettingsError, SettingsResult};
pub use parse::{Invocation, ParseOutcome, parse};
pub use registry::{CommandRegistry, CommandSpec};
pub use settings::GuildOverrides;
pub use store::SettingsStore;
