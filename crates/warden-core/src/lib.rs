//! Platform-neutral foundation types for the Warden guild bot.
//!
//! This crate defines the contracts between the command engine and the
//! chat platform it runs against:
//!
//! - [`GuildId`], [`UserId`], [`RoleId`] - typed string identifiers
//! - [`IncomingMessage`] and [`GatewayEvent`] - the event model the engine
//!   consumes
//! - [`MessageActions`], [`Gateway`], [`GuildDirectory`] - capability
//!   traits implemented by a platform adapter
//!
//! The engine never touches a concrete platform type; everything it needs
//! from the platform flows through these traits.

mod error;
mod event;
mod gateway;
mod id;

pub use error::{GatewayError, GatewayResult};
pub use event::{ChannelKind, GatewayEvent, IncomingMessage, IncomingMessageBuilder};
pub use gateway::{Gateway, GuildDirectory, MessageActions};
pub use id::{GuildId, RoleId, UserId};
