//! # Warden
//!
//! A guild moderation bot engine: prefixed commands, per-guild
//! authorisation, and persistent settings.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐ events ┌────────────┐ invoke ┌──────────────────────────┐
//! │ Gateway  │───────▶│ Dispatcher │───────▶│ Command handlers         │
//! │ (adapter)│        │ (parse,    │        │ (prefix, delete policy,  │
//! └──────────┘        │  authorise)│        │  user/role authorisation)│
//!                     └────────────┘        └───────────┬──────────────┘
//!                                                       ▼
//!                                            SettingsStore ⇄ settings.json
//! ```
//!
//! - **warden-core**: the event model and the capability traits a
//!   platform adapter implements ([`Gateway`](core::Gateway),
//!   [`MessageActions`](core::MessageActions),
//!   [`GuildDirectory`](core::GuildDirectory))
//! - **warden-engine**: parsing, the command registry, the central
//!   authorisation check, and the persistent settings store
//! - **warden-runtime**: configuration, logging, and the event loop
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use warden::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::new().load()?;
//!     let (gateway, directory) = my_platform::connect().await?;
//!     let runtime = Runtime::connect(config, gateway, directory).await?;
//!     runtime.run().await?;
//!     Ok(())
//! }
//! ```

pub use warden_core as core;
pub use warden_engine as engine;
pub use warden_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use warden::prelude::*;
/// ```
pub mod prelude {
    // Runtime - main entry point
    pub use warden_runtime::{ConfigLoader, Runtime, WardenConfig};

    // Adapter seams - implemented by platform integrations
    pub use warden_core::{
        ChannelKind, Gateway, GatewayEvent, GuildDirectory, IncomingMessage, MessageActions,
    };

    // Ids used throughout the event model
    pub use warden_core::{GuildId, RoleId, UserId};

    // Engine types surfaced to embedders
    pub use warden_engine::{CommandRegistry, Dispatcher, SettingsStore};
}
