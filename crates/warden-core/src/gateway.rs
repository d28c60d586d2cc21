//! Capability traits implemented by platform adapters.
//!
//! These are the only seams between the engine and a chat platform. An
//! adapter owns the network session and the platform object model; the
//! engine consumes events and invokes the narrow capabilities below.

use async_trait::async_trait;

use crate::error::GatewayResult;
use crate::event::GatewayEvent;
use crate::id::{GuildId, RoleId, UserId};

/// Side effects available on a received message.
///
/// Implementations translate these into platform API calls. Both
/// operations can fail (message already gone, missing channel permission);
/// the engine decides which failures matter.
#[async_trait]
pub trait MessageActions: Send + Sync {
    /// Sends a reply into the message's channel.
    async fn reply(&self, text: &str) -> GatewayResult<()>;

    /// Deletes the message from its channel.
    async fn delete(&self) -> GatewayResult<()>;
}

/// An established platform session.
///
/// The gateway delivers events one at a time; the engine runs each to
/// completion on its own task while the gateway may already be yielding
/// the next one.
#[async_trait]
pub trait Gateway: Send {
    /// The bot account's own user id, used to recognise at-mention
    /// invocations.
    fn current_user_id(&self) -> &UserId;

    /// Yields the next event, or `None` once the session has closed.
    async fn next_event(&mut self) -> Option<GatewayEvent>;

    /// Tears down the session. Called once during shutdown.
    async fn disconnect(&mut self);
}

/// Read-only directory lookups within a guild.
#[async_trait]
pub trait GuildDirectory: Send + Sync {
    /// Resolves a role name to its id. Role names are matched exactly,
    /// including case.
    async fn role_id_by_name(&self, guild_id: &GuildId, name: &str) -> Option<RoleId>;

    /// Returns a member's display name, if the member is known.
    async fn member_display_name(&self, guild_id: &GuildId, user_id: &UserId) -> Option<String>;
}
