//! Per-guild authorisation.
//!
//! Privileged commands are gated by a single allow-only check: the acting
//! user passes if they own the guild, are individually authorised, or hold
//! at least one authorised role. The check itself is pure set logic on
//! [`GuildOverrides`](crate::settings::GuildOverrides); this module adds
//! the acting-user view and the user-facing rejection error.

use thiserror::Error;

use warden_core::{IncomingMessage, RoleId, UserId};

/// The fixed notice shown when a privileged command is rejected.
pub const NOT_AUTHORISED_NOTICE: &str =
    "This action is only allowable by the server owner or by authorised users \
     or users with an authorised role";

/// The identity a command is invoked with.
#[derive(Debug, Clone)]
pub struct Actor {
    /// The acting user's id.
    pub user_id: UserId,
    /// Whether the acting user owns the guild.
    pub is_guild_owner: bool,
    /// Roles held by the acting user in the guild.
    pub role_ids: Vec<RoleId>,
}

impl Actor {
    /// Extracts the acting identity from a received message.
    pub fn from_message(message: &IncomingMessage) -> Self {
        Self {
            user_id: message.author_id.clone(),
            is_guild_owner: message.author_is_owner,
            role_ids: message.author_role_ids.clone(),
        }
    }
}

/// Rejection of a privileged command.
///
/// Carries one fixed human-readable message; the dispatcher relays it to
/// the invoking channel and never lets it escape the event boundary.
#[derive(Debug, Clone, Error)]
#[error("{NOT_AUTHORISED_NOTICE}")]
pub struct NotAuthorisedError;
