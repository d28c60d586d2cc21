//! Invocation context handed to command handlers.

use std::sync::Arc;

use tracing::warn;

use warden_core::{GuildDirectory, GuildId, IncomingMessage, UserId};

use crate::authority::Actor;
use crate::store::SettingsStore;

/// Everything a command handler may need: the invoking message, the guild
/// it arrived in, the settings store, and directory lookups.
///
/// Handlers receive the context as an `Arc`; state is reached through the
/// store rather than ambient globals.
pub struct CommandContext {
    /// The invoking message.
    pub message: IncomingMessage,
    /// The guild the command was invoked in.
    pub guild_id: GuildId,
    /// Shared settings state and persistence.
    pub store: Arc<SettingsStore>,
    /// Directory lookups within the guild.
    pub directory: Arc<dyn GuildDirectory>,
    /// The global default command prefix.
    pub default_prefix: char,
}

impl CommandContext {
    /// The identity the command was invoked with.
    pub fn actor(&self) -> Actor {
        Actor::from_message(&self.message)
    }

    /// Replies into the invoking channel, logging (not escalating) a
    /// failed send.
    pub async fn reply(&self, text: &str) {
        if let Err(e) = self.message.reply(text).await {
            warn!(guild_id = %self.guild_id, error = %e, "Failed to send reply");
        }
    }

    /// A member's display name, falling back to the raw id when the
    /// directory does not know the member.
    pub async fn display_name(&self, user_id: &UserId) -> String {
        self.directory
            .member_display_name(&self.guild_id, user_id)
            .await
            .unwrap_or_else(|| user_id.to_string())
    }
}

impl std::fmt::Debug for CommandContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandContext")
            .field("guild_id", &self.guild_id)
            .field("default_prefix", &self.default_prefix)
            .finish()
    }
}
