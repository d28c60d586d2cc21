//! The event model consumed by the command engine.
//!
//! A platform adapter translates its native payloads into [`GatewayEvent`]s
//! and feeds them to the engine one at a time. Only two event kinds matter
//! to the engine: an incoming message and a member leaving a guild.

use std::sync::Arc;

use crate::error::GatewayResult;
use crate::gateway::MessageActions;
use crate::id::{GuildId, RoleId, UserId};

/// The kind of channel a message arrived through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// A channel inside a guild.
    Guild,
    /// A direct (one-to-one) channel.
    Direct,
}

/// Events delivered by a [`Gateway`](crate::Gateway).
pub enum GatewayEvent {
    /// A message was received in some channel the bot can see.
    MessageReceived(IncomingMessage),
    /// A member left a guild.
    MemberLeft {
        /// The guild the member left.
        guild_id: GuildId,
        /// The departed member.
        user_id: UserId,
    },
}

impl std::fmt::Debug for GatewayEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MessageReceived(msg) => f
                .debug_tuple("MessageReceived")
                .field(&msg.content)
                .finish(),
            Self::MemberLeft { guild_id, user_id } => f
                .debug_struct("MemberLeft")
                .field("guild_id", guild_id)
                .field("user_id", user_id)
                .finish(),
        }
    }
}

/// A received chat message, decoupled from any platform object model.
///
/// The data fields mirror what the engine needs for parsing and
/// authorisation; the side-effecting capabilities (`reply`, `delete`) are
/// provided by the adapter through an [`MessageActions`] handle.
#[derive(Clone)]
pub struct IncomingMessage {
    /// Raw text content.
    pub content: String,
    /// Where the message arrived.
    pub channel: ChannelKind,
    /// The guild the message belongs to; `None` for direct channels.
    pub guild_id: Option<GuildId>,
    /// The author's user id.
    pub author_id: UserId,
    /// Whether the author owns the guild.
    pub author_is_owner: bool,
    /// Whether the author is itself a bot account.
    pub author_is_bot: bool,
    /// Roles held by the author within the guild.
    pub author_role_ids: Vec<RoleId>,
    /// Users mentioned in the message, in order of appearance.
    pub mentioned_user_ids: Vec<UserId>,
    actions: Arc<dyn MessageActions>,
}

impl IncomingMessage {
    /// Starts building a message around the given capability handle.
    pub fn builder(
        content: impl Into<String>,
        author_id: impl Into<UserId>,
        actions: Arc<dyn MessageActions>,
    ) -> IncomingMessageBuilder {
        IncomingMessageBuilder {
            message: IncomingMessage {
                content: content.into(),
                channel: ChannelKind::Guild,
                guild_id: None,
                author_id: author_id.into(),
                author_is_owner: false,
                author_is_bot: false,
                author_role_ids: Vec::new(),
                mentioned_user_ids: Vec::new(),
                actions,
            },
        }
    }

    /// Sends a reply into the channel this message arrived through.
    pub async fn reply(&self, text: &str) -> GatewayResult<()> {
        self.actions.reply(text).await
    }

    /// Deletes this message from its channel.
    pub async fn delete(&self) -> GatewayResult<()> {
        self.actions.delete().await
    }
}

impl std::fmt::Debug for IncomingMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncomingMessage")
            .field("content", &self.content)
            .field("channel", &self.channel)
            .field("guild_id", &self.guild_id)
            .field("author_id", &self.author_id)
            .finish()
    }
}

/// Builder for [`IncomingMessage`], used by adapters and tests.
pub struct IncomingMessageBuilder {
    message: IncomingMessage,
}

impl IncomingMessageBuilder {
    /// Sets the channel kind (defaults to [`ChannelKind::Guild`]).
    pub fn channel(mut self, channel: ChannelKind) -> Self {
        self.message.channel = channel;
        self
    }

    /// Sets the guild the message belongs to.
    pub fn guild(mut self, guild_id: impl Into<GuildId>) -> Self {
        self.message.guild_id = Some(guild_id.into());
        self
    }

    /// Marks the author as the guild owner.
    pub fn owner(mut self, is_owner: bool) -> Self {
        self.message.author_is_owner = is_owner;
        self
    }

    /// Marks the author as a bot account.
    pub fn bot_author(mut self, is_bot: bool) -> Self {
        self.message.author_is_bot = is_bot;
        self
    }

    /// Sets the roles held by the author.
    pub fn roles(mut self, roles: impl IntoIterator<Item = impl Into<RoleId>>) -> Self {
        self.message.author_role_ids = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the users mentioned in the message.
    pub fn mentions(mut self, users: impl IntoIterator<Item = impl Into<UserId>>) -> Self {
        self.message.mentioned_user_ids = users.into_iter().map(Into::into).collect();
        self
    }

    /// Finishes the builder.
    pub fn build(self) -> IncomingMessage {
        self.message
    }
}
