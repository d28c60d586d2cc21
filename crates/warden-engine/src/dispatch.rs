//! The command dispatcher.
//!
//! One [`Dispatcher`] instance handles every gateway event: it parses
//! incoming messages against the guild's effective prefix, looks up the
//! command, enforces elevation centrally, invokes the handler, and applies
//! the guild's message-deletion policy afterwards.
//!
//! # Error containment
//!
//! Nothing a handler does may crash the process or disturb subsequent
//! command handling. Authorisation rejections and handler failures are
//! logged and answered with a short notice; deletion failures are
//! swallowed silently; unknown commands are a deliberate, logged no-op
//! with no user feedback.

use std::sync::Arc;

use tracing::{Level, debug, error, info, span};

use warden_core::{ChannelKind, GatewayEvent, GuildDirectory, IncomingMessage, UserId};

use crate::context::CommandContext;
use crate::parse::{self, ParseOutcome};
use crate::registry::CommandRegistry;
use crate::store::SettingsStore;

/// The fixed notice for command attempts over direct channels.
pub const DIRECT_MESSAGE_NOTICE: &str = "You cannot use this bot via DM yet for technical reasons";

/// The generic notice for a handler that failed.
const HANDLER_FAILED_NOTICE: &str = "Sorry, something went wrong running that command.";

/// Orchestrates parsing, lookup, authorisation, execution, and message
/// cleanup for every gateway event.
pub struct Dispatcher {
    registry: CommandRegistry,
    store: Arc<SettingsStore>,
    directory: Arc<dyn GuildDirectory>,
    bot_user_id: UserId,
    default_prefix: char,
}

impl Dispatcher {
    /// Creates a dispatcher over a fixed command registry.
    pub fn new(
        registry: CommandRegistry,
        store: Arc<SettingsStore>,
        directory: Arc<dyn GuildDirectory>,
        bot_user_id: UserId,
        default_prefix: char,
    ) -> Self {
        Self {
            registry,
            store,
            directory,
            bot_user_id,
            default_prefix,
        }
    }

    /// The shared settings store.
    pub fn store(&self) -> &Arc<SettingsStore> {
        &self.store
    }

    /// Handles one gateway event to completion.
    pub async fn handle_event(&self, event: GatewayEvent) {
        match event {
            GatewayEvent::MessageReceived(message) => self.handle_message(message).await,
            GatewayEvent::MemberLeft { guild_id, user_id } => {
                self.store.member_left(&guild_id, &user_id).await;
            }
        }
    }

    async fn handle_message(&self, message: IncomingMessage) {
        // Other bots (ourselves included) never invoke commands.
        if message.author_is_bot {
            return;
        }

        if message.channel == ChannelKind::Direct {
            if let Err(e) = message.reply(DIRECT_MESSAGE_NOTICE).await {
                debug!(error = %e, "Failed to send DM notice");
            }
            return;
        }

        let Some(guild_id) = message.guild_id.clone() else {
            return;
        };

        let prefix = self
            .store
            .effective_prefix(&guild_id, self.default_prefix)
            .await;
        let invocation =
            match parse::parse(&message.content, message.channel, prefix, &self.bot_user_id) {
                ParseOutcome::Command(invocation) => invocation,
                ParseOutcome::DirectMessage | ParseOutcome::Ignored => return,
            };

        let span = span!(Level::DEBUG, "command", guild_id = %guild_id, name = %invocation.command);
        let _enter = span.enter();

        let Some(spec) = self.registry.resolve(&invocation.command) else {
            // Deliberate: unknown commands produce no user feedback.
            debug!("Unknown command, ignoring");
            return;
        };

        let ctx = Arc::new(CommandContext {
            message,
            guild_id: guild_id.clone(),
            store: Arc::clone(&self.store),
            directory: Arc::clone(&self.directory),
            default_prefix: self.default_prefix,
        });

        if spec.elevated()
            && let Err(rejection) = self.store.ensure_authorised(&guild_id, &ctx.actor()).await
        {
            info!(user_id = %ctx.message.author_id, "Privileged command rejected");
            ctx.reply(&rejection.to_string()).await;
            return;
        }

        match spec.invoke(invocation, Arc::clone(&ctx)).await {
            Ok(()) => self.maybe_delete_invoking(&ctx).await,
            Err(e) => {
                error!(error = %e, "Command handler failed");
                ctx.reply(HANDLER_FAILED_NOTICE).await;
            }
        }
    }

    /// Deletes the invoking message when the guild's policy says so.
    /// Deletion failure (message already gone, missing permission) is
    /// never escalated.
    async fn maybe_delete_invoking(&self, ctx: &CommandContext) {
        if !self.store.delete_invoking(&ctx.guild_id).await {
            return;
        }
        if let Err(e) = ctx.message.delete().await {
            debug!(error = %e, "Ignoring failed deletion of invoking message");
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .field("default_prefix", &self.default_prefix)
            .finish()
    }
}
