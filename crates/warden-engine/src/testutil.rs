//! Shared mock collaborators for engine tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use warden_core::{
    ChannelKind, GatewayError, GatewayResult, GuildDirectory, GuildId, IncomingMessage,
    IncomingMessageBuilder, MessageActions, RoleId, UserId,
};

/// Records replies and deletions instead of calling a platform.
#[derive(Default)]
pub(crate) struct RecordingActions {
    replies: Mutex<Vec<String>>,
    deletes: AtomicUsize,
    fail_delete: AtomicBool,
}

impl RecordingActions {
    pub(crate) fn replies(&self) -> Vec<String> {
        self.replies.lock().unwrap().clone()
    }

    pub(crate) fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    /// Makes subsequent `delete` calls fail, as when the message is
    /// already gone.
    pub(crate) fn fail_deletes(&self) {
        self.fail_delete.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl MessageActions for RecordingActions {
    async fn reply(&self, text: &str) -> GatewayResult<()> {
        self.replies.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn delete(&self) -> GatewayResult<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(GatewayError::DeleteFailed("message already gone".into()));
        }
        self.deletes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A directory backed by fixed maps.
#[derive(Default)]
pub(crate) struct StaticDirectory {
    pub(crate) roles: HashMap<String, RoleId>,
    pub(crate) display_names: HashMap<UserId, String>,
}

#[async_trait]
impl GuildDirectory for StaticDirectory {
    async fn role_id_by_name(&self, _guild_id: &GuildId, name: &str) -> Option<RoleId> {
        self.roles.get(name).cloned()
    }

    async fn member_display_name(&self, _guild_id: &GuildId, user_id: &UserId) -> Option<String> {
        self.display_names.get(user_id).cloned()
    }
}

/// Builds a guild message from a plain member, returning the message and
/// its recording handle.
pub(crate) fn message(content: &str, guild_id: &GuildId) -> (IncomingMessage, Arc<RecordingActions>) {
    message_with(content, guild_id, |b| b)
}

/// Builds a guild message with extra builder customisation.
pub(crate) fn message_with(
    content: &str,
    guild_id: &GuildId,
    customise: impl FnOnce(IncomingMessageBuilder) -> IncomingMessageBuilder,
) -> (IncomingMessage, Arc<RecordingActions>) {
    let actions = Arc::new(RecordingActions::default());
    let builder = IncomingMessage::builder(content, "author", Arc::clone(&actions) as Arc<dyn MessageActions>)
        .guild(guild_id.clone());
    (customise(builder).build(), actions)
}

/// Builds a message arriving through a direct channel.
pub(crate) fn direct_message(content: &str) -> (IncomingMessage, Arc<RecordingActions>) {
    let actions = Arc::new(RecordingActions::default());
    let msg = IncomingMessage::builder(content, "author", Arc::clone(&actions) as Arc<dyn MessageActions>)
        .channel(ChannelKind::Direct)
        .build();
    (msg, actions)
}
