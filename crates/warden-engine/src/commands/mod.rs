//! Built-in commands.
//!
//! The command set is fixed at startup: guild configuration
//! (`setcommandprefix`, `setcommanddelete`), authorisation management
//! (`authoriseusers`, `authoriserole` and their counterparts,
//! `showauthorised`), and a liveness check (`ping`).
//!
//! Mutating handlers persist the settings snapshot immediately after a
//! successful change; a failed save surfaces as a recoverable
//! [`CommandError::Persistence`](crate::error::CommandError) and is
//! contained by the dispatcher.

mod authority;
mod config;

use std::sync::Arc;

use crate::context::CommandContext;
use crate::error::CommandResult;
use crate::parse::Invocation;
use crate::registry::CommandRegistry;

/// Builds the registry of built-in commands with their elevation metadata
/// and aliases.
pub fn builtin() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    registry.register("setcommandprefix", true, config::set_command_prefix);
    registry.register("setcommanddelete", true, config::set_command_delete);
    registry.register("authoriseusers", true, authority::authorise_users);
    registry.register("authoriserole", true, authority::authorise_role);
    registry.register("deauthoriseusers", true, authority::deauthorise_users);
    registry.register("deauthoriserole", true, authority::deauthorise_role);
    registry.register("showauthorised", false, authority::show_authorised);
    registry.register("ping", false, ping);

    registry.alias("authoriseusers", ["authoriseuser", "authuser", "authusers"]);
    registry.alias("authoriserole", ["authrole"]);
    registry.alias(
        "deauthoriseusers",
        ["deauthoriseuser", "deauthuser", "deauthusers"],
    );
    registry.alias("deauthoriserole", ["deauthrole"]);

    registry
}

/// Liveness check.
async fn ping(_invocation: Invocation, ctx: Arc<CommandContext>) -> CommandResult {
    ctx.reply("Pong").await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Dispatcher;
    use crate::store::SettingsStore;
    use crate::testutil::{RecordingActions, StaticDirectory, message_with};

    use warden_core::{GatewayEvent, GuildId, IncomingMessage, RoleId, UserId};

    fn guild() -> GuildId {
        GuildId::new("g1")
    }

    struct Fixture {
        dispatcher: Dispatcher,
        _dir: tempfile::TempDir,
    }

    impl Fixture {
        fn new(directory: StaticDirectory) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let store = Arc::new(SettingsStore::new(dir.path().join("settings.json")));
            let dispatcher = Dispatcher::new(
                builtin(),
                store,
                Arc::new(directory),
                UserId::new("bot"),
                '!',
            );
            Self {
                dispatcher,
                _dir: dir,
            }
        }

        fn store(&self) -> &Arc<SettingsStore> {
            self.dispatcher.store()
        }

        /// Dispatches a message sent by the guild owner.
        async fn run_as_owner(
            &self,
            content: &str,
            mentions: &[&str],
        ) -> Arc<RecordingActions> {
            let mentions: Vec<UserId> = mentions.iter().map(|&m| UserId::new(m)).collect();
            let (msg, actions): (IncomingMessage, _) = message_with(content, &guild(), |b| {
                b.owner(true).mentions(mentions)
            });
            self.dispatcher
                .handle_event(GatewayEvent::MessageReceived(msg))
                .await;
            actions
        }
    }

    #[tokio::test]
    async fn setcommandprefix_validates_length() {
        let f = Fixture::new(StaticDirectory::default());
        let actions = f.run_as_owner("!setcommandprefix ??", &[]).await;

        assert!(actions.replies()[0].contains("single character"));
        assert_eq!(f.store().effective_prefix(&guild(), '!').await, '!');
    }

    #[tokio::test]
    async fn setcommandprefix_default_removes_override() {
        let f = Fixture::new(StaticDirectory::default());
        f.run_as_owner("!setcommandprefix ?", &[]).await;
        assert_eq!(f.store().effective_prefix(&guild(), '!').await, '?');

        // The override changes the effective prefix for the next command.
        f.run_as_owner("?setcommandprefix !", &[]).await;
        assert_eq!(f.store().effective_prefix(&guild(), '!').await, '!');
        assert_eq!(f.store().snapshot().await, Default::default());
    }

    #[tokio::test]
    async fn setcommandprefix_persists_to_disk() {
        let f = Fixture::new(StaticDirectory::default());
        f.run_as_owner("!setcommandprefix ?", &[]).await;

        let reloaded = SettingsStore::load(f.store().path()).await.unwrap();
        assert_eq!(reloaded.effective_prefix(&guild(), '!').await, '?');
    }

    #[tokio::test]
    async fn setcommanddelete_recognises_falsey_words() {
        let f = Fixture::new(StaticDirectory::default());
        for word in ["false", "F", "no", "N"] {
            f.run_as_owner(&format!("!setcommanddelete {word}"), &[])
                .await;
            assert!(!f.store().delete_invoking(&guild()).await, "word: {word}");
            f.run_as_owner("!setcommanddelete yes", &[]).await;
            assert!(f.store().delete_invoking(&guild()).await);
        }
    }

    #[tokio::test]
    async fn authoriseusers_grants_mentions_and_reports_duplicates() {
        let directory = StaticDirectory {
            display_names: [(UserId::new("u1"), "Alice".to_string())].into(),
            ..Default::default()
        };
        let f = Fixture::new(directory);

        let actions = f.run_as_owner("!authoriseusers @u1 @u2", &["u1", "u2"]).await;
        assert!(actions.replies().is_empty());
        assert_eq!(f.store().authorised_users(&guild()).await.len(), 2);

        // Granting again reports the duplicates by display name.
        let actions = f.run_as_owner("!authoriseusers @u1", &["u1"]).await;
        assert!(actions.replies()[0].contains("already authorised"));
        assert!(actions.replies()[0].contains("Alice"));
        assert_eq!(f.store().authorised_users(&guild()).await.len(), 2);
    }

    #[tokio::test]
    async fn authoriseuser_alias_reaches_same_handler() {
        let f = Fixture::new(StaticDirectory::default());
        f.run_as_owner("!authUser @u1", &["u1"]).await;
        assert_eq!(f.store().authorised_users(&guild()).await.len(), 1);
    }

    #[tokio::test]
    async fn deauthoriseusers_reports_unknown_members() {
        let f = Fixture::new(StaticDirectory::default());
        f.run_as_owner("!authoriseusers @u1", &["u1"]).await;

        let actions = f
            .run_as_owner("!deauthoriseusers @u1 @u2", &["u1", "u2"])
            .await;
        assert!(actions.replies()[0].contains("didn't have permissions"));
        assert!(f.store().authorised_users(&guild()).await.is_empty());
    }

    #[tokio::test]
    async fn authoriserole_resolves_name_through_directory() {
        let directory = StaticDirectory {
            roles: [("Senior Mods".to_string(), RoleId::new("r1"))].into(),
            ..Default::default()
        };
        let f = Fixture::new(directory);

        f.run_as_owner("!authoriserole Senior Mods", &[]).await;
        assert_eq!(
            f.store().authorised_roles(&guild()).await,
            vec![RoleId::new("r1")]
        );

        let actions = f.run_as_owner("!authoriserole Senior Mods", &[]).await;
        assert!(actions.replies()[0].contains("already has privileges"));
    }

    #[tokio::test]
    async fn authoriserole_unknown_name_gets_case_hint() {
        let f = Fixture::new(StaticDirectory::default());
        let actions = f.run_as_owner("!authoriserole mods", &[]).await;
        assert!(actions.replies()[0].contains("case sensitive"));
        assert!(f.store().authorised_roles(&guild()).await.is_empty());
    }

    #[tokio::test]
    async fn deauthoriserole_handles_missing_grant() {
        let directory = StaticDirectory {
            roles: [("Mods".to_string(), RoleId::new("r1"))].into(),
            ..Default::default()
        };
        let f = Fixture::new(directory);

        let actions = f.run_as_owner("!deauthoriserole Mods", &[]).await;
        assert!(actions.replies()[0].contains("is not authed"));

        f.run_as_owner("!authoriserole Mods", &[]).await;
        f.run_as_owner("!deauthoriserole Mods", &[]).await;
        assert!(f.store().authorised_roles(&guild()).await.is_empty());
    }

    #[tokio::test]
    async fn showauthorised_reports_users_and_roles() {
        let directory = StaticDirectory {
            display_names: [(UserId::new("u1"), "Alice".to_string())].into(),
            ..Default::default()
        };
        let f = Fixture::new(directory);

        let actions = f.run_as_owner("!showauthorised", &[]).await;
        assert!(actions.replies()[0].contains("No users or roles"));

        f.store().grant_user(&guild(), UserId::new("u1")).await;
        f.store().grant_role(&guild(), RoleId::new("r1")).await;

        let actions = f.run_as_owner("!showauthorised", &[]).await;
        let reply = &actions.replies()[0];
        assert!(reply.contains("Authorised users: Alice"));
        assert!(reply.contains("Authorised roles: r1"));
    }
}
