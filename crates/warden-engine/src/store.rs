//! The settings store: shared state plus JSON persistence.
//!
//! [`SettingsStore`] owns the live [`GuildOverrides`] behind a
//! `tokio::sync::RwLock` and mirrors it to a single JSON file. Every
//! mutating accessor takes the write lock for the whole read-modify-write,
//! so two concurrent command invocations touching the same guild cannot
//! lose an update.
//!
//! Persistence is wholesale: [`save`](SettingsStore::save) serializes the
//! entire snapshot and overwrites the file. The write is not atomic; a
//! crash mid-write can truncate the file. Accepted limitation, no backup
//! copy is made.

use std::path::{Path, PathBuf};

use tokio::sync::RwLock;
use tracing::{debug, info};

use warden_core::{GuildId, RoleId, UserId};

use crate::authority::{Actor, NotAuthorisedError};
use crate::error::{SettingsError, SettingsResult};
use crate::settings::GuildOverrides;

/// Shared per-guild settings, mirrored to a JSON file on disk.
pub struct SettingsStore {
    path: PathBuf,
    state: RwLock<GuildOverrides>,
}

impl SettingsStore {
    /// Creates a store with empty state, without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_state(path, GuildOverrides::default())
    }

    /// Creates a store around an existing snapshot.
    pub fn with_state(path: impl Into<PathBuf>, state: GuildOverrides) -> Self {
        Self {
            path: path.into(),
            state: RwLock::new(state),
        }
    }

    /// Loads the settings document from disk.
    ///
    /// A missing file is a fresh start with empty defaults; an unreadable
    /// or malformed file is an error, fatal during startup.
    pub async fn load(path: impl Into<PathBuf>) -> SettingsResult<Self> {
        let path = path.into();
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No settings file found, starting empty");
                return Ok(Self::new(path));
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.clone(),
                    source,
                });
            }
        };

        let state: GuildOverrides = serde_json::from_slice(&bytes)
            .map_err(|source| SettingsError::Malformed {
                path: path.clone(),
                source,
            })?;
        info!(path = %path.display(), "Loaded settings");
        Ok(Self::with_state(path, state))
    }

    /// Serializes the whole snapshot and overwrites the settings file.
    pub async fn save(&self) -> SettingsResult<()> {
        let data = {
            let state = self.state.read().await;
            serde_json::to_vec_pretty(&*state).map_err(SettingsError::Serialize)?
        };
        tokio::fs::write(&self.path, data)
            .await
            .map_err(|source| SettingsError::Write {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    /// The path of the backing settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a copy of the current snapshot.
    pub async fn snapshot(&self) -> GuildOverrides {
        self.state.read().await.clone()
    }

    /// Returns the command prefix in effect for a guild.
    pub async fn effective_prefix(&self, guild_id: &GuildId, default: char) -> char {
        self.state.read().await.effective_prefix(guild_id, default)
    }

    /// Sets a guild's prefix override; the default removes the override.
    pub async fn set_prefix(&self, guild_id: &GuildId, prefix: char, default: char) -> bool {
        self.state.write().await.set_prefix(guild_id, prefix, default)
    }

    /// Returns whether invoking messages should be deleted in a guild.
    pub async fn delete_invoking(&self, guild_id: &GuildId) -> bool {
        self.state.read().await.delete_invoking(guild_id)
    }

    /// Sets a guild's message-deletion policy.
    pub async fn set_delete_invoking(&self, guild_id: &GuildId, value: bool) -> bool {
        self.state.write().await.set_delete_invoking(guild_id, value)
    }

    /// Grants a user elevated privilege in a guild.
    pub async fn grant_user(&self, guild_id: &GuildId, user_id: UserId) -> bool {
        self.state.write().await.grant_user(guild_id, user_id)
    }

    /// Revokes a user's elevated privilege.
    pub async fn revoke_user(&self, guild_id: &GuildId, user_id: &UserId) -> bool {
        self.state.write().await.revoke_user(guild_id, user_id)
    }

    /// Grants a role elevated privilege in a guild.
    pub async fn grant_role(&self, guild_id: &GuildId, role_id: RoleId) -> bool {
        self.state.write().await.grant_role(guild_id, role_id)
    }

    /// Revokes a role's elevated privilege.
    pub async fn revoke_role(&self, guild_id: &GuildId, role_id: &RoleId) -> bool {
        self.state.write().await.revoke_role(guild_id, role_id)
    }

    /// Returns whether a role currently holds elevated privilege.
    pub async fn role_is_authorised(&self, guild_id: &GuildId, role_id: &RoleId) -> bool {
        self.state.read().await.role_is_authorised(guild_id, role_id)
    }

    /// The users currently authorised in a guild.
    pub async fn authorised_users(&self, guild_id: &GuildId) -> Vec<UserId> {
        self.state.read().await.authorised_users(guild_id)
    }

    /// The roles currently authorised in a guild.
    pub async fn authorised_roles(&self, guild_id: &GuildId) -> Vec<RoleId> {
        self.state.read().await.authorised_roles(guild_id)
    }

    /// Checks whether the actor may run privileged commands in the guild.
    pub async fn ensure_authorised(
        &self,
        guild_id: &GuildId,
        actor: &Actor,
    ) -> Result<(), NotAuthorisedError> {
        let state = self.state.read().await;
        if state.is_authorised(
            guild_id,
            &actor.user_id,
            actor.is_guild_owner,
            &actor.role_ids,
        ) {
            Ok(())
        } else {
            Err(NotAuthorisedError)
        }
    }

    /// Reactive cleanup for a departed member. Removing a user from a
    /// guild with no authorised-user entry is a no-op.
    pub async fn member_left(&self, guild_id: &GuildId, user_id: &UserId) -> bool {
        let removed = self.state.write().await.member_left(guild_id, user_id);
        if removed {
            debug!(guild_id = %guild_id, user_id = %user_id, "Departed member deauthorised");
        }
        removed
    }
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("path", &self.path)
            .finish()
    }
}
