//! Per-guild configuration overrides.
//!
//! [`GuildOverrides`] is the whole settings document: four maps keyed by
//! guild id, each holding only deviations from the global defaults. All
//! state logic is synchronous and pure; locking and persistence live in
//! [`store`](crate::store).
//!
//! # On-disk layout
//!
//! The serialized key names (`commandPrefixOverrides`, `deleteMessages`,
//! `authorisedUsers`, `authorisedRoles`) are part of the settings file
//! format; renaming them would require a migration step.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use warden_core::{GuildId, RoleId, UserId};

/// The union of all per-guild configuration overrides.
///
/// Absence of a guild key in any map means "use the global default".
/// Guild entries are created lazily on first mutation and removed when an
/// override reverts to the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuildOverrides {
    /// Per-guild command prefix. Values are exactly one character and
    /// never equal the global default.
    #[serde(default, rename = "commandPrefixOverrides")]
    prefix_overrides: HashMap<GuildId, String>,

    /// Per-guild invoking-message deletion policy. Absent means `true`.
    #[serde(default, rename = "deleteMessages")]
    delete_overrides: HashMap<GuildId, bool>,

    /// Users granted elevated privilege, per guild.
    #[serde(default, rename = "authorisedUsers")]
    authorised_users: HashMap<GuildId, BTreeSet<UserId>>,

    /// Roles granted elevated privilege, per guild.
    #[serde(default, rename = "authorisedRoles")]
    authorised_roles: HashMap<GuildId, BTreeSet<RoleId>>,
}

impl GuildOverrides {
    /// Returns the command prefix in effect for a guild.
    pub fn effective_prefix(&self, guild_id: &GuildId, default: char) -> char {
        self.prefix_overrides
            .get(guild_id)
            .and_then(|p| p.chars().next())
            .unwrap_or(default)
    }

    /// Sets a guild's prefix override.
    ///
    /// Setting the global default removes any existing override, so the
    /// map only ever holds non-default deviations. Returns whether the
    /// stored state changed.
    pub fn set_prefix(&mut self, guild_id: &GuildId, prefix: char, default: char) -> bool {
        if prefix == default {
            self.prefix_overrides.remove(guild_id).is_some()
        } else {
            let value = prefix.to_string();
            self.prefix_overrides.insert(guild_id.clone(), value.clone()) != Some(value)
        }
    }

    /// Returns whether invoking messages should be deleted in a guild.
    pub fn delete_invoking(&self, guild_id: &GuildId) -> bool {
        self.delete_overrides.get(guild_id).copied().unwrap_or(true)
    }

    /// Sets a guild's message-deletion policy. Returns whether the stored
    /// state changed.
    pub fn set_delete_invoking(&mut self, guild_id: &GuildId, value: bool) -> bool {
        self.delete_overrides.insert(guild_id.clone(), value) != Some(value)
    }

    /// Grants a user elevated privilege in a guild.
    ///
    /// Returns `false` if the user was already authorised.
    pub fn grant_user(&mut self, guild_id: &GuildId, user_id: UserId) -> bool {
        self.authorised_users
            .entry(guild_id.clone())
            .or_default()
            .insert(user_id)
    }

    /// Revokes a user's elevated privilege. A user that was never
    /// authorised is a no-op returning `false`.
    pub fn revoke_user(&mut self, guild_id: &GuildId, user_id: &UserId) -> bool {
        self.authorised_users
            .get_mut(guild_id)
            .is_some_and(|set| set.remove(user_id))
    }

    /// Grants a role elevated privilege in a guild.
    pub fn grant_role(&mut self, guild_id: &GuildId, role_id: RoleId) -> bool {
        self.authorised_roles
            .entry(guild_id.clone())
            .or_default()
            .insert(role_id)
    }

    /// Revokes a role's elevated privilege.
    pub fn revoke_role(&mut self, guild_id: &GuildId, role_id: &RoleId) -> bool {
        self.authorised_roles
            .get_mut(guild_id)
            .is_some_and(|set| set.remove(role_id))
    }

    /// Returns whether a user is authorised for a role grant check.
    pub fn role_is_authorised(&self, guild_id: &GuildId, role_id: &RoleId) -> bool {
        self.authorised_roles
            .get(guild_id)
            .is_some_and(|set| set.contains(role_id))
    }

    /// Returns whether the given acting user may run privileged commands
    /// in a guild.
    ///
    /// Permission is granted if the user owns the guild, is individually
    /// authorised, or holds at least one authorised role. There is no
    /// deny list.
    pub fn is_authorised(
        &self,
        guild_id: &GuildId,
        user_id: &UserId,
        is_guild_owner: bool,
        role_ids: &[RoleId],
    ) -> bool {
        if is_guild_owner {
            return true;
        }
        if self
            .authorised_users
            .get(guild_id)
            .is_some_and(|set| set.contains(user_id))
        {
            return true;
        }
        self.authorised_roles
            .get(guild_id)
            .is_some_and(|set| role_ids.iter().any(|role| set.contains(role)))
    }

    /// Removes a departed member from a guild's authorised users.
    ///
    /// Reactive cleanup driven by member-left events. A guild with no
    /// authorised-user entry at all is a no-op. Returns whether anything
    /// was removed.
    pub fn member_left(&mut self, guild_id: &GuildId, user_id: &UserId) -> bool {
        self.revoke_user(guild_id, user_id)
    }

    /// The users currently authorised in a guild, in stable order.
    pub fn authorised_users(&self, guild_id: &GuildId) -> Vec<UserId> {
        self.authorised_users
            .get(guild_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// The roles currently authorised in a guild, in stable order.
    pub fn authorised_roles(&self, guild_id: &GuildId) -> Vec<RoleId> {
        self.authorised_roles
            .get(guild_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: char = '!';

    fn guild() -> GuildId {
        GuildId::new("g1")
    }

    #[test]
    fn prefix_defaults_without_override() {
        let overrides = GuildOverrides::default();
        assert_eq!(overrides.effective_prefix(&guild(), DEFAULT), DEFAULT);
    }

    #[test]
    fn prefix_override_applies() {
        let mut overrides = GuildOverrides::default();
        assert!(overrides.set_prefix(&guild(), '?', DEFAULT));
        assert_eq!(overrides.effective_prefix(&guild(), DEFAULT), '?');
    }

    #[test]
    fn setting_default_prefix_removes_override() {
        let mut overrides = GuildOverrides::default();
        overrides.set_prefix(&guild(), '?', DEFAULT);
        assert!(overrides.set_prefix(&guild(), DEFAULT, DEFAULT));
        assert_eq!(overrides.effective_prefix(&guild(), DEFAULT), DEFAULT);
        assert!(overrides.prefix_overrides.is_empty());

        // Idempotent: doing it again changes nothing.
        assert!(!overrides.set_prefix(&guild(), DEFAULT, DEFAULT));
    }

    #[test]
    fn delete_policy_defaults_to_true() {
        let overrides = GuildOverrides::default();
        assert!(overrides.delete_invoking(&guild()));
    }

    #[test]
    fn delete_policy_override_sticks() {
        let mut overrides = GuildOverrides::default();
        assert!(overrides.set_delete_invoking(&guild(), false));
        assert!(!overrides.delete_invoking(&guild()));
        assert!(!overrides.set_delete_invoking(&guild(), false));
    }

    #[test]
    fn owner_is_always_authorised() {
        let overrides = GuildOverrides::default();
        assert!(overrides.is_authorised(&guild(), &UserId::new("u1"), true, &[]));
    }

    #[test]
    fn granting_twice_keeps_set_size() {
        let mut overrides = GuildOverrides::default();
        assert!(overrides.grant_user(&guild(), UserId::new("u1")));
        assert!(!overrides.grant_user(&guild(), UserId::new("u1")));
        assert_eq!(overrides.authorised_users(&guild()).len(), 1);
    }

    #[test]
    fn revoking_unknown_user_is_noop() {
        let mut overrides = GuildOverrides::default();
        assert!(!overrides.revoke_user(&guild(), &UserId::new("u1")));
    }

    #[test]
    fn role_intersection_grants_access() {
        let mut overrides = GuildOverrides::default();
        overrides.grant_role(&guild(), RoleId::new("mods"));

        let roles = [RoleId::new("everyone"), RoleId::new("mods")];
        assert!(overrides.is_authorised(&guild(), &UserId::new("u1"), false, &roles));

        let unrelated = [RoleId::new("everyone")];
        assert!(!overrides.is_authorised(&guild(), &UserId::new("u1"), false, &unrelated));
    }

    #[test]
    fn member_left_without_entry_is_noop() {
        let mut overrides = GuildOverrides::default();
        assert!(!overrides.member_left(&guild(), &UserId::new("u1")));

        overrides.grant_user(&guild(), UserId::new("u1"));
        assert!(overrides.member_left(&guild(), &UserId::new("u1")));
        assert!(overrides.authorised_users(&guild()).is_empty());
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut overrides = GuildOverrides::default();
        overrides.set_prefix(&guild(), '?', DEFAULT);
        overrides.set_delete_invoking(&guild(), false);
        overrides.grant_user(&guild(), UserId::new("u1"));
        overrides.grant_user(&guild(), UserId::new("u2"));
        overrides.grant_role(&guild(), RoleId::new("r1"));

        let json = serde_json::to_string(&overrides).unwrap();
        let back: GuildOverrides = serde_json::from_str(&json).unwrap();
        assert_eq!(back, overrides);
    }

    #[test]
    fn established_on_disk_layout_loads() {
        // A document using the established on-disk key names.
        let json = r#"{
            "commandPrefixOverrides": {"g1": "?"},
            "deleteMessages": {"g1": false},
            "authorisedUsers": {"g1": ["u1", "u2"]},
            "authorisedRoles": {"g1": ["r1"]}
        }"#;
        let overrides: GuildOverrides = serde_json::from_str(json).unwrap();
        assert_eq!(overrides.effective_prefix(&guild(), DEFAULT), '?');
        assert!(!overrides.delete_invoking(&guild()));
        assert_eq!(overrides.authorised_users(&guild()).len(), 2);
        assert_eq!(overrides.authorised_roles(&guild()).len(), 1);
    }
}
