//! Typed identifiers for platform entities.
//!
//! Platforms hand out opaque string ids (snowflakes on Discord-like
//! services). Wrapping them in newtypes keeps guild, user, and role ids
//! from being mixed up at compile time. All three serialize transparently
//! as strings, which also makes them usable as JSON map keys in the
//! settings document.

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an id from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the raw id string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id! {
    /// Identifier of a guild (server/community), the unit of configuration
    /// scoping.
    GuildId
}

string_id! {
    /// Identifier of a user account.
    UserId
}

string_id! {
    /// Identifier of a role within a guild.
    RoleId
}
