//! User entity.

use serde::{Deserialize, Serialize};

/// Unique identifier for a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

const GUEST_ROLE: &str = "system_guest";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    #[serde(default)]
    is_bot: bool,
    /// Space separated role names.
    #[serde(default)]
    roles: String,
    #[serde(default)]
    delete_at: i64,
}

impl User {
    #[must_use]
    pub fn new(id: impl Into<UserId>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            is_bot: false,
            roles: "system_user".to_string(),
            delete_at: 0,
        }
    }

    #[must_use]
    pub const fn bot(mut self, is_bot: bool) -> Self {
        self.is_bot = is_bot;
        self
    }

    #[must_use]
    pub fn with_roles(mut self, roles: impl Into<String>) -> Self {
        self.roles = roles.into();
        self
    }

    #[must_use]
    pub const fn deactivated_at(mut self, delete_at: i64) -> Self {
        self.delete_at = delete_at;
        self
    }

    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub const fn is_bot(&self) -> bool {
        self.is_bot
    }

    #[must_use]
    pub fn is_guest(&self) -> bool {
        self.roles.split_whitespace().any(|role| role == GUEST_ROLE)
    }

    #[must_use]
    pub const fn is_deactivated(&self) -> bool {
        self.delete_at > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_role_detection() {
        let guest = User::new("u1", "alice").with_roles("system_guest custom_role");
        assert!(guest.is_guest());

        let member = User::new("u2", "bob").with_roles("system_user system_guesthouse");
        assert!(!member.is_guest());
    }
}
