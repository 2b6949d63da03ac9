//! Back-office user model.
//!
//! # Invariants
//! - Users are never hard-deleted; `is_active` is the soft-delete flag
//!   and the source of truth for visibility.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Designated role of a back-office user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Manager,
    User,
}

impl UserRole {
    pub fn as_db(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::User => "user",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "manager" => Some(Self::Manager),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

/// Canonical user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub date_joined: Option<DateTime<FixedOffset>>,
}

impl User {
    /// Creates an active user with the given role.
    pub fn new(username: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: 0,
            username: username.into(),
            email: None,
            first_name: None,
            last_name: None,
            role,
            is_active: true,
            date_joined: None,
        }
    }

    /// Marks this user as deactivated (soft delete).
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Restores a deactivated user.
    pub fn reactivate(&mut self) {
        self.is_active = true;
    }
}

#[cfg(test)]
mod tests {
    use super::{User, UserRole};

    #[test]
    fn role_parsing_round_trips() {
        for role in [UserRole::Admin, UserRole::Manager, UserRole::User] {
            assert_eq!(UserRole::parse(role.as_db()), Some(role));
        }
        assert_eq!(UserRole::parse("superuser"), None);
    }

    #[test]
    fn deactivate_and_reactivate_toggle_visibility() {
        let mut user = User::new("mvr", UserRole::Manager);
        assert!(user.is_active);
        user.deactivate();
        assert!(!user.is_active);
        user.reactivate();
        assert!(user.is_active);
    }
}
