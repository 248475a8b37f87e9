//! User records as held by the store, and the credential-free view served to
//! clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::window::TimeWindow;

/// Account role. Exactly one per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Standard HealthHub member.
    User,
    /// Dietitian account.
    Dietitian,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Dietitian => "dietitian",
        }
    }
}

/// Stored user record, including the credential hash.
///
/// `created_at` never changes after insertion. `last_active_at` only moves
/// forward and is written by whatever component records user activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: Role,
    #[serde(default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_active_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn created_within(&self, window: &TimeWindow) -> bool {
        window.contains(self.created_at)
    }

    /// A user with no recorded activity is never active.
    pub fn active_within(&self, window: &TimeWindow) -> bool {
        self.last_active_at.is_some_and(|t| window.contains(t))
    }
}

/// Client-facing projection of [`User`]. Credential fields are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub last_active_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserView {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.clone(),
            email: u.email.clone(),
            first_name: u.first_name.clone(),
            last_name: u.last_name.clone(),
            role: u.role,
            created_at: u.created_at,
            last_active_at: u.last_active_at,
        }
    }
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            role: u.role,
            created_at: u.created_at,
            last_active_at: u.last_active_at,
        }
    }
}
