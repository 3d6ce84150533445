use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Role;

/// An account is exactly one of:
/// - pending: invite code set, no password hash, cannot authenticate;
/// - active: password hash set, no invite code.
///
/// The role is fixed at creation.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: Option<String>,
    pub role: Role,
    pub invite_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_pending(&self) -> bool {
        self.password_hash.is_none() && self.invite_code.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.password_hash.is_some() && self.invite_code.is_none()
    }
}

/// Account view returned to the Director's administration surface.
/// Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: i64,
    pub username: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            role: u.role,
            invite_code: u.invite_code.clone(),
            created_at: u.created_at,
        }
    }
}
