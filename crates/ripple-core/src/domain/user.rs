use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status assigned to freshly created accounts.
pub const DEFAULT_USER_STATUS: &str = "I am new!";

/// User entity - an account that can author posts.
///
/// The password hash never leaves the server; it is excluded from
/// serialization so a `User` can be embedded in a response safely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID, default status and timestamps.
    pub fn new(email: String, password_hash: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            name,
            status: DEFAULT_USER_STATUS.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the user's status line.
    pub fn set_status(&mut self, status: String) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}
