use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(type_name = "friendship_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FriendshipStatus {
    Pending,
    Accepted,
    Blocked,
}

impl FriendshipStatus {
    /// Status changes a record may go through. Deletion is not a status.
    pub fn can_become(self, next: FriendshipStatus) -> bool {
        use FriendshipStatus::*;
        matches!((self, next), (Pending, Accepted) | (Pending, Blocked) | (Accepted, Blocked))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FriendshipStatus::Pending => "pending",
            FriendshipStatus::Accepted => "accepted",
            FriendshipStatus::Blocked => "blocked",
        }
    }
}

impl fmt::Display for FriendshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `user_id` sent the request, `friend_id` received it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FriendshipEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub friend_id: Uuid,
    pub status: FriendshipStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
