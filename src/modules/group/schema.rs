use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

use crate::api::error;

/// Stored label only; the group creator is the sole privileged actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Type, Serialize, Deserialize)]
#[sqlx(type_name = "group_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GroupRole {
    Admin,
    Moderator,
    #[default]
    Member,
}

impl GroupRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupRole::Admin => "admin",
            GroupRole::Moderator => "moderator",
            GroupRole::Member => "member",
        }
    }
}

impl FromStr for GroupRole {
    type Err = error::SystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(GroupRole::Admin),
            "moderator" => Ok(GroupRole::Moderator),
            "member" => Ok(GroupRole::Member),
            other => Err(error::SystemError::bad_request(format!(
                "Invalid role '{other}', expected admin, moderator or member"
            ))),
        }
    }
}

impl fmt::Display for GroupRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GroupEntity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub max_members: Option<i32>,
    pub created_by: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GroupMemberEntity {
    pub id: Uuid,
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub role: GroupRole,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}
