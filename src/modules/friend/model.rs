use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FriendResponse {
    pub id: Uuid,
    pub name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum IdOrInfo {
    Id(Uuid),
    Info(FriendResponse),
}

#[derive(sqlx::FromRow)]
pub struct FriendUserRow {
    pub req_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub avatar_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequestResponse {
    pub id: Uuid,
    pub from: IdOrInfo,
    pub to: IdOrInfo,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl FriendRequestResponse {
    pub fn incoming(user_id: Uuid, row: FriendUserRow) -> Self {
        FriendRequestResponse {
            id: row.req_id,
            from: IdOrInfo::Info(FriendResponse {
                id: row.user_id,
                name: row.name,
                avatar_url: row.avatar_url,
            }),
            to: IdOrInfo::Id(user_id),
            created_at: row.created_at,
        }
    }

    pub fn outgoing(user_id: Uuid, row: FriendUserRow) -> Self {
        FriendRequestResponse {
            id: row.req_id,
            from: IdOrInfo::Id(user_id),
            to: IdOrInfo::Info(FriendResponse {
                id: row.user_id,
                name: row.name,
                avatar_url: row.avatar_url,
            }),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestBody {
    pub recipient_id: Uuid,
}
