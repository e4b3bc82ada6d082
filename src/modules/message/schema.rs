use serde::Serialize;
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MessageEntity {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl MessageEntity {
    /// The other party of the message as seen by `user_id`.
    pub fn counterpart(&self, user_id: &Uuid) -> Uuid {
        if &self.sender_id == user_id {
            self.receiver_id
        } else {
            self.sender_id
        }
    }
}
