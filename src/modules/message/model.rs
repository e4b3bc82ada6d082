use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::message::schema::MessageEntity;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageModel {
    pub receiver_id: Uuid,
    #[validate(length(max = 5000, message = "Message must be at most 5000 characters long"))]
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct InsertMessage {
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageThread {
    pub user_id: Uuid,
    pub last_message: MessageEntity,
    pub unread_count: u64,
}
