use uuid::Uuid;

use crate::{
    api::error,
    modules::message::{model::InsertMessage, schema::MessageEntity},
};

#[async_trait::async_trait]
pub trait MessageRepository {
    async fn create(&self, message: &InsertMessage) -> Result<MessageEntity, error::SystemError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MessageEntity>, error::SystemError>;

    /// Both directions between the pair, newest first.
    async fn find_between(
        &self,
        user_id: &Uuid,
        other_id: &Uuid,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<MessageEntity>, error::SystemError>;

    /// Every message the user sent or received, newest first.
    async fn find_by_user(&self, user_id: &Uuid) -> Result<Vec<MessageEntity>, error::SystemError>;

    async fn mark_read(&self, id: &Uuid) -> Result<Option<MessageEntity>, error::SystemError>;

    /// Flips unread messages from `sender_id` to `receiver_id`; returns how many changed.
    async fn mark_thread_read(
        &self,
        receiver_id: &Uuid,
        sender_id: &Uuid,
    ) -> Result<u64, error::SystemError>;
}
