use uuid::Uuid;

use crate::{
    api::error,
    modules::notification::{model::NewNotification, schema::NotificationEntity},
};

#[async_trait::async_trait]
pub trait NotificationRepository {
    async fn create(
        &self,
        notification: &NewNotification,
    ) -> Result<NotificationEntity, error::SystemError>;

    async fn find_by_id(&self, id: &Uuid)
        -> Result<Option<NotificationEntity>, error::SystemError>;

    /// Newest first.
    async fn find_by_user(
        &self,
        user_id: &Uuid,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<NotificationEntity>, error::SystemError>;

    async fn mark_read(&self, id: &Uuid) -> Result<Option<NotificationEntity>, error::SystemError>;

    async fn mark_all_read(&self, user_id: &Uuid) -> Result<u64, error::SystemError>;

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError>;
}
