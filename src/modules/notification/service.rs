use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    modules::notification::{
        model::NewNotification, repository::NotificationRepository, schema::NotificationEntity,
    },
    policy::{self, Operation, Relation},
    utils::Pagination,
};

#[derive(Clone)]
pub struct NotificationService {
    repo: Arc<dyn NotificationRepository + Send + Sync>,
}

impl NotificationService {
    pub fn with_dependencies(repo: Arc<dyn NotificationRepository + Send + Sync>) -> Self {
        NotificationService { repo }
    }

    pub async fn notify(
        &self,
        notification: NewNotification,
    ) -> Result<NotificationEntity, error::SystemError> {
        self.repo.create(&notification).await
    }

    /// Delivery that must not undo the change that triggered it.
    pub async fn notify_best_effort(&self, notification: NewNotification) {
        let (user_id, kind) = (notification.user_id, notification.kind);
        if let Err(e) = self.notify(notification).await {
            log::warn!("Failed to deliver {} notification to {}: {:?}", kind, user_id, e);
        }
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        page: &Pagination,
    ) -> Result<Vec<NotificationEntity>, error::SystemError> {
        self.repo.find_by_user(&user_id, page.skip(), page.limit()).await
    }

    pub async fn mark_read(
        &self,
        notification_id: Uuid,
        actor_id: Uuid,
    ) -> Result<NotificationEntity, error::SystemError> {
        self.load_owned(notification_id, actor_id, Operation::MarkNotificationRead).await?;

        self.repo
            .mark_read(&notification_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Notification not found"))
    }

    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, error::SystemError> {
        self.repo.mark_all_read(&user_id).await
    }

    pub async fn delete(
        &self,
        notification_id: Uuid,
        actor_id: Uuid,
    ) -> Result<(), error::SystemError> {
        self.load_owned(notification_id, actor_id, Operation::DeleteNotification).await?;

        if !self.repo.delete(&notification_id).await? {
            return Err(error::SystemError::not_found("Notification not found"));
        }
        Ok(())
    }

    async fn load_owned(
        &self,
        notification_id: Uuid,
        actor_id: Uuid,
        operation: Operation,
    ) -> Result<NotificationEntity, error::SystemError> {
        let notification = self
            .repo
            .find_by_id(&notification_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Notification not found"))?;

        let held: &[Relation] =
            if notification.user_id == actor_id { &[Relation::Recipient] } else { &[] };
        policy::authorize(operation, held).ensure("This notification belongs to another user")?;

        Ok(notification)
    }
}
