use uuid::Uuid;

use crate::{
    api::error,
    modules::notification::{
        model::NewNotification, repository::NotificationRepository, schema::NotificationEntity,
    },
};

#[derive(Clone)]
pub struct NotificationRepositoryPg {
    pool: sqlx::PgPool,
}

impl NotificationRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl NotificationRepository for NotificationRepositoryPg {
    async fn create(
        &self,
        notification: &NewNotification,
    ) -> Result<NotificationEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let notification = sqlx::query_as::<_, NotificationEntity>(
            r#"
            INSERT INTO notifications (id, user_id, type, title, message, data)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(notification.user_id)
        .bind(notification.kind)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(&notification.data)
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<NotificationEntity>, error::SystemError> {
        let notification =
            sqlx::query_as::<_, NotificationEntity>("SELECT * FROM notifications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(notification)
    }

    async fn find_by_user(
        &self,
        user_id: &Uuid,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<NotificationEntity>, error::SystemError> {
        let notifications = sqlx::query_as::<_, NotificationEntity>(
            r#"
            SELECT * FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    async fn mark_read(&self, id: &Uuid) -> Result<Option<NotificationEntity>, error::SystemError> {
        let notification = sqlx::query_as::<_, NotificationEntity>(
            "UPDATE notifications SET is_read = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(notification)
    }

    async fn mark_all_read(&self, user_id: &Uuid) -> Result<u64, error::SystemError> {
        let rows = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }
}
