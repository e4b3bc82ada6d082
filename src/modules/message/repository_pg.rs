use uuid::Uuid;

use crate::{
    api::error,
    modules::message::{model::InsertMessage, repository::MessageRepository, schema::MessageEntity},
};

#[derive(Clone)]
pub struct MessageRepositoryPg {
    pool: sqlx::PgPool,
}

impl MessageRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl MessageRepository for MessageRepositoryPg {
    async fn create(&self, message: &InsertMessage) -> Result<MessageEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let message = sqlx::query_as::<_, MessageEntity>(
            r#"
            INSERT INTO messages (id, sender_id, receiver_id, content)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(message.sender_id)
        .bind(message.receiver_id)
        .bind(&message.content)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MessageEntity>, error::SystemError> {
        let message = sqlx::query_as::<_, MessageEntity>("SELECT * FROM messages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(message)
    }

    async fn find_between(
        &self,
        user_id: &Uuid,
        other_id: &Uuid,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<MessageEntity>, error::SystemError> {
        let messages = sqlx::query_as::<_, MessageEntity>(
            r#"
            SELECT * FROM messages
            WHERE (sender_id = $1 AND receiver_id = $2)
               OR (sender_id = $2 AND receiver_id = $1)
            ORDER BY created_at DESC, id DESC
            OFFSET $3
            LIMIT $4
            "#,
        )
        .bind(user_id)
        .bind(other_id)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn find_by_user(&self, user_id: &Uuid) -> Result<Vec<MessageEntity>, error::SystemError> {
        let messages = sqlx::query_as::<_, MessageEntity>(
            r#"
            SELECT * FROM messages
            WHERE sender_id = $1 OR receiver_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn mark_read(&self, id: &Uuid) -> Result<Option<MessageEntity>, error::SystemError> {
        let message = sqlx::query_as::<_, MessageEntity>(
            "UPDATE messages SET is_read = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(message)
    }

    async fn mark_thread_read(
        &self,
        receiver_id: &Uuid,
        sender_id: &Uuid,
    ) -> Result<u64, error::SystemError> {
        let rows = sqlx::query(
            r#"
            UPDATE messages SET is_read = TRUE
            WHERE receiver_id = $1 AND sender_id = $2 AND is_read = FALSE
            "#,
        )
        .bind(receiver_id)
        .bind(sender_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows)
    }
}
