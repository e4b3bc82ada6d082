use uuid::Uuid;

use crate::{
    api::error,
    modules::friend::{
        model::{FriendResponse, FriendUserRow},
        repository::FriendshipRepository,
        schema::{FriendshipEntity, FriendshipStatus},
    },
};

const FRIENDSHIP_COLUMNS: &str = "id, user_id, friend_id, status, created_at, updated_at";

#[derive(Clone)]
pub struct FriendshipRepositoryPg {
    pool: sqlx::PgPool,
}

impl FriendshipRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FriendshipRepository for FriendshipRepositoryPg {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<FriendshipEntity>, error::SystemError> {
        let friendship = sqlx::query_as::<_, FriendshipEntity>(&format!(
            "SELECT {FRIENDSHIP_COLUMNS} FROM friendships WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(friendship)
    }

    async fn find_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError> {
        let (user_low, user_high) =
            if user_id_a <= user_id_b { (user_id_a, user_id_b) } else { (user_id_b, user_id_a) };

        let friendship = sqlx::query_as::<_, FriendshipEntity>(&format!(
            "SELECT {FRIENDSHIP_COLUMNS} FROM friendships WHERE user_low = $1 AND user_high = $2"
        ))
        .bind(user_low)
        .bind(user_high)
        .fetch_optional(&self.pool)
        .await?;

        Ok(friendship)
    }

    async fn create_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));

        // The pair index covers both directions, so a racing reverse request loses here.
        let friendship = sqlx::query_as::<_, FriendshipEntity>(&format!(
            r#"
            INSERT INTO friendships (id, user_id, friend_id, status)
            VALUES ($1, $2, $3, 'pending')
            ON CONFLICT (user_low, user_high) DO NOTHING
            RETURNING {FRIENDSHIP_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(sender_id)
        .bind(receiver_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(friendship)
    }

    async fn update_status(
        &self,
        id: &Uuid,
        expected: FriendshipStatus,
        next: FriendshipStatus,
    ) -> Result<Option<FriendshipEntity>, error::SystemError> {
        let friendship = sqlx::query_as::<_, FriendshipEntity>(&format!(
            r#"
            UPDATE friendships
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING {FRIENDSHIP_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(expected)
        .bind(next)
        .fetch_optional(&self.pool)
        .await?;

        Ok(friendship)
    }

    async fn delete(
        &self,
        id: &Uuid,
        expected: Option<FriendshipStatus>,
    ) -> Result<bool, error::SystemError> {
        let rows = sqlx::query(
            "DELETE FROM friendships WHERE id = $1 AND ($2::friendship_status IS NULL OR status = $2)",
        )
        .bind(id)
        .bind(expected)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }

    async fn find_friends(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendResponse>, error::SystemError> {
        let friends = sqlx::query_as::<_, FriendResponse>(
            r#"
        SELECT
            u.id,
            u.name,
            u.avatar_url
        FROM friendships f
        JOIN users u
            ON u.id = CASE
                WHEN f.user_id = $1 THEN f.friend_id
                ELSE f.user_id
            END
        WHERE f.status = 'accepted'
          AND (f.user_id = $1 OR f.friend_id = $1)
        ORDER BY u.name
        "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(friends)
    }

    async fn find_requests_to_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendUserRow>, error::SystemError> {
        let rows = sqlx::query_as::<_, FriendUserRow>(
            r#"
            SELECT
                f.id AS req_id,
                u.id AS user_id,
                u.name,
                u.avatar_url,
                f.created_at
            FROM friendships f
            JOIN users u
                ON f.user_id = u.id
            WHERE f.friend_id = $1 AND f.status = 'pending'
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_requests_from_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendUserRow>, error::SystemError> {
        let rows = sqlx::query_as::<_, FriendUserRow>(
            r#"
            SELECT
                f.id AS req_id,
                u.id AS user_id,
                u.name,
                u.avatar_url,
                f.created_at
            FROM friendships f
            JOIN users u
                ON f.friend_id = u.id
            WHERE f.user_id = $1 AND f.status = 'pending'
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
