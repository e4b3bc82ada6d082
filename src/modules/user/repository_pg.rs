use uuid::Uuid;

use crate::{
    api::error,
    modules::user::{
        model::{InsertUser, UpdateUserModel, UserListQuery},
        repository::UserRepository,
        schema::UserEntity,
    },
};

#[derive(Clone)]
pub struct UserRepositoryPg {
    pool: sqlx::PgPool,
}

impl UserRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserRepository for UserRepositoryPg {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError> {
        let user = sqlx::query_as::<_, UserEntity>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError> {
        let user =
            sqlx::query_as::<_, UserEntity>("SELECT * FROM users WHERE lower(email) = lower($1)")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(user)
    }

    async fn exists(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn list(
        &self,
        query: &UserListQuery,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<UserEntity>, error::SystemError> {
        let column = query.sort_by.column();
        let order = query.sort_order.as_sql();

        let users = sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            SELECT * FROM users
            WHERE $1::text IS NULL
               OR name ILIKE '%' || $1 || '%'
               OR email ILIKE '%' || $1 || '%'
            ORDER BY {column} {order}, id {order}
            OFFSET $2 LIMIT $3
            "#
        ))
        .bind(query.search())
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn create(&self, user: &InsertUser) -> Result<Uuid, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        sqlx::query(
            r#"
            INSERT INTO users (id, email, name, hash_password, avatar_url, bio, location)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.hash_password)
        .bind(&user.avatar_url)
        .bind(&user.bio)
        .bind(&user.location)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update(
        &self,
        id: &Uuid,
        user: &UpdateUserModel,
    ) -> Result<Option<UserEntity>, error::SystemError> {
        let user = sqlx::query_as::<_, UserEntity>(
            r#"
        UPDATE users
        SET
            name       = COALESCE($2, name),
            avatar_url = CASE WHEN $3::boolean THEN $4 ELSE avatar_url END,
            bio        = CASE WHEN $5::boolean THEN $6 ELSE bio END,
            location   = CASE WHEN $7::boolean THEN $8 ELSE location END,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
        )
        .bind(id)
        .bind(&user.name)
        .bind(user.avatar_url.is_some())
        .bind(user.avatar_url.as_ref().and_then(|v| v.as_ref()))
        .bind(user.bio.is_some())
        .bind(user.bio.as_ref().and_then(|v| v.as_ref()))
        .bind(user.location.is_some())
        .bind(user.location.as_ref().and_then(|v| v.as_ref()))
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
