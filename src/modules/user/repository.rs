use uuid::Uuid;

use crate::{
    api::error,
    modules::user::{
        model::{InsertUser, UpdateUserModel, UserListQuery},
        schema::UserEntity,
    },
};

/// Identity store.
#[async_trait::async_trait]
pub trait UserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError>;

    async fn exists(&self, id: &Uuid) -> Result<bool, error::SystemError>;

    async fn list(
        &self,
        query: &UserListQuery,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<UserEntity>, error::SystemError>;

    async fn create(&self, user: &InsertUser) -> Result<Uuid, error::SystemError>;

    async fn update(
        &self,
        id: &Uuid,
        user: &UpdateUserModel,
    ) -> Result<Option<UserEntity>, error::SystemError>;
}
