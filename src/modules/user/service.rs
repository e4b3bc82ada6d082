use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::configs::AuthConfig;
use crate::modules::user::model::{
    InsertUser, SignInModel, SignUpModel, UpdateUserModel, UserListQuery, UserResponse,
};
use crate::modules::user::repository::UserRepository;
use crate::utils::{hash_password, verify_password, Claims, Pagination};

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository + Send + Sync>,
    auth: AuthConfig,
}

impl UserService {
    pub fn with_dependencies(repo: Arc<dyn UserRepository + Send + Sync>, auth: AuthConfig) -> Self {
        info!("UserService initialized with dependencies");
        UserService { repo, auth }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<UserResponse, error::SystemError> {
        self.repo
            .find_by_id(&id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| error::SystemError::not_found("User not found"))
    }

    pub async fn list_users(
        &self,
        query: &UserListQuery,
        page: &Pagination,
    ) -> Result<Vec<UserResponse>, error::SystemError> {
        let users = self.repo.list(query, page.skip(), page.limit()).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        user: UpdateUserModel,
    ) -> Result<UserResponse, error::SystemError> {
        if user.name.is_none()
            && user.avatar_url.is_none()
            && user.bio.is_none()
            && user.location.is_none()
        {
            return Err(error::SystemError::bad_request("No fields to update"));
        }

        let updated = self
            .repo
            .update(&id, &user)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        Ok(UserResponse::from(updated))
    }

    pub async fn sign_up(&self, user: SignUpModel) -> Result<Uuid, error::SystemError> {
        if self.repo.find_by_email(&user.email).await?.is_some() {
            return Err(error::SystemError::conflict("Email already registered"));
        }

        let hash_password = hash_password(&user.password)?;

        let new_user = InsertUser {
            email: user.email,
            name: user.name,
            hash_password,
            avatar_url: user.avatar_url,
            bio: user.bio,
            location: user.location,
        };

        let user_id = self.repo.create(&new_user).await?;
        info!("User {} registered", user_id);
        Ok(user_id)
    }

    pub async fn sign_in(&self, user: SignInModel) -> Result<String, error::SystemError> {
        let user_entity = self
            .repo
            .find_by_email(&user.email)
            .await?
            .ok_or_else(|| error::SystemError::unauthorized("Invalid email or password"))?;

        let valid = verify_password(&user_entity.hash_password, &user.password)?;
        if !valid {
            return Err(error::SystemError::unauthorized("Invalid email or password"));
        }

        Claims::issue(&user_entity.id, &self.auth)
    }
}
