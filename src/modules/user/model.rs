use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    modules::user::schema::UserEntity,
    utils::{double_option, search_term, SortOrder},
};

#[derive(Deserialize, Validate)]
pub struct SignUpModel {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct SignInModel {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Default, Deserialize, Validate)]
pub struct UpdateUserModel {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub avatar_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserSortField {
    Name,
    #[default]
    CreatedAt,
}

impl UserSortField {
    pub fn column(self) -> &'static str {
        match self {
            UserSortField::Name => "name",
            UserSortField::CreatedAt => "created_at",
        }
    }
}

/// `search` matches either the name or the email.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserListQuery {
    #[validate(length(max = 120, message = "search must be at most 120 characters long"))]
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: UserSortField,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl UserListQuery {
    pub fn search(&self) -> Option<&str> {
        search_term(&self.search)
    }
}

pub struct InsertUser {
    pub email: String,
    pub name: String,
    pub hash_password: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserEntity> for UserResponse {
    fn from(user: UserEntity) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            name: user.name,
            avatar_url: user.avatar_url,
            bio: user.bio,
            location: user.location,
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct SignUpResponse {
    pub id: Uuid,
}

#[derive(Serialize)]
pub struct SignInResponse {
    pub access_token: String,
    pub token_type: &'static str,
}
