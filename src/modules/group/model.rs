use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::utils::{double_option, search_term, SortOrder};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGroupModel {
    #[validate(length(min = 1, max = 120, message = "Group name must be 1-120 characters long"))]
    pub name: String,
    pub description: Option<String>,
    pub is_public: Option<bool>,
    #[validate(range(min = 1, message = "max_members must be positive"))]
    pub max_members: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGroupModel {
    #[validate(length(min = 1, max = 120, message = "Group name must be 1-120 characters long"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub is_public: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub max_members: Option<Option<i32>>,
}

impl UpdateGroupModel {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.is_public.is_none()
            && self.max_members.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupSortField {
    Name,
    #[default]
    CreatedAt,
}

impl GroupSortField {
    pub fn column(self) -> &'static str {
        match self {
            GroupSortField::Name => "name",
            GroupSortField::CreatedAt => "created_at",
        }
    }
}

/// Query string of `GET /groups`; paging comes separately as `Pagination`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GroupListQuery {
    #[validate(length(max = 120, message = "search must be at most 120 characters long"))]
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: GroupSortField,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl GroupListQuery {
    pub fn search(&self) -> Option<&str> {
        search_term(&self.search)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddMemberModel {
    pub user_id: Uuid,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangeRoleModel {
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberPath {
    pub group_id: Uuid,
    pub user_id: Uuid,
}
