use uuid::Uuid;

use crate::{
    api::error,
    modules::group::{
        model::{CreateGroupModel, GroupListQuery, UpdateGroupModel},
        schema::{GroupEntity, GroupMemberEntity, GroupRole},
    },
};

#[async_trait::async_trait]
pub trait GroupRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<GroupEntity>, error::SystemError>;

    async fn list(
        &self,
        query: &GroupListQuery,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<GroupEntity>, error::SystemError>;

    async fn create(
        &self,
        created_by: &Uuid,
        group: &CreateGroupModel,
    ) -> Result<GroupEntity, error::SystemError>;

    async fn update(
        &self,
        id: &Uuid,
        group: &UpdateGroupModel,
    ) -> Result<Option<GroupEntity>, error::SystemError>;

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError>;
}

/// Membership registry, one row per (group, user).
#[async_trait::async_trait]
pub trait MemberRepository {
    async fn find_members(
        &self,
        group_id: &Uuid,
    ) -> Result<Vec<GroupMemberEntity>, error::SystemError>;

    /// `None` when the user is already a member.
    async fn insert_member(
        &self,
        group_id: &Uuid,
        user_id: &Uuid,
        role: GroupRole,
    ) -> Result<Option<GroupMemberEntity>, error::SystemError>;

    async fn update_role(
        &self,
        group_id: &Uuid,
        user_id: &Uuid,
        role: GroupRole,
    ) -> Result<Option<GroupMemberEntity>, error::SystemError>;

    async fn delete_member(&self, group_id: &Uuid, user_id: &Uuid)
        -> Result<bool, error::SystemError>;
}

pub trait GroupRepo: GroupRepository + MemberRepository + Send + Sync {}

impl<T> GroupRepo for T where T: GroupRepository + MemberRepository + Send + Sync {}
