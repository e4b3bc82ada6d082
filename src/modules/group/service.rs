use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    constants::notification_type,
    modules::{
        group::{
            model::{CreateGroupModel, GroupListQuery, UpdateGroupModel},
            repository::GroupRepo,
            schema::{GroupEntity, GroupMemberEntity, GroupRole},
        },
        notification::{model::NewNotification, service::NotificationService},
        user::repository::UserRepository,
    },
    policy::{self, Operation},
    utils::Pagination,
};

#[derive(Clone)]
pub struct GroupService {
    group_repo: Arc<dyn GroupRepo>,
    user_repo: Arc<dyn UserRepository + Send + Sync>,
    notifications: NotificationService,
}

impl GroupService {
    pub fn with_dependencies(
        group_repo: Arc<dyn GroupRepo>,
        user_repo: Arc<dyn UserRepository + Send + Sync>,
        notifications: NotificationService,
    ) -> Self {
        GroupService { group_repo, user_repo, notifications }
    }

    pub async fn create_group(
        &self,
        actor_id: Uuid,
        group: CreateGroupModel,
    ) -> Result<GroupEntity, error::SystemError> {
        let group = self.group_repo.create(&actor_id, &group).await?;
        tracing::debug!("Group {} created by {}", group.id, actor_id);
        Ok(group)
    }

    pub async fn get_group(&self, group_id: Uuid) -> Result<GroupEntity, error::SystemError> {
        self.group_repo
            .find_by_id(&group_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Group not found"))
    }

    pub async fn list_groups(
        &self,
        query: &GroupListQuery,
        page: &Pagination,
    ) -> Result<Vec<GroupEntity>, error::SystemError> {
        self.group_repo.list(query, page.skip(), page.limit()).await
    }

    pub async fn update_group(
        &self,
        group_id: Uuid,
        changes: UpdateGroupModel,
        actor_id: Uuid,
    ) -> Result<GroupEntity, error::SystemError> {
        self.load_authorized(group_id, actor_id, Operation::UpdateGroup, None).await?;

        if changes.is_empty() {
            return Err(error::SystemError::bad_request("No fields to update"));
        }

        self.group_repo
            .update(&group_id, &changes)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Group not found"))
    }

    pub async fn delete_group(&self, group_id: Uuid, actor_id: Uuid) -> Result<(), error::SystemError> {
        self.load_authorized(group_id, actor_id, Operation::DeleteGroup, None).await?;

        if !self.group_repo.delete(&group_id).await? {
            return Err(error::SystemError::not_found("Group not found"));
        }
        Ok(())
    }

    pub async fn list_members(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<GroupMemberEntity>, error::SystemError> {
        self.get_group(group_id).await?;
        self.group_repo.find_members(&group_id).await
    }

    pub async fn add_member(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        role: Option<&str>,
        actor_id: Uuid,
    ) -> Result<GroupMemberEntity, error::SystemError> {
        let group = self.load_authorized(group_id, actor_id, Operation::AddMember, None).await?;

        let role = role.map(str::parse::<GroupRole>).transpose()?.unwrap_or_default();

        if !self.user_repo.exists(&user_id).await? {
            return Err(error::SystemError::not_found("User not found"));
        }

        let member = self
            .group_repo
            .insert_member(&group_id, &user_id, role)
            .await?
            .ok_or_else(|| error::SystemError::conflict("User is already a member of this group"))?;

        tracing::debug!("User {} joined group {} as {}", user_id, group_id, role);

        if user_id != actor_id {
            self.notifications
                .notify_best_effort(NewNotification {
                    user_id,
                    kind: notification_type::GROUP_MEMBER_ADDED,
                    title: "Added to group".into(),
                    message: format!("You were added to {}", group.name),
                    data: Some(serde_json::json!({ "group_id": group_id, "role": role })),
                })
                .await;
        }

        Ok(member)
    }

    pub async fn change_role(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        role: &str,
        actor_id: Uuid,
    ) -> Result<GroupMemberEntity, error::SystemError> {
        self.load_authorized(group_id, actor_id, Operation::ChangeRole, Some(user_id)).await?;

        let role = role.parse::<GroupRole>()?;

        let member = self
            .group_repo
            .update_role(&group_id, &user_id, role)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Membership not found"))?;

        tracing::debug!("User {} is now {} in group {}", user_id, role, group_id);
        Ok(member)
    }

    /// The owner may remove anyone; members may remove themselves.
    pub async fn remove_member(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        actor_id: Uuid,
    ) -> Result<(), error::SystemError> {
        self.load_authorized(group_id, actor_id, Operation::RemoveMember, Some(user_id)).await?;

        if !self.group_repo.delete_member(&group_id, &user_id).await? {
            return Err(error::SystemError::not_found("Membership not found"));
        }

        tracing::debug!("User {} left group {}", user_id, group_id);
        Ok(())
    }

    async fn load_authorized(
        &self,
        group_id: Uuid,
        actor_id: Uuid,
        operation: Operation,
        subject: Option<Uuid>,
    ) -> Result<GroupEntity, error::SystemError> {
        let group = self.get_group(group_id).await?;

        let held = policy::owned_relations(&actor_id, Some(&group.created_by), subject.as_ref());
        policy::authorize(operation, &held)
            .ensure("Only the group owner can perform this action")?;

        Ok(group)
    }
}
