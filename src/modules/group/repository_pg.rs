use uuid::Uuid;

use crate::{
    api::error,
    modules::group::{
        model::{CreateGroupModel, GroupListQuery, UpdateGroupModel},
        repository::{GroupRepository, MemberRepository},
        schema::{GroupEntity, GroupMemberEntity, GroupRole},
    },
};

#[derive(Clone)]
pub struct GroupRepositoryPg {
    pool: sqlx::PgPool,
}

impl GroupRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl GroupRepository for GroupRepositoryPg {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<GroupEntity>, error::SystemError> {
        let group = sqlx::query_as::<_, GroupEntity>("SELECT * FROM groups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(group)
    }

    async fn list(
        &self,
        query: &GroupListQuery,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<GroupEntity>, error::SystemError> {
        let column = query.sort_by.column();
        let order = query.sort_order.as_sql();

        let groups = sqlx::query_as::<_, GroupEntity>(&format!(
            r#"
            SELECT * FROM groups
            WHERE $1::text IS NULL OR name ILIKE '%' || $1 || '%'
            ORDER BY {column} {order}, id {order}
            OFFSET $2 LIMIT $3
            "#
        ))
        .bind(query.search())
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(groups)
    }

    async fn create(
        &self,
        created_by: &Uuid,
        group: &CreateGroupModel,
    ) -> Result<GroupEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let group = sqlx::query_as::<_, GroupEntity>(
            r#"
            INSERT INTO groups (id, name, description, is_public, max_members, created_by)
            VALUES ($1, $2, $3, COALESCE($4, TRUE), $5, $6)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&group.name)
        .bind(&group.description)
        .bind(group.is_public)
        .bind(group.max_members)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(group)
    }

    async fn update(
        &self,
        id: &Uuid,
        group: &UpdateGroupModel,
    ) -> Result<Option<GroupEntity>, error::SystemError> {
        let group = sqlx::query_as::<_, GroupEntity>(
            r#"
            UPDATE groups
            SET
                name        = COALESCE($2, name),
                description = CASE WHEN $3::boolean THEN $4 ELSE description END,
                is_public   = COALESCE($5, is_public),
                max_members = CASE WHEN $6::boolean THEN $7 ELSE max_members END,
                updated_at  = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&group.name)
        .bind(group.description.is_some())
        .bind(group.description.as_ref().and_then(|v| v.as_ref()))
        .bind(group.is_public)
        .bind(group.max_members.is_some())
        .bind(group.max_members.flatten())
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }
}

#[async_trait::async_trait]
impl MemberRepository for GroupRepositoryPg {
    async fn find_members(
        &self,
        group_id: &Uuid,
    ) -> Result<Vec<GroupMemberEntity>, error::SystemError> {
        let members = sqlx::query_as::<_, GroupMemberEntity>(
            "SELECT * FROM group_members WHERE group_id = $1 ORDER BY joined_at",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    async fn insert_member(
        &self,
        group_id: &Uuid,
        user_id: &Uuid,
        role: GroupRole,
    ) -> Result<Option<GroupMemberEntity>, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let member = sqlx::query_as::<_, GroupMemberEntity>(
            r#"
            INSERT INTO group_members (id, group_id, user_id, role)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (group_id, user_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(group_id)
        .bind(user_id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    async fn update_role(
        &self,
        group_id: &Uuid,
        user_id: &Uuid,
        role: GroupRole,
    ) -> Result<Option<GroupMemberEntity>, error::SystemError> {
        let member = sqlx::query_as::<_, GroupMemberEntity>(
            "UPDATE group_members SET role = $3 WHERE group_id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(group_id)
        .bind(user_id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    async fn delete_member(
        &self,
        group_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM group_members WHERE group_id = $1 AND user_id = $2")
            .bind(group_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }
}
