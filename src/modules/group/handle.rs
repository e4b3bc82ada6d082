use actix_web::{delete, get, patch, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::group::{
        model::{
            AddMemberModel, ChangeRoleModel, CreateGroupModel, GroupListQuery, MemberPath,
            UpdateGroupModel,
        },
        schema::{GroupEntity, GroupMemberEntity},
        service::GroupService,
    },
    utils::{Pagination, ValidatedJson, ValidatedQuery},
};

#[post("")]
pub async fn create_group(
    group_service: web::Data<GroupService>,
    body: ValidatedJson<CreateGroupModel>,
    req: HttpRequest,
) -> Result<success::Success<GroupEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let group = group_service.create_group(user_id, body.0).await?;
    Ok(success::Success::created(Some(group)).message("Group created successfully"))
}

#[get("")]
pub async fn list_groups(
    group_service: web::Data<GroupService>,
    query: ValidatedQuery<GroupListQuery>,
    page: ValidatedQuery<Pagination>,
) -> Result<success::Success<Vec<GroupEntity>>, error::Error> {
    let groups = group_service.list_groups(&query.0, &page.0).await?;
    Ok(success::Success::ok(Some(groups)).message("Groups retrieved successfully"))
}

#[get("/{group_id}")]
pub async fn get_group(
    group_service: web::Data<GroupService>,
    group_id: web::Path<Uuid>,
) -> Result<success::Success<GroupEntity>, error::Error> {
    let group = group_service.get_group(*group_id).await?;
    Ok(success::Success::ok(Some(group)).message("Group retrieved successfully"))
}

#[patch("/{group_id}")]
pub async fn update_group(
    group_service: web::Data<GroupService>,
    group_id: web::Path<Uuid>,
    body: ValidatedJson<UpdateGroupModel>,
    req: HttpRequest,
) -> Result<success::Success<GroupEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let group = group_service.update_group(*group_id, body.0, user_id).await?;
    Ok(success::Success::ok(Some(group)).message("Group updated successfully"))
}

#[delete("/{group_id}")]
pub async fn delete_group(
    group_service: web::Data<GroupService>,
    group_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    group_service.delete_group(*group_id, user_id).await?;
    Ok(success::Success::no_content())
}

#[get("/{group_id}/members")]
pub async fn list_members(
    group_service: web::Data<GroupService>,
    group_id: web::Path<Uuid>,
) -> Result<success::Success<Vec<GroupMemberEntity>>, error::Error> {
    let members = group_service.list_members(*group_id).await?;
    Ok(success::Success::ok(Some(members)).message("Members retrieved successfully"))
}

#[post("/{group_id}/members")]
pub async fn add_member(
    group_service: web::Data<GroupService>,
    group_id: web::Path<Uuid>,
    body: ValidatedJson<AddMemberModel>,
    req: HttpRequest,
) -> Result<success::Success<GroupMemberEntity>, error::Error> {
    let actor_id = get_claims(&req)?.sub;
    let member = group_service
        .add_member(*group_id, body.0.user_id, body.0.role.as_deref(), actor_id)
        .await?;
    Ok(success::Success::created(Some(member)).message("Member added successfully"))
}

#[patch("/{group_id}/members/{user_id}")]
pub async fn change_role(
    group_service: web::Data<GroupService>,
    path: web::Path<MemberPath>,
    body: ValidatedJson<ChangeRoleModel>,
    req: HttpRequest,
) -> Result<success::Success<GroupMemberEntity>, error::Error> {
    let actor_id = get_claims(&req)?.sub;
    let member =
        group_service.change_role(path.group_id, path.user_id, &body.0.role, actor_id).await?;
    Ok(success::Success::ok(Some(member)).message("Member role updated successfully"))
}

#[delete("/{group_id}/members/{user_id}")]
pub async fn remove_member(
    group_service: web::Data<GroupService>,
    path: web::Path<MemberPath>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let actor_id = get_claims(&req)?.sub;
    group_service.remove_member(path.group_id, path.user_id, actor_id).await?;
    Ok(success::Success::no_content())
}
