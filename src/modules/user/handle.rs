use actix_web::{get, patch, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::user::{
        model::{
            SignInModel, SignInResponse, SignUpModel, SignUpResponse, UpdateUserModel,
            UserListQuery, UserResponse,
        },
        service::UserService,
    },
    utils::{Pagination, ValidatedJson, ValidatedQuery},
};

#[get("")]
pub async fn list_users(
    user_service: web::Data<UserService>,
    query: ValidatedQuery<UserListQuery>,
    page: ValidatedQuery<Pagination>,
) -> Result<success::Success<Vec<UserResponse>>, error::Error> {
    let users = user_service.list_users(&query.0, &page.0).await?;
    Ok(success::Success::ok(Some(users)).message("Users retrieved successfully"))
}

#[get("/profile")]
pub async fn get_profile(
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<success::Success<UserResponse>, error::Error> {
    let id = get_claims(&req)?.sub;
    let user = user_service.get_by_id(id).await?;
    Ok(success::Success::ok(Some(user)).message("Profile retrieved successfully"))
}

#[patch("/profile")]
pub async fn update_profile(
    user_service: web::Data<UserService>,
    user_data: ValidatedJson<UpdateUserModel>,
    req: HttpRequest,
) -> Result<success::Success<UserResponse>, error::Error> {
    let id = get_claims(&req)?.sub;
    let user = user_service.update_profile(id, user_data.0).await?;
    Ok(success::Success::ok(Some(user)).message("Profile updated successfully"))
}

#[get("/{id:[0-9a-fA-F-]{36}}")]
pub async fn get_user(
    user_service: web::Data<UserService>,
    user_id: web::Path<Uuid>,
) -> Result<success::Success<UserResponse>, error::Error> {
    let user = user_service.get_by_id(user_id.into_inner()).await?;
    Ok(success::Success::ok(Some(user)).message("User retrieved successfully"))
}

#[post("/signup")]
pub async fn sign_up(
    user_service: web::Data<UserService>,
    user_data: ValidatedJson<SignUpModel>,
) -> Result<success::Success<SignUpResponse>, error::Error> {
    let user_id = user_service.sign_up(user_data.0).await?;
    Ok(success::Success::created(Some(SignUpResponse { id: user_id })).message("Signup successful"))
}

#[post("/signin")]
pub async fn sign_in(
    user_service: web::Data<UserService>,
    user_data: ValidatedJson<SignInModel>,
) -> Result<success::Success<SignInResponse>, error::Error> {
    let access_token = user_service.sign_in(user_data.0).await?;
    let response = SignInResponse { access_token, token_type: "bearer" };
    Ok(success::Success::ok(Some(response)).message("Signin successful"))
}
