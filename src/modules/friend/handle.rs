use actix_web::{delete, get, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        friend::{
            model::{FriendRequestBody, FriendRequestResponse, FriendResponse},
            repository_pg::FriendshipRepositoryPg,
            schema::FriendshipEntity,
            service::FriendService,
        },
        user::repository_pg::UserRepositoryPg,
    },
    utils::ValidatedJson,
};

pub type FriendSvc = FriendService<FriendshipRepositoryPg, UserRepositoryPg>;

#[post("/requests")]
pub async fn send_friend_request(
    friend_service: web::Data<FriendSvc>,
    body: ValidatedJson<FriendRequestBody>,
    req: HttpRequest,
) -> Result<success::Success<FriendshipEntity>, error::Error> {
    let sender_id = get_claims(&req)?.sub;
    let request = friend_service.send_friend_request(sender_id, body.0.recipient_id).await?;

    Ok(success::Success::created(Some(request)).message("Friend request sent successfully"))
}

#[get("/requests/incoming")]
pub async fn list_incoming_requests(
    friend_service: web::Data<FriendSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<FriendRequestResponse>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let requests = friend_service.get_incoming_requests(user_id).await?;

    Ok(success::Success::ok(Some(requests)).message("Friend requests retrieved successfully"))
}

#[get("/requests/outgoing")]
pub async fn list_outgoing_requests(
    friend_service: web::Data<FriendSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<FriendRequestResponse>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let requests = friend_service.get_outgoing_requests(user_id).await?;

    Ok(success::Success::ok(Some(requests)).message("Friend requests retrieved successfully"))
}

#[get("")]
pub async fn list_friends(
    friend_service: web::Data<FriendSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<FriendResponse>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let friends = friend_service.get_friends(user_id).await?;

    Ok(success::Success::ok(Some(friends)).message("Friends retrieved successfully"))
}

#[get("/{friendship_id}")]
pub async fn get_friendship(
    friend_service: web::Data<FriendSvc>,
    friendship_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<FriendshipEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let friendship = friend_service.get_friendship(user_id, *friendship_id).await?;

    Ok(success::Success::ok(Some(friendship)).message("Friendship retrieved successfully"))
}

#[post("/{friendship_id}/accept")]
pub async fn accept_friend_request(
    friend_service: web::Data<FriendSvc>,
    friendship_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<FriendshipEntity>, error::Error> {
    let receiver_id = get_claims(&req)?.sub;
    let friendship = friend_service.accept_friend_request(receiver_id, *friendship_id).await?;

    Ok(success::Success::ok(Some(friendship)).message("Friend request accepted successfully"))
}

#[post("/{friendship_id}/reject")]
pub async fn reject_friend_request(
    friend_service: web::Data<FriendSvc>,
    friendship_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let receiver_id = get_claims(&req)?.sub;
    friend_service.reject_friend_request(receiver_id, *friendship_id).await?;
    Ok(success::Success::no_content())
}

#[post("/{friendship_id}/block")]
pub async fn block_friendship(
    friend_service: web::Data<FriendSvc>,
    friendship_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<FriendshipEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let friendship = friend_service.block(user_id, *friendship_id).await?;

    Ok(success::Success::ok(Some(friendship)).message("User blocked successfully"))
}

#[delete("/{friendship_id}")]
pub async fn unlink_friendship(
    friend_service: web::Data<FriendSvc>,
    friendship_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    friend_service.unlink(user_id, *friendship_id).await?;
    Ok(success::Success::no_content())
}
