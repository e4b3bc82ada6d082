use actix_web::{get, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        message::{
            model::{MessageThread, SendMessageModel},
            schema::MessageEntity,
            service::MessageService,
        },
        notification::model::MarkedCount,
    },
    utils::{Pagination, ValidatedJson, ValidatedQuery},
};

#[post("")]
pub async fn send_message(
    message_service: web::Data<MessageService>,
    body: ValidatedJson<SendMessageModel>,
    req: HttpRequest,
) -> Result<success::Success<MessageEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let SendMessageModel { receiver_id, content } = body.0;
    let message = message_service.send_message(user_id, receiver_id, content).await?;
    Ok(success::Success::created(Some(message)).message("Message sent successfully"))
}

#[get("/threads")]
pub async fn list_threads(
    message_service: web::Data<MessageService>,
    req: HttpRequest,
) -> Result<success::Success<Vec<MessageThread>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let threads = message_service.list_threads(user_id).await?;
    Ok(success::Success::ok(Some(threads)).message("Threads retrieved successfully"))
}

#[get("/with/{user_id}")]
pub async fn list_conversation(
    message_service: web::Data<MessageService>,
    other_id: web::Path<Uuid>,
    page: ValidatedQuery<Pagination>,
    req: HttpRequest,
) -> Result<success::Success<Vec<MessageEntity>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let messages = message_service.list_conversation(user_id, *other_id, &page.0).await?;
    Ok(success::Success::ok(Some(messages)).message("Messages retrieved successfully"))
}

#[post("/with/{user_id}/read")]
pub async fn mark_thread_read(
    message_service: web::Data<MessageService>,
    other_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<MarkedCount>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let updated = message_service.mark_thread_read(user_id, *other_id).await?;
    Ok(success::Success::ok(Some(MarkedCount { updated })).message("Messages marked as read"))
}

#[post("/{message_id}/read")]
pub async fn mark_read(
    message_service: web::Data<MessageService>,
    message_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<MessageEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let message = message_service.mark_read(*message_id, user_id).await?;
    Ok(success::Success::ok(Some(message)).message("Message marked as read"))
}
