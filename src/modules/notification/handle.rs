use actix_web::{delete, get, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::notification::{
        model::MarkedCount, schema::NotificationEntity, service::NotificationService,
    },
    utils::{Pagination, ValidatedQuery},
};

#[get("")]
pub async fn list_notifications(
    notification_service: web::Data<NotificationService>,
    page: ValidatedQuery<Pagination>,
    req: HttpRequest,
) -> Result<success::Success<Vec<NotificationEntity>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let notifications = notification_service.list(user_id, &page.0).await?;
    Ok(success::Success::ok(Some(notifications)).message("Notifications retrieved successfully"))
}

#[post("/read-all")]
pub async fn mark_all_read(
    notification_service: web::Data<NotificationService>,
    req: HttpRequest,
) -> Result<success::Success<MarkedCount>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let updated = notification_service.mark_all_read(user_id).await?;
    Ok(success::Success::ok(Some(MarkedCount { updated }))
        .message("Notifications marked as read"))
}

#[post("/{notification_id}/read")]
pub async fn mark_read(
    notification_service: web::Data<NotificationService>,
    notification_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<NotificationEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let notification = notification_service.mark_read(*notification_id, user_id).await?;
    Ok(success::Success::ok(Some(notification)).message("Notification marked as read"))
}

#[delete("/{notification_id}")]
pub async fn delete_notification(
    notification_service: web::Data<NotificationService>,
    notification_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    notification_service.delete(*notification_id, user_id).await?;
    Ok(success::Success::no_content())
}
