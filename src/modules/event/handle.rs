use actix_web::{delete, get, patch, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::event::{
        model::{
            AttendeePath, CreateEventModel, EventListQuery, EventSearchQuery, RsvpModel,
            UpdateEventModel, UpdateRsvpModel,
        },
        schema::{EventAttendeeEntity, EventEntity},
        service::EventService,
    },
    utils::{Pagination, ValidatedJson, ValidatedQuery},
};

#[post("")]
pub async fn create_event(
    event_service: web::Data<EventService>,
    body: ValidatedJson<CreateEventModel>,
    req: HttpRequest,
) -> Result<success::Success<EventEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let event = event_service.create_event(user_id, body.0).await?;
    Ok(success::Success::created(Some(event)).message("Event created successfully"))
}

#[get("")]
pub async fn list_events(
    event_service: web::Data<EventService>,
    query: ValidatedQuery<EventListQuery>,
    page: ValidatedQuery<Pagination>,
) -> Result<success::Success<Vec<EventEntity>>, error::Error> {
    let events = event_service.list_events(&query.0, &page.0).await?;
    Ok(success::Success::ok(Some(events)).message("Events retrieved successfully"))
}

#[get("/search")]
pub async fn search_events(
    event_service: web::Data<EventService>,
    query: ValidatedQuery<EventSearchQuery>,
    page: ValidatedQuery<Pagination>,
) -> Result<success::Success<Vec<EventEntity>>, error::Error> {
    let events = event_service.search_events(&query.0, &page.0).await?;
    Ok(success::Success::ok(Some(events)).message("Events retrieved successfully"))
}

#[get("/{event_id}")]
pub async fn get_event(
    event_service: web::Data<EventService>,
    event_id: web::Path<Uuid>,
) -> Result<success::Success<EventEntity>, error::Error> {
    let event = event_service.get_event(*event_id).await?;
    Ok(success::Success::ok(Some(event)).message("Event retrieved successfully"))
}

#[patch("/{event_id}")]
pub async fn update_event(
    event_service: web::Data<EventService>,
    event_id: web::Path<Uuid>,
    body: ValidatedJson<UpdateEventModel>,
    req: HttpRequest,
) -> Result<success::Success<EventEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let event = event_service.update_event(*event_id, body.0, user_id).await?;
    Ok(success::Success::ok(Some(event)).message("Event updated successfully"))
}

#[delete("/{event_id}")]
pub async fn delete_event(
    event_service: web::Data<EventService>,
    event_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    event_service.delete_event(*event_id, user_id).await?;
    Ok(success::Success::no_content())
}

#[get("/{event_id}/attendees")]
pub async fn list_attendees(
    event_service: web::Data<EventService>,
    event_id: web::Path<Uuid>,
) -> Result<success::Success<Vec<EventAttendeeEntity>>, error::Error> {
    let attendees = event_service.list_attendees(*event_id).await?;
    Ok(success::Success::ok(Some(attendees)).message("Attendees retrieved successfully"))
}

#[post("/{event_id}/attendees")]
pub async fn rsvp(
    event_service: web::Data<EventService>,
    event_id: web::Path<Uuid>,
    body: ValidatedJson<RsvpModel>,
    req: HttpRequest,
) -> Result<success::Success<EventAttendeeEntity>, error::Error> {
    let actor_id = get_claims(&req)?.sub;
    let user_id = body.0.user_id.unwrap_or(actor_id);
    let attendee =
        event_service.rsvp(*event_id, user_id, body.0.status.as_deref(), actor_id).await?;
    Ok(success::Success::created(Some(attendee)).message("RSVP recorded"))
}

#[patch("/{event_id}/attendees/{user_id}")]
pub async fn update_rsvp(
    event_service: web::Data<EventService>,
    path: web::Path<AttendeePath>,
    body: ValidatedJson<UpdateRsvpModel>,
    req: HttpRequest,
) -> Result<success::Success<EventAttendeeEntity>, error::Error> {
    let actor_id = get_claims(&req)?.sub;
    let attendee =
        event_service.update_rsvp(path.event_id, path.user_id, &body.0.status, actor_id).await?;
    Ok(success::Success::ok(Some(attendee)).message("RSVP updated"))
}

#[delete("/{event_id}/attendees/{user_id}")]
pub async fn remove_rsvp(
    event_service: web::Data<EventService>,
    path: web::Path<AttendeePath>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let actor_id = get_claims(&req)?.sub;
    event_service.remove_rsvp(path.event_id, path.user_id, actor_id).await?;
    Ok(success::Success::no_content())
}
