use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        event::{
            model::{
                CreateEventModel, EventFilter, EventListQuery, EventSearchQuery, UpdateEventModel,
            },
            repository::EventRepo,
            schema::{EventAttendeeEntity, EventEntity, RsvpStatus},
        },
        group::repository::GroupRepo,
    },
    policy::{self, Operation},
    utils::Pagination,
};

#[derive(Clone)]
pub struct EventService {
    event_repo: Arc<dyn EventRepo>,
    group_repo: Arc<dyn GroupRepo>,
}

impl EventService {
    pub fn with_dependencies(event_repo: Arc<dyn EventRepo>, group_repo: Arc<dyn GroupRepo>) -> Self {
        EventService { event_repo, group_repo }
    }

    pub async fn create_event(
        &self,
        actor_id: Uuid,
        event: CreateEventModel,
    ) -> Result<EventEntity, error::SystemError> {
        if let Some(end_time) = event.end_time {
            if end_time < event.start_time {
                return Err(error::SystemError::bad_request("end_time must not precede start_time"));
            }
        }

        if let Some(group_id) = event.group_id {
            self.ensure_group(group_id).await?;
        }

        let event = self.event_repo.create(&actor_id, &event).await?;
        tracing::debug!("Event {} created by {}", event.id, actor_id);
        Ok(event)
    }

    pub async fn get_event(&self, event_id: Uuid) -> Result<EventEntity, error::SystemError> {
        self.event_repo
            .find_by_id(&event_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Event not found"))
    }

    pub async fn list_events(
        &self,
        query: &EventListQuery,
        page: &Pagination,
    ) -> Result<Vec<EventEntity>, error::SystemError> {
        self.event_repo.list(&EventFilter::from(query), page.skip(), page.limit()).await
    }

    /// Events whose start falls inside the given bounds, latest start first.
    pub async fn search_events(
        &self,
        query: &EventSearchQuery,
        page: &Pagination,
    ) -> Result<Vec<EventEntity>, error::SystemError> {
        if let (Some(from), Some(until)) = (query.start_from, query.end_until) {
            if from > until {
                return Err(error::SystemError::bad_request("start_from must not be after end_until"));
            }
        }

        self.event_repo.list(&EventFilter::from(query), page.skip(), page.limit()).await
    }

    pub async fn update_event(
        &self,
        event_id: Uuid,
        changes: UpdateEventModel,
        actor_id: Uuid,
    ) -> Result<EventEntity, error::SystemError> {
        let event = self.get_event(event_id).await?;

        let held = policy::owned_relations(&actor_id, Some(&event.created_by), None);
        policy::authorize(Operation::UpdateEvent, &held)
            .ensure("Only the event owner can update it")?;

        if changes.is_empty() {
            return Err(error::SystemError::bad_request("No fields to update"));
        }
        if matches!(changes.max_attendees, Some(Some(n)) if n < 1) {
            return Err(error::SystemError::bad_request("max_attendees must be positive"));
        }

        let start_time = changes.start_time.unwrap_or(event.start_time);
        let end_time = changes.end_time.unwrap_or(event.end_time);
        if end_time.is_some_and(|end| end < start_time) {
            return Err(error::SystemError::bad_request("end_time must not precede start_time"));
        }

        if let Some(Some(group_id)) = changes.group_id {
            self.ensure_group(group_id).await?;
        }

        let updated = self
            .event_repo
            .update(&event_id, &changes)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Event not found"))?;

        tracing::debug!("Event {} updated by {}", event_id, actor_id);
        Ok(updated)
    }

    pub async fn delete_event(&self, event_id: Uuid, actor_id: Uuid) -> Result<(), error::SystemError> {
        let event = self.get_event(event_id).await?;

        let held = policy::owned_relations(&actor_id, Some(&event.created_by), None);
        policy::authorize(Operation::DeleteEvent, &held)
            .ensure("Only the event owner can delete it")?;

        if !self.event_repo.delete(&event_id).await? {
            return Err(error::SystemError::not_found("Event not found"));
        }
        Ok(())
    }

    pub async fn list_attendees(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<EventAttendeeEntity>, error::SystemError> {
        self.get_event(event_id).await?;
        self.event_repo.find_attendees(&event_id).await
    }

    /// Records the user's answer; nobody can RSVP on someone else's behalf.
    pub async fn rsvp(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        status: Option<&str>,
        actor_id: Uuid,
    ) -> Result<EventAttendeeEntity, error::SystemError> {
        ensure_self(Operation::Rsvp, actor_id, user_id)?;
        self.get_event(event_id).await?;

        let status = status.map(str::parse::<RsvpStatus>).transpose()?.unwrap_or_default();

        let attendee = self
            .event_repo
            .insert_attendee(&event_id, &user_id, status)
            .await?
            .ok_or_else(|| error::SystemError::conflict("Already responded to this event"))?;

        tracing::debug!("User {} RSVPed {} to event {}", user_id, status, event_id);
        Ok(attendee)
    }

    pub async fn update_rsvp(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        status: &str,
        actor_id: Uuid,
    ) -> Result<EventAttendeeEntity, error::SystemError> {
        ensure_self(Operation::UpdateRsvp, actor_id, user_id)?;

        let status = status.parse::<RsvpStatus>()?;

        let attendee = self
            .event_repo
            .update_status(&event_id, &user_id, status)
            .await?
            .ok_or_else(|| error::SystemError::not_found("RSVP not found"))?;

        tracing::debug!("User {} changed RSVP to {} for event {}", user_id, status, event_id);
        Ok(attendee)
    }

    pub async fn remove_rsvp(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        actor_id: Uuid,
    ) -> Result<(), error::SystemError> {
        ensure_self(Operation::RemoveRsvp, actor_id, user_id)?;

        if !self.event_repo.delete_attendee(&event_id, &user_id).await? {
            return Err(error::SystemError::not_found("RSVP not found"));
        }
        Ok(())
    }

    async fn ensure_group(&self, group_id: Uuid) -> Result<(), error::SystemError> {
        if self.group_repo.find_by_id(&group_id).await?.is_none() {
            return Err(error::SystemError::not_found("Group not found"));
        }
        Ok(())
    }
}

fn ensure_self(operation: Operation, actor_id: Uuid, user_id: Uuid) -> Result<(), error::SystemError> {
    let held = policy::owned_relations(&actor_id, None, Some(&user_id));
    policy::authorize(operation, &held).ensure("You can only manage your own RSVP")
}
