use uuid::Uuid;

use crate::{
    api::error,
    modules::event::{
        model::{CreateEventModel, EventFilter, UpdateEventModel},
        schema::{EventAttendeeEntity, EventEntity, RsvpStatus},
    },
};

#[async_trait::async_trait]
pub trait EventRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<EventEntity>, error::SystemError>;

    async fn list(
        &self,
        filter: &EventFilter,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<EventEntity>, error::SystemError>;

    async fn create(
        &self,
        created_by: &Uuid,
        event: &CreateEventModel,
    ) -> Result<EventEntity, error::SystemError>;

    async fn update(
        &self,
        id: &Uuid,
        event: &UpdateEventModel,
    ) -> Result<Option<EventEntity>, error::SystemError>;

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError>;
}

/// Attendance registry, one row per (event, user).
#[async_trait::async_trait]
pub trait AttendeeRepository {
    async fn find_attendees(
        &self,
        event_id: &Uuid,
    ) -> Result<Vec<EventAttendeeEntity>, error::SystemError>;

    /// `None` when the user already answered.
    async fn insert_attendee(
        &self,
        event_id: &Uuid,
        user_id: &Uuid,
        status: RsvpStatus,
    ) -> Result<Option<EventAttendeeEntity>, error::SystemError>;

    async fn update_status(
        &self,
        event_id: &Uuid,
        user_id: &Uuid,
        status: RsvpStatus,
    ) -> Result<Option<EventAttendeeEntity>, error::SystemError>;

    async fn delete_attendee(
        &self,
        event_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError>;
}

pub trait EventRepo: EventRepository + AttendeeRepository + Send + Sync {}

impl<T> EventRepo for T where T: EventRepository + AttendeeRepository + Send + Sync {}
