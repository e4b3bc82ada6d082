use uuid::Uuid;

use crate::{
    api::error,
    modules::event::{
        model::{CreateEventModel, EventFilter, UpdateEventModel},
        repository::{AttendeeRepository, EventRepository},
        schema::{EventAttendeeEntity, EventEntity, RsvpStatus},
    },
};

#[derive(Clone)]
pub struct EventRepositoryPg {
    pool: sqlx::PgPool,
}

impl EventRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl EventRepository for EventRepositoryPg {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<EventEntity>, error::SystemError> {
        let event = sqlx::query_as::<_, EventEntity>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(event)
    }

    async fn list(
        &self,
        filter: &EventFilter,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<EventEntity>, error::SystemError> {
        let column = filter.sort_by.column();
        let order = filter.sort_order.as_sql();

        let events = sqlx::query_as::<_, EventEntity>(&format!(
            r#"
            SELECT * FROM events
            WHERE ($1::uuid IS NULL OR group_id = $1)
              AND ($2::timestamptz IS NULL OR start_time >= $2)
              AND ($3::timestamptz IS NULL OR start_time <= $3)
            ORDER BY {column} {order}, id {order}
            OFFSET $4 LIMIT $5
            "#
        ))
        .bind(filter.group_id)
        .bind(filter.start_from)
        .bind(filter.end_until)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    async fn create(
        &self,
        created_by: &Uuid,
        event: &CreateEventModel,
    ) -> Result<EventEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let event = sqlx::query_as::<_, EventEntity>(
            r#"
            INSERT INTO events
                (id, title, description, group_id, created_by, start_time, end_time, max_attendees, is_public)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, TRUE))
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.group_id)
        .bind(created_by)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(event.max_attendees)
        .bind(event.is_public)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    async fn update(
        &self,
        id: &Uuid,
        event: &UpdateEventModel,
    ) -> Result<Option<EventEntity>, error::SystemError> {
        let event = sqlx::query_as::<_, EventEntity>(
            r#"
            UPDATE events
            SET
                title         = COALESCE($2, title),
                description   = CASE WHEN $3::boolean THEN $4 ELSE description END,
                group_id      = CASE WHEN $5::boolean THEN $6 ELSE group_id END,
                start_time    = COALESCE($7, start_time),
                end_time      = CASE WHEN $8::boolean THEN $9 ELSE end_time END,
                max_attendees = CASE WHEN $10::boolean THEN $11 ELSE max_attendees END,
                is_public     = COALESCE($12, is_public),
                updated_at    = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&event.title)
        .bind(event.description.is_some())
        .bind(event.description.as_ref().and_then(|v| v.as_ref()))
        .bind(event.group_id.is_some())
        .bind(event.group_id.flatten())
        .bind(event.start_time)
        .bind(event.end_time.is_some())
        .bind(event.end_time.flatten())
        .bind(event.max_attendees.is_some())
        .bind(event.max_attendees.flatten())
        .bind(event.is_public)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }
}

#[async_trait::async_trait]
impl AttendeeRepository for EventRepositoryPg {
    async fn find_attendees(
        &self,
        event_id: &Uuid,
    ) -> Result<Vec<EventAttendeeEntity>, error::SystemError> {
        let attendees = sqlx::query_as::<_, EventAttendeeEntity>(
            "SELECT * FROM event_attendees WHERE event_id = $1 ORDER BY joined_at",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(attendees)
    }

    async fn insert_attendee(
        &self,
        event_id: &Uuid,
        user_id: &Uuid,
        status: RsvpStatus,
    ) -> Result<Option<EventAttendeeEntity>, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let attendee = sqlx::query_as::<_, EventAttendeeEntity>(
            r#"
            INSERT INTO event_attendees (id, event_id, user_id, status)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (event_id, user_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(event_id)
        .bind(user_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(attendee)
    }

    async fn update_status(
        &self,
        event_id: &Uuid,
        user_id: &Uuid,
        status: RsvpStatus,
    ) -> Result<Option<EventAttendeeEntity>, error::SystemError> {
        let attendee = sqlx::query_as::<_, EventAttendeeEntity>(
            "UPDATE event_attendees SET status = $3 WHERE event_id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(event_id)
        .bind(user_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(attendee)
    }

    async fn delete_attendee(
        &self,
        event_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let rows =
            sqlx::query("DELETE FROM event_attendees WHERE event_id = $1 AND user_id = $2")
                .bind(event_id)
                .bind(user_id)
                .execute(&self.pool)
                .await?
                .rows_affected();

        Ok(rows > 0)
    }
}
