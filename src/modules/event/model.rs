use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::utils::{double_option, SortOrder};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEventModel {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters long"))]
    pub title: String,
    pub description: Option<String>,
    pub group_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    #[validate(range(min = 1, message = "max_attendees must be positive"))]
    pub max_attendees: Option<i32>,
    pub is_public: Option<bool>,
}

/// Absent fields are kept; an explicit `null` clears a nullable one.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEventModel {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters long"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub group_id: Option<Option<Uuid>>,
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_time: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub max_attendees: Option<Option<i32>>,
    pub is_public: Option<bool>,
}

impl UpdateEventModel {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.group_id.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.max_attendees.is_none()
            && self.is_public.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSortField {
    #[default]
    StartTime,
    CreatedAt,
}

impl EventSortField {
    pub fn column(self) -> &'static str {
        match self {
            EventSortField::StartTime => "start_time",
            EventSortField::CreatedAt => "created_at",
        }
    }
}

/// Query string of `GET /events`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct EventListQuery {
    pub group_id: Option<Uuid>,
    #[serde(default)]
    pub sort_by: EventSortField,
    #[serde(default)]
    pub sort_order: SortOrder,
}

/// Query string of `GET /events/search`; both bounds apply to `start_time`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct EventSearchQuery {
    pub group_id: Option<Uuid>,
    pub start_from: Option<DateTime<Utc>>,
    pub end_until: Option<DateTime<Utc>>,
}

/// What the repository filters and orders by; built from either query.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub group_id: Option<Uuid>,
    pub start_from: Option<DateTime<Utc>>,
    pub end_until: Option<DateTime<Utc>>,
    pub sort_by: EventSortField,
    pub sort_order: SortOrder,
}

impl From<&EventListQuery> for EventFilter {
    fn from(query: &EventListQuery) -> Self {
        EventFilter {
            group_id: query.group_id,
            sort_by: query.sort_by,
            sort_order: query.sort_order,
            ..Default::default()
        }
    }
}

impl From<&EventSearchQuery> for EventFilter {
    fn from(query: &EventSearchQuery) -> Self {
        EventFilter {
            group_id: query.group_id,
            start_from: query.start_from,
            end_until: query.end_until,
            sort_by: EventSortField::StartTime,
            sort_order: SortOrder::Desc,
        }
    }
}

/// `user_id` defaults to the caller.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RsvpModel {
    pub user_id: Option<Uuid>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRsvpModel {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttendeePath {
    pub event_id: Uuid,
    pub user_id: Uuid,
}
