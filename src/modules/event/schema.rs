use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

use crate::api::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Type, Serialize, Deserialize)]
#[sqlx(type_name = "rsvp_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RsvpStatus {
    #[default]
    Going,
    Maybe,
    NotGoing,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Going => "going",
            RsvpStatus::Maybe => "maybe",
            RsvpStatus::NotGoing => "not_going",
        }
    }
}

impl FromStr for RsvpStatus {
    type Err = error::SystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "going" => Ok(RsvpStatus::Going),
            "maybe" => Ok(RsvpStatus::Maybe),
            "not_going" => Ok(RsvpStatus::NotGoing),
            other => Err(error::SystemError::bad_request(format!(
                "Invalid status '{other}', expected going, maybe or not_going"
            ))),
        }
    }
}

impl fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EventEntity {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub group_id: Option<Uuid>,
    pub created_by: Uuid,
    pub start_time: chrono::DateTime<chrono::Utc>,
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
    pub max_attendees: Option<i32>,
    pub is_public: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EventAttendeeEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub status: RsvpStatus,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}
