use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ticket::Ticket;
use crate::utils::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub organizer_name: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub price: Decimal,
    pub is_free: bool,
    pub available_seats: u32,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Everything about a new event except the generated id and timestamp.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub organizer_id: Uuid,
    pub organizer_name: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub price: Decimal,
    pub is_free: bool,
    pub available_seats: u32,
    pub image: Option<String>,
}

impl Event {
    /// Builds an event, refusing one that ends before it starts.
    pub fn try_new(draft: EventDraft, now: DateTime<Utc>) -> Result<Self, AppError> {
        if draft.end_date < draft.start_date {
            return Err(AppError::invalid_field(
                "end_date",
                "End date must be after start date",
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            organizer_id: draft.organizer_id,
            organizer_name: draft.organizer_name,
            name: draft.name,
            description: draft.description,
            category: draft.category,
            location: draft.location,
            start_date: draft.start_date,
            end_date: draft.end_date,
            price: draft.price,
            is_free: draft.is_free,
            available_seats: draft.available_seats,
            image: draft.image,
            created_at: now,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventPayload {
    pub organizer_id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default)]
    pub price: Decimal,
    pub available_seats: i64,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: Event,
    pub tickets: Vec<Ticket>,
    pub seats_left: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn draft(start: DateTime<Utc>, end: DateTime<Utc>) -> EventDraft {
        EventDraft {
            organizer_id: Uuid::new_v4(),
            organizer_name: "MeetNexus Events".to_string(),
            name: "Bandung Coffee Expo".to_string(),
            description: "Roasters and cafes from all over West Java".to_string(),
            category: "Food & Drink".to_string(),
            location: "Bandung".to_string(),
            start_date: start,
            end_date: end,
            price: Decimal::from(40_000),
            is_free: false,
            available_seats: 200,
            image: None,
        }
    }

    #[test]
    fn test_try_new_stamps_id_and_creation_time() {
        let now = Utc::now();
        let start = now + Duration::days(3);
        let event = Event::try_new(draft(start, start), now).unwrap();

        assert_eq!(event.created_at, now);
        assert_eq!(event.end_date, event.start_date);
        assert_eq!(event.available_seats, 200);
    }

    #[test]
    fn test_try_new_rejects_end_before_start() {
        let now = Utc::now();
        let start = now + Duration::days(3);
        let err = Event::try_new(draft(start, start - Duration::hours(1)), now).unwrap_err();

        match err {
            AppError::ValidationError(fields) => {
                assert_eq!(fields[0].field, "end_date");
                assert_eq!(fields[0].message, "End date must be after start date");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
