use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use chrono::Utc;
use uuid::Uuid;

use crate::models::event::CreateEventPayload;
use crate::routes::AppState;
use crate::services::event_query::{self, EventFilter};
use crate::services::organizer;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};

pub async fn list_events(
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> Result<Response, AppError> {
    let events = event_query::search_events(state.repo.as_ref(), &filter)?;
    let message = match events.len() {
        1 => "1 event found".to_string(),
        n => format!("{} events found", n),
    };
    Ok(success(events, message))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let detail = event_query::event_detail(state.repo.as_ref(), id)?;
    Ok(success(detail, "Event loaded"))
}

pub async fn create_event(
    State(state): State<AppState>,
    Json(form): Json<CreateEventPayload>,
) -> Result<Response, AppError> {
    let event = organizer::create_event(state.repo.as_ref(), &form, Utc::now())?;
    Ok(created(event, "Event created"))
}
