use axum::extract::{Path, State};
use axum::response::Response;
use uuid::Uuid;

use crate::routes::AppState;
use crate::services::organizer;
use crate::utils::error::AppError;
use crate::utils::response::success;

pub async fn list_transactions(
    State(state): State<AppState>,
    Path(organizer_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let views = organizer::organizer_transactions(state.repo.as_ref(), organizer_id)?;
    Ok(success(views, "Transactions loaded"))
}

pub async fn stats(
    State(state): State<AppState>,
    Path(organizer_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let stats = organizer::dashboard_stats(state.repo.as_ref(), organizer_id)?;
    Ok(success(stats, "Dashboard stats loaded"))
}
