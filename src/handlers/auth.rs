use axum::extract::State;
use axum::response::Response;
use axum::Json;
use chrono::Utc;

use crate::models::user::{LoginPayload, RegisterPayload};
use crate::routes::AppState;
use crate::services::account;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};

pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegisterPayload>,
) -> Result<Response, AppError> {
    let user = account::register(state.repo.as_ref(), &form, Utc::now())?;
    let message = format!("Welcome to MeetNexus! You've registered as a {}.", user.role);
    Ok(created(user, message))
}

pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginPayload>,
) -> Result<Response, AppError> {
    let user = account::login(state.repo.as_ref(), &form)?;
    Ok(success(user, "Login successful"))
}
