use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::models::payment::{PaymentSummaryRequest, SubmitPaymentPayload};
use crate::models::transaction::{CreateTransactionPayload, OrganizerActionPayload};
use crate::routes::AppState;
use crate::services::{checkout, organizer};
use crate::utils::error::AppError;
use crate::utils::response::{created, success};

pub async fn payment_summary(
    State(state): State<AppState>,
    Json(request): Json<PaymentSummaryRequest>,
) -> Result<Response, AppError> {
    let summary = checkout::preview_summary(state.repo.as_ref(), &request)?;
    Ok(success(summary, "Payment summary calculated"))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    Json(payload): Json<CreateTransactionPayload>,
) -> Result<Response, AppError> {
    let transaction = checkout::create_transaction(
        state.repo.as_ref(),
        &payload,
        Utc::now(),
        state.payment_window,
    )?;
    Ok(created(
        transaction,
        "Transaction created, complete your payment before it expires",
    ))
}

pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let transaction = checkout::get_transaction(state.repo.as_ref(), id)?;
    Ok(success(transaction, "Transaction loaded"))
}

pub async fn submit_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitPaymentPayload>,
) -> Result<Response, AppError> {
    let transaction = checkout::submit_payment(state.repo.as_ref(), id, &payload, Utc::now())?;
    Ok(success(transaction, "Payment submitted, awaiting organizer confirmation"))
}

pub async fn accept(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<OrganizerActionPayload>,
) -> Result<Response, AppError> {
    let transaction =
        organizer::accept(state.repo.as_ref(), id, payload.organizer_id, Utc::now())?;
    Ok(success(transaction, "Transaction accepted"))
}

pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<OrganizerActionPayload>,
) -> Result<Response, AppError> {
    let transaction =
        organizer::reject(state.repo.as_ref(), id, payload.organizer_id, Utc::now())?;
    Ok(success(
        transaction,
        "Transaction rejected, points have been refunded",
    ))
}

pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let transaction = checkout::cancel(state.repo.as_ref(), id, Utc::now())?;
    Ok(success(transaction, "Transaction canceled"))
}

#[derive(Serialize)]
struct ExpirySweep {
    expired: usize,
}

pub async fn expire_overdue(State(state): State<AppState>) -> Result<Response, AppError> {
    let expired = checkout::expire_overdue(state.repo.as_ref(), Utc::now())?;
    Ok(success(ExpirySweep { expired }, "Expiry sweep finished"))
}
