//! Customer side of a purchase: price preview, reservation, payment proof,
//! cancellation and the expiry sweep.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::event::Event;
use crate::models::payment::{
    PaymentProof, PaymentProofRef, PaymentSummaryRequest, SubmitPaymentPayload,
};
use crate::models::ticket::Ticket;
use crate::models::transaction::{
    CreateTransactionPayload, Transaction, TransactionAction, TransactionStatus,
};
use crate::services::payment_summary::PaymentSummary;
use crate::services::transaction_lifecycle::refunds_points;
use crate::services::validation::{validate_contact, validate_payment_proof};
use crate::store::{require, Repository};
use crate::utils::error::AppError;

/// How long a customer has to upload a payment proof.
pub const DEFAULT_PAYMENT_WINDOW_MINUTES: i64 = 120;

pub fn resolve_ticket<R>(repo: &R, event: &Event, ticket_id: Option<Uuid>) -> Result<Ticket, AppError>
where
    R: Repository + ?Sized,
{
    match ticket_id {
        Some(id) => {
            let ticket = require(repo.get_ticket(id)?, "Ticket", id)?;
            if ticket.event_id != event.id {
                return Err(AppError::invalid_field(
                    "ticket_id",
                    "Ticket does not belong to this event",
                ));
            }
            Ok(ticket)
        }
        None => repo
            .tickets_for_event(event.id)?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("No tickets on sale for event '{}'", event.id))),
    }
}

/// Capacity minus the tickets held by live or completed transactions.
pub fn seats_left<R>(repo: &R, event: &Event) -> Result<u32, AppError>
where
    R: Repository + ?Sized,
{
    let held: u64 = repo
        .list_transactions()?
        .iter()
        .filter(|tx| tx.event_id == event.id && tx.status.holds_seats())
        .map(|tx| u64::from(tx.quantity))
        .sum();
    Ok(u64::from(event.available_seats).saturating_sub(held) as u32)
}

pub fn get_transaction<R>(repo: &R, id: Uuid) -> Result<Transaction, AppError>
where
    R: Repository + ?Sized,
{
    require(repo.get_transaction(id)?, "Transaction", id)
}

fn check_quantity(quantity: u32) -> Result<(), AppError> {
    if quantity == 0 {
        return Err(AppError::invalid_field(
            "quantity",
            "Quantity must be at least 1",
        ));
    }
    Ok(())
}

pub fn preview_summary<R>(repo: &R, request: &PaymentSummaryRequest) -> Result<PaymentSummary, AppError>
where
    R: Repository + ?Sized,
{
    check_quantity(request.quantity)?;
    let user = require(repo.get_user(request.user_id)?, "User", request.user_id)?;
    let event = require(repo.get_event(request.event_id)?, "Event", request.event_id)?;
    let ticket = resolve_ticket(repo, &event, request.ticket_id)?;

    PaymentSummary::compute(
        PaymentSummary::base_total(ticket.price, request.quantity)?,
        request.use_points,
        user.points,
        request.voucher_code.as_deref(),
    )
}

/// Reserves seats and redeems points. The transaction starts out awaiting
/// payment and expires `payment_window` after creation.
pub fn create_transaction<R>(
    repo: &R,
    payload: &CreateTransactionPayload,
    now: DateTime<Utc>,
    payment_window: Duration,
) -> Result<Transaction, AppError>
where
    R: Repository + ?Sized,
{
    check_quantity(payload.quantity)?;
    let user = require(repo.get_user(payload.user_id)?, "User", payload.user_id)?;
    let event = require(repo.get_event(payload.event_id)?, "Event", payload.event_id)?;
    let ticket = resolve_ticket(repo, &event, payload.ticket_id)?;

    if event.start_date <= now {
        return Err(AppError::invalid_field(
            "event_id",
            "This event has already started",
        ));
    }

    let left = seats_left(repo, &event)?;
    if payload.quantity > left {
        return Err(AppError::invalid_field(
            "quantity",
            format!("Only {} seats left", left),
        ));
    }

    let summary = PaymentSummary::compute(
        PaymentSummary::base_total(ticket.price, payload.quantity)?,
        payload.use_points,
        user.points,
        payload.voucher_code.as_deref(),
    )?;

    if summary.points_to_use > 0 {
        repo.debit_points(user.id, summary.points_to_use)?;
    }

    let transaction = Transaction {
        id: Uuid::new_v4(),
        user_id: user.id,
        event_id: event.id,
        ticket_id: ticket.id,
        quantity: payload.quantity,
        total_price: summary.final_price,
        status: TransactionStatus::AwaitingPayment,
        payment_proof: None,
        points_used: summary.points_to_use,
        voucher_code: None,
        created_at: now,
        expires_at: now + payment_window,
        updated_at: now,
    };

    // Seats may have gone to a concurrent purchase since the check above.
    if let Err(e) = repo.insert_within_capacity(transaction.clone(), event.available_seats) {
        refund_points(repo, &transaction)?;
        return Err(e);
    }

    tracing::info!(
        transaction_id = %transaction.id,
        user_id = %user.id,
        event_id = %event.id,
        quantity = transaction.quantity,
        points_used = transaction.points_used,
        total_price = %transaction.total_price,
        "Transaction created"
    );
    Ok(transaction)
}

fn refund_points<R>(repo: &R, transaction: &Transaction) -> Result<(), AppError>
where
    R: Repository + ?Sized,
{
    if transaction.points_used == 0 {
        return Ok(());
    }
    let balance = repo.credit_points(transaction.user_id, transaction.points_used)?;
    tracing::info!(
        transaction_id = %transaction.id,
        user_id = %transaction.user_id,
        refunded = transaction.points_used,
        balance,
        "Points refunded"
    );
    Ok(())
}

/// Applies `action` atomically and gives back redeemed points when the
/// transaction ends without a sale.
pub fn apply_action<R>(
    repo: &R,
    id: Uuid,
    action: TransactionAction,
    now: DateTime<Utc>,
) -> Result<Transaction, AppError>
where
    R: Repository + ?Sized,
{
    let updated = repo.modify_transaction(id, &mut |tx: &mut Transaction| tx.apply(action, now))?;
    if refunds_points(action) {
        refund_points(repo, &updated)?;
    }
    Ok(updated)
}

/// Attaches the payment proof and hands the transaction to the organizer.
/// A transaction past its deadline is expired instead and the submission
/// fails.
pub fn submit_payment<R>(
    repo: &R,
    id: Uuid,
    payload: &SubmitPaymentPayload,
    now: DateTime<Utc>,
) -> Result<Transaction, AppError>
where
    R: Repository + ?Sized,
{
    validate_contact(&payload.contact)?;

    let proof = match &payload.proof {
        Some(upload) => {
            validate_payment_proof(upload)?;
            PaymentProof::Selected(PaymentProofRef {
                file_name: upload.file_name.trim().to_string(),
                content_type: upload.content_type.trim().to_string(),
                size_bytes: upload.size_bytes,
                uploaded_at: now,
            })
        }
        None => PaymentProof::Empty,
    };
    let proof = proof.into_selected().ok_or_else(|| {
        AppError::invalid_field("payment_proof", "Please upload your payment proof")
    })?;

    let mut expired = false;
    let updated = repo.modify_transaction(id, &mut |tx: &mut Transaction| {
        if tx.is_overdue(now) {
            expired = true;
            return tx.apply(TransactionAction::Expire, now);
        }
        tx.apply(TransactionAction::SubmitPayment, now)?;
        tx.payment_proof = Some(proof.clone());
        Ok(())
    })?;

    if expired {
        refund_points(repo, &updated)?;
        return Err(AppError::InvalidTransition {
            from: updated.status,
            action: TransactionAction::SubmitPayment,
        });
    }

    tracing::info!(
        transaction_id = %updated.id,
        contact_email = %payload.contact.email,
        "Payment proof submitted"
    );
    Ok(updated)
}

pub fn cancel<R>(repo: &R, id: Uuid, now: DateTime<Utc>) -> Result<Transaction, AppError>
where
    R: Repository + ?Sized,
{
    apply_action(repo, id, TransactionAction::Cancel, now)
}

/// Expires every transaction still awaiting payment past its deadline.
/// Callers poll this; nothing runs it on a timer.
pub fn expire_overdue<R>(repo: &R, now: DateTime<Utc>) -> Result<usize, AppError>
where
    R: Repository + ?Sized,
{
    let overdue: Vec<Uuid> = repo
        .list_transactions()?
        .into_iter()
        .filter(|tx| tx.is_overdue(now))
        .map(|tx| tx.id)
        .collect();

    let mut expired = 0;
    for id in overdue {
        match apply_action(repo, id, TransactionAction::Expire, now) {
            Ok(_) => expired += 1,
            // Paid or canceled between the scan and the update.
            Err(AppError::InvalidTransition { .. }) => {}
            Err(e) => return Err(e),
        }
    }

    if expired > 0 {
        tracing::info!(expired, "Expired overdue transactions");
    }
    Ok(expired)
}
