//! Transaction status machine.
//!
//! Every status change goes through [`transition`], which consults the
//! table below. A pair that is not listed is rejected with
//! [`AppError::InvalidTransition`]; nothing is ever allowed implicitly.

use chrono::{DateTime, Utc};

use crate::models::transaction::{Transaction, TransactionAction, TransactionStatus};
use crate::utils::error::AppError;

use TransactionAction as A;
use TransactionStatus as S;

pub const TRANSITIONS: &[(TransactionStatus, TransactionAction, TransactionStatus)] = &[
    (S::AwaitingPayment, A::SubmitPayment, S::AwaitingConfirmation),
    (S::AwaitingPayment, A::Expire, S::Expired),
    (S::AwaitingPayment, A::Cancel, S::Canceled),
    (S::AwaitingConfirmation, A::Accept, S::Completed),
    (S::AwaitingConfirmation, A::Reject, S::Rejected),
    (S::AwaitingConfirmation, A::Cancel, S::Canceled),
];

pub fn transition(
    from: TransactionStatus,
    action: TransactionAction,
) -> Result<TransactionStatus, AppError> {
    TRANSITIONS
        .iter()
        .find(|(state, act, _)| *state == from && *act == action)
        .map(|(_, _, to)| *to)
        .ok_or(AppError::InvalidTransition { from, action })
}

pub fn allowed_actions(from: TransactionStatus) -> Vec<TransactionAction> {
    TRANSITIONS
        .iter()
        .filter(|(state, _, _)| *state == from)
        .map(|(_, action, _)| *action)
        .collect()
}

/// Whether applying `action` gives back points the customer redeemed.
pub const fn refunds_points(action: TransactionAction) -> bool {
    matches!(action, A::Reject | A::Expire | A::Cancel)
}

impl Transaction {
    pub fn apply(&mut self, action: TransactionAction, now: DateTime<Utc>) -> Result<(), AppError> {
        let next = transition(self.status, action)?;
        tracing::info!(
            transaction_id = %self.id,
            from = %self.status,
            to = %next,
            "Transaction transitioned"
        );
        self.status = next;
        self.updated_at = now;
        Ok(())
    }
}
