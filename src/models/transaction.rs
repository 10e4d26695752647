use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::payment::PaymentProofRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    AwaitingPayment,
    AwaitingConfirmation,
    Completed,
    Rejected,
    Expired,
    Canceled,
}

impl TransactionStatus {
    pub const ALL: [TransactionStatus; 6] = [
        TransactionStatus::AwaitingPayment,
        TransactionStatus::AwaitingConfirmation,
        TransactionStatus::Completed,
        TransactionStatus::Rejected,
        TransactionStatus::Expired,
        TransactionStatus::Canceled,
    ];

    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            TransactionStatus::Completed
                | TransactionStatus::Rejected
                | TransactionStatus::Expired
                | TransactionStatus::Canceled
        )
    }

    /// Whether the transaction still holds seats on its event.
    pub const fn holds_seats(self) -> bool {
        matches!(
            self,
            TransactionStatus::AwaitingPayment
                | TransactionStatus::AwaitingConfirmation
                | TransactionStatus::Completed
        )
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::AwaitingPayment => write!(f, "awaiting_payment"),
            TransactionStatus::AwaitingConfirmation => write!(f, "awaiting_confirmation"),
            TransactionStatus::Completed => write!(f, "completed"),
            TransactionStatus::Rejected => write!(f, "rejected"),
            TransactionStatus::Expired => write!(f, "expired"),
            TransactionStatus::Canceled => write!(f, "canceled"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionAction {
    SubmitPayment,
    Accept,
    Reject,
    Expire,
    Cancel,
}

impl TransactionAction {
    pub const ALL: [TransactionAction; 5] = [
        TransactionAction::SubmitPayment,
        TransactionAction::Accept,
        TransactionAction::Reject,
        TransactionAction::Expire,
        TransactionAction::Cancel,
    ];

    /// Actions an organizer triggers from the dashboard.
    pub const fn is_organizer_action(self) -> bool {
        matches!(self, TransactionAction::Accept | TransactionAction::Reject)
    }
}

impl fmt::Display for TransactionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionAction::SubmitPayment => write!(f, "submit payment for"),
            TransactionAction::Accept => write!(f, "accept"),
            TransactionAction::Reject => write!(f, "reject"),
            TransactionAction::Expire => write!(f, "expire"),
            TransactionAction::Cancel => write!(f, "cancel"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub ticket_id: Uuid,
    pub quantity: u32,
    pub total_price: Decimal,
    pub status: TransactionStatus,
    pub payment_proof: Option<PaymentProofRef>,
    pub points_used: u64,
    pub voucher_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == TransactionStatus::AwaitingPayment && self.expires_at <= now
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransactionPayload {
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub ticket_id: Option<Uuid>,
    pub quantity: u32,
    #[serde(default)]
    pub use_points: bool,
    pub voucher_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrganizerActionPayload {
    pub organizer_id: Uuid,
}

/// Dashboard row: a transaction joined with the names the table shows.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionView {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub user_name: String,
    pub event_name: String,
}
