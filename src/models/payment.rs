use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata of an uploaded payment receipt. The file itself is not stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentProofRef {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
}

/// The single file input on the payment form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PaymentProof {
    #[default]
    Empty,
    Selected(PaymentProofRef),
}

impl PaymentProof {
    pub fn into_selected(self) -> Option<PaymentProofRef> {
        match self {
            PaymentProof::Empty => None,
            PaymentProof::Selected(proof) => Some(proof),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentProofUpload {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitPaymentPayload {
    pub contact: PaymentContact,
    pub proof: Option<PaymentProofUpload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentSummaryRequest {
    pub event_id: uuid::Uuid,
    pub ticket_id: Option<uuid::Uuid>,
    pub user_id: uuid::Uuid,
    pub quantity: u32,
    #[serde(default)]
    pub use_points: bool,
    pub voucher_code: Option<String>,
}
