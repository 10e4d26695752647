use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_TICKET_NAME: &str = "General Admission";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
}

impl Ticket {
    pub fn general_admission(event_id: Uuid, price: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            name: DEFAULT_TICKET_NAME.to_string(),
            price,
            description: None,
        }
    }
}
