use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_events: usize,
    pub total_attendees: u64,
    pub total_revenue: Decimal,
    pub pending_transactions: usize,
}
