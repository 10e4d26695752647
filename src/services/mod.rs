pub mod account;
pub mod checkout;
pub mod debounce;
pub mod event_query;
pub mod organizer;
pub mod payment_summary;
pub mod transaction_lifecycle;
pub mod validation;
