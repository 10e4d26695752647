pub mod dashboard;
pub mod event;
pub mod payment;
pub mod ticket;
pub mod transaction;
pub mod user;
