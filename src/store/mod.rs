//! Data access. Services depend on the repository traits, never on a
//! concrete store, so the in-memory implementation here can be replaced by
//! a real backend without touching the domain code.

use uuid::Uuid;

use crate::models::event::Event;
use crate::models::ticket::Ticket;
use crate::models::transaction::Transaction;
use crate::models::user::User;
use crate::utils::error::AppError;

pub mod memory;
pub mod seed;

pub use memory::InMemoryStore;

pub trait EventRepository {
    /// All events in insertion order.
    fn list_events(&self) -> Result<Vec<Event>, AppError>;
    fn get_event(&self, id: Uuid) -> Result<Option<Event>, AppError>;
    fn insert_event(&self, event: Event) -> Result<(), AppError>;
    fn tickets_for_event(&self, event_id: Uuid) -> Result<Vec<Ticket>, AppError>;
    fn get_ticket(&self, id: Uuid) -> Result<Option<Ticket>, AppError>;
    fn insert_ticket(&self, ticket: Ticket) -> Result<(), AppError>;
}

pub trait UserRepository {
    fn get_user(&self, id: Uuid) -> Result<Option<User>, AppError>;
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    fn find_user_by_referral_code(&self, code: &str) -> Result<Option<User>, AppError>;
    /// Fails when the email is already registered.
    fn insert_user(&self, user: User) -> Result<(), AppError>;
    /// Subtracts points atomically, returning the new balance.
    fn debit_points(&self, user_id: Uuid, amount: u64) -> Result<u64, AppError>;
    fn credit_points(&self, user_id: Uuid, amount: u64) -> Result<u64, AppError>;
}

pub trait TransactionRepository {
    fn list_transactions(&self) -> Result<Vec<Transaction>, AppError>;
    fn get_transaction(&self, id: Uuid) -> Result<Option<Transaction>, AppError>;
    fn insert_transaction(&self, transaction: Transaction) -> Result<(), AppError>;
    /// Inserts `transaction` only while its event has room for it among
    /// `capacity` seats. The seat count and the insert share one write lock.
    fn insert_within_capacity(
        &self,
        transaction: Transaction,
        capacity: u32,
    ) -> Result<(), AppError>;
    /// Runs `change` against the stored transaction under the store's write
    /// lock. Nothing is written back if `change` fails.
    fn modify_transaction(
        &self,
        id: Uuid,
        change: &mut dyn FnMut(&mut Transaction) -> Result<(), AppError>,
    ) -> Result<Transaction, AppError>;
}

pub trait Repository: EventRepository + UserRepository + TransactionRepository + Send + Sync {}

impl<T> Repository for T where T: EventRepository + UserRepository + TransactionRepository + Send + Sync {}

pub(crate) fn require<T>(found: Option<T>, what: &str, id: Uuid) -> Result<T, AppError> {
    found.ok_or_else(|| AppError::NotFound(format!("{} with id '{}' was not found", what, id)))
}
