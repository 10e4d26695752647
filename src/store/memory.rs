use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::models::event::Event;
use crate::models::ticket::Ticket;
use crate::models::transaction::Transaction;
use crate::models::user::User;
use crate::store::{require, EventRepository, TransactionRepository, UserRepository};
use crate::utils::error::AppError;

#[derive(Default)]
struct Tables {
    events: Vec<Event>,
    tickets: Vec<Ticket>,
    users: HashMap<Uuid, User>,
    transactions: HashMap<Uuid, Transaction>,
}

/// Process-local store behind a single lock. The lock is never held across
/// an await point.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::InternalServerError("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::InternalServerError("store lock poisoned".to_string()))
    }
}

impl EventRepository for InMemoryStore {
    fn list_events(&self) -> Result<Vec<Event>, AppError> {
        Ok(self.read()?.events.clone())
    }

    fn get_event(&self, id: Uuid) -> Result<Option<Event>, AppError> {
        Ok(self.read()?.events.iter().find(|e| e.id == id).cloned())
    }

    fn insert_event(&self, event: Event) -> Result<(), AppError> {
        self.write()?.events.push(event);
        Ok(())
    }

    fn tickets_for_event(&self, event_id: Uuid) -> Result<Vec<Ticket>, AppError> {
        Ok(self
            .read()?
            .tickets
            .iter()
            .filter(|t| t.event_id == event_id)
            .cloned()
            .collect())
    }

    fn get_ticket(&self, id: Uuid) -> Result<Option<Ticket>, AppError> {
        Ok(self.read()?.tickets.iter().find(|t| t.id == id).cloned())
    }

    fn insert_ticket(&self, ticket: Ticket) -> Result<(), AppError> {
        self.write()?.tickets.push(ticket);
        Ok(())
    }
}

impl UserRepository for InMemoryStore {
    fn get_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let email = email.trim();
        Ok(self
            .read()?
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    fn find_user_by_referral_code(&self, code: &str) -> Result<Option<User>, AppError> {
        let code = code.trim();
        Ok(self
            .read()?
            .users
            .values()
            .find(|u| u.referral_code.as_deref() == Some(code))
            .cloned())
    }

    fn insert_user(&self, user: User) -> Result<(), AppError> {
        let mut tables = self.write()?;
        if tables
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(AppError::invalid_field(
                "email",
                "An account with this email already exists",
            ));
        }
        tables.users.insert(user.id, user);
        Ok(())
    }

    fn debit_points(&self, user_id: Uuid, amount: u64) -> Result<u64, AppError> {
        let mut tables = self.write()?;
        let user = require(tables.users.get_mut(&user_id), "User", user_id)?;
        if user.points < amount {
            return Err(AppError::InsufficientPoints {
                requested: amount,
                available: user.points,
            });
        }
        user.points -= amount;
        Ok(user.points)
    }

    fn credit_points(&self, user_id: Uuid, amount: u64) -> Result<u64, AppError> {
        let mut tables = self.write()?;
        let user = require(tables.users.get_mut(&user_id), "User", user_id)?;
        user.points = user.points.saturating_add(amount);
        Ok(user.points)
    }
}

impl TransactionRepository for InMemoryStore {
    fn list_transactions(&self) -> Result<Vec<Transaction>, AppError> {
        Ok(self.read()?.transactions.values().cloned().collect())
    }

    fn get_transaction(&self, id: Uuid) -> Result<Option<Transaction>, AppError> {
        Ok(self.read()?.transactions.get(&id).cloned())
    }

    fn insert_transaction(&self, transaction: Transaction) -> Result<(), AppError> {
        self.write()?
            .transactions
            .insert(transaction.id, transaction);
        Ok(())
    }

    fn insert_within_capacity(
        &self,
        transaction: Transaction,
        capacity: u32,
    ) -> Result<(), AppError> {
        let mut tables = self.write()?;
        let held: u64 = tables
            .transactions
            .values()
            .filter(|tx| tx.event_id == transaction.event_id && tx.status.holds_seats())
            .map(|tx| u64::from(tx.quantity))
            .sum();
        let left = u64::from(capacity).saturating_sub(held);
        if u64::from(transaction.quantity) > left {
            return Err(AppError::invalid_field(
                "quantity",
                format!("Only {} seats left", left),
            ));
        }
        tables.transactions.insert(transaction.id, transaction);
        Ok(())
    }

    fn modify_transaction(
        &self,
        id: Uuid,
        change: &mut dyn FnMut(&mut Transaction) -> Result<(), AppError>,
    ) -> Result<Transaction, AppError> {
        let mut tables = self.write()?;
        let stored = require(tables.transactions.get_mut(&id), "Transaction", id)?;
        let mut draft = stored.clone();
        change(&mut draft)?;
        *stored = draft.clone();
        Ok(draft)
    }
}
