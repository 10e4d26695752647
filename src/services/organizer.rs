//! Organizer side: publishing events, confirming payments and the
//! dashboard figures.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::dashboard::DashboardStats;
use crate::models::event::{CreateEventPayload, Event, EventDraft};
use crate::models::ticket::Ticket;
use crate::models::transaction::{Transaction, TransactionAction, TransactionStatus, TransactionView};
use crate::models::user::User;
use crate::services::checkout::apply_action;
use crate::services::event_query::{ALL, CATEGORIES};
use crate::services::validation::validate_create_event;
use crate::store::{require, Repository};
use crate::utils::error::AppError;

fn require_organizer<R>(repo: &R, organizer_id: Uuid) -> Result<User, AppError>
where
    R: Repository + ?Sized,
{
    let user = require(repo.get_user(organizer_id)?, "User", organizer_id)?;
    if !user.is_organizer() {
        return Err(AppError::Forbidden(
            "Only organizers can manage events".to_string(),
        ));
    }
    Ok(user)
}

fn organizer_event_ids<R>(repo: &R, organizer_id: Uuid) -> Result<HashSet<Uuid>, AppError>
where
    R: Repository + ?Sized,
{
    Ok(repo
        .list_events()?
        .into_iter()
        .filter(|e| e.organizer_id == organizer_id)
        .map(|e| e.id)
        .collect())
}

pub fn create_event<R>(repo: &R, form: &CreateEventPayload, now: DateTime<Utc>) -> Result<Event, AppError>
where
    R: Repository + ?Sized,
{
    let seats = validate_create_event(form)?;
    if !CATEGORIES.iter().any(|c| *c != ALL && *c == form.category) {
        return Err(AppError::invalid_field(
            "category",
            "Please select a category",
        ));
    }
    let organizer = require_organizer(repo, form.organizer_id)?;

    // Validation guarantees both dates are present.
    let (Some(start_date), Some(end_date)) = (form.start_date, form.end_date) else {
        return Err(AppError::invalid_field("start_date", "Please select a start date"));
    };
    let price = if form.is_free { Decimal::ZERO } else { form.price };

    let event = Event::try_new(
        EventDraft {
            organizer_id: organizer.id,
            organizer_name: organizer.name,
            name: form.name.trim().to_string(),
            description: form.description.trim().to_string(),
            category: form.category.clone(),
            location: form.location.trim().to_string(),
            start_date,
            end_date,
            price,
            is_free: form.is_free,
            available_seats: seats,
            image: form.image.clone().filter(|i| !i.trim().is_empty()),
        },
        now,
    )?;
    repo.insert_event(event.clone())?;
    repo.insert_ticket(Ticket::general_admission(event.id, price))?;

    tracing::info!(
        event_id = %event.id,
        organizer_id = %event.organizer_id,
        category = %event.category,
        seats = event.available_seats,
        "Event created"
    );
    Ok(event)
}

/// Accept or reject a payment on one of the organizer's own events.
pub fn review_transaction<R>(
    repo: &R,
    id: Uuid,
    organizer_id: Uuid,
    action: TransactionAction,
    now: DateTime<Utc>,
) -> Result<Transaction, AppError>
where
    R: Repository + ?Sized,
{
    if !action.is_organizer_action() {
        return Err(AppError::Forbidden(format!(
            "Organizers cannot {} a transaction",
            action
        )));
    }
    require_organizer(repo, organizer_id)?;
    let transaction = require(repo.get_transaction(id)?, "Transaction", id)?;
    let event = require(repo.get_event(transaction.event_id)?, "Event", transaction.event_id)?;
    if event.organizer_id != organizer_id {
        return Err(AppError::Forbidden(
            "This transaction belongs to another organizer's event".to_string(),
        ));
    }

    apply_action(repo, id, action, now)
}

pub fn accept<R>(repo: &R, id: Uuid, organizer_id: Uuid, now: DateTime<Utc>) -> Result<Transaction, AppError>
where
    R: Repository + ?Sized,
{
    review_transaction(repo, id, organizer_id, TransactionAction::Accept, now)
}

pub fn reject<R>(repo: &R, id: Uuid, organizer_id: Uuid, now: DateTime<Utc>) -> Result<Transaction, AppError>
where
    R: Repository + ?Sized,
{
    review_transaction(repo, id, organizer_id, TransactionAction::Reject, now)
}

/// Transactions on the organizer's events, newest first.
pub fn organizer_transactions<R>(repo: &R, organizer_id: Uuid) -> Result<Vec<TransactionView>, AppError>
where
    R: Repository + ?Sized,
{
    require_organizer(repo, organizer_id)?;
    let events: Vec<Event> = repo
        .list_events()?
        .into_iter()
        .filter(|e| e.organizer_id == organizer_id)
        .collect();

    let mut views = Vec::new();
    for transaction in repo.list_transactions()? {
        let Some(event) = events.iter().find(|e| e.id == transaction.event_id) else {
            continue;
        };
        let user_name = repo
            .get_user(transaction.user_id)?
            .map(|u| u.name)
            .unwrap_or_else(|| "Unknown customer".to_string());
        views.push(TransactionView {
            event_name: event.name.clone(),
            user_name,
            transaction,
        });
    }

    views.sort_by(|a, b| b.transaction.created_at.cmp(&a.transaction.created_at));
    Ok(views)
}

pub fn dashboard_stats<R>(repo: &R, organizer_id: Uuid) -> Result<DashboardStats, AppError>
where
    R: Repository + ?Sized,
{
    require_organizer(repo, organizer_id)?;
    let event_ids = organizer_event_ids(repo, organizer_id)?;
    let transactions: Vec<Transaction> = repo
        .list_transactions()?
        .into_iter()
        .filter(|tx| event_ids.contains(&tx.event_id))
        .collect();

    let completed = transactions
        .iter()
        .filter(|tx| tx.status == TransactionStatus::Completed);

    Ok(DashboardStats {
        total_events: event_ids.len(),
        total_attendees: completed.clone().map(|tx| u64::from(tx.quantity)).sum(),
        total_revenue: completed.map(|tx| tx.total_price).sum(),
        pending_transactions: transactions
            .iter()
            .filter(|tx| tx.status == TransactionStatus::AwaitingConfirmation)
            .count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::payment::{PaymentContact, PaymentProofUpload, SubmitPaymentPayload};
    use crate::models::transaction::CreateTransactionPayload;
    use crate::models::user::UserRole;
    use crate::services::checkout::{create_transaction, submit_payment};
    use crate::store::{InMemoryStore, UserRepository};
    use chrono::Duration;

    struct World {
        store: InMemoryStore,
        organizer: Uuid,
        customer: Uuid,
        now: DateTime<Utc>,
    }

    fn user(role: UserRole, email: &str, points: u64, now: DateTime<Utc>) -> User {
        User {
            id: Uuid::new_v4(),
            name: format!("{} account", role),
            email: email.to_string(),
            role,
            points,
            points_expiry: None,
            referral_code: None,
            profile_image: None,
            created_at: now,
        }
    }

    fn world() -> World {
        let now = Utc::now();
        let store = InMemoryStore::new();
        let organizer = user(UserRole::Organizer, "org@example.com", 0, now);
        let customer = user(UserRole::Customer, "cust@example.com", 40_000, now);
        let ids = (organizer.id, customer.id);
        store.insert_user(organizer).unwrap();
        store.insert_user(customer).unwrap();
        World {
            store,
            organizer: ids.0,
            customer: ids.1,
            now,
        }
    }

    fn event_form(w: &World, organizer_id: Uuid) -> CreateEventPayload {
        CreateEventPayload {
            organizer_id,
            name: "Bandung Coffee Expo".to_string(),
            description: "Tasting sessions with local roasters and baristas".to_string(),
            category: "Food & Drink".to_string(),
            location: "Bandung".to_string(),
            start_date: Some(w.now + Duration::days(5)),
            end_date: Some(w.now + Duration::days(6)),
            is_free: false,
            price: Decimal::from(100_000),
            available_seats: 50,
            image: None,
        }
    }

    fn paid_transaction(w: &World, event: &Event, use_points: bool) -> Transaction {
        let tx = create_transaction(
            &w.store,
            &CreateTransactionPayload {
                user_id: w.customer,
                event_id: event.id,
                ticket_id: None,
                quantity: 1,
                use_points,
                voucher_code: None,
            },
            w.now,
            Duration::hours(2),
        )
        .unwrap();
        submit_payment(
            &w.store,
            tx.id,
            &SubmitPaymentPayload {
                contact: PaymentContact {
                    name: "Customer".to_string(),
                    email: "cust@example.com".to_string(),
                    phone: "081298765432".to_string(),
                },
                proof: Some(PaymentProofUpload {
                    file_name: "bca.jpg".to_string(),
                    content_type: "image/jpeg".to_string(),
                    size_bytes: 120_000,
                }),
            },
            w.now,
        )
        .unwrap()
    }

    fn points_of(w: &World) -> u64 {
        w.store.get_user(w.customer).unwrap().unwrap().points
    }

    #[test]
    fn test_customer_cannot_create_event() {
        let w = world();
        let err = create_event(&w.store, &event_form(&w, w.customer), w.now).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_create_event_rejects_unknown_category() {
        let w = world();
        let mut form = event_form(&w, w.organizer);
        form.category = ALL.to_string();
        assert!(matches!(
            create_event(&w.store, &form, w.now),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_create_event_rejects_price_beyond_points_range() {
        let w = world();
        let mut form = event_form(&w, w.organizer);
        form.price = Decimal::MAX;
        assert!(matches!(
            create_event(&w.store, &form, w.now),
            Err(AppError::ValidationError(_))
        ));
        assert!(organizer_event_ids(&w.store, w.organizer).unwrap().is_empty());
    }

    #[test]
    fn test_accept_completes_and_counts_in_stats() {
        let w = world();
        let event = create_event(&w.store, &event_form(&w, w.organizer), w.now).unwrap();
        let tx = paid_transaction(&w, &event, true);

        let stats = dashboard_stats(&w.store, w.organizer).unwrap();
        assert_eq!(stats.pending_transactions, 1);
        assert_eq!(stats.total_attendees, 0);

        let done = accept(&w.store, tx.id, w.organizer, w.now).unwrap();
        assert_eq!(done.status, TransactionStatus::Completed);
        assert_eq!(points_of(&w), 0);

        let stats = dashboard_stats(&w.store, w.organizer).unwrap();
        assert_eq!(
            stats,
            DashboardStats {
                total_events: 1,
                total_attendees: 1,
                total_revenue: Decimal::from(60_000),
                pending_transactions: 0,
            }
        );
    }

    #[test]
    fn test_reject_refunds_points() {
        let w = world();
        let event = create_event(&w.store, &event_form(&w, w.organizer), w.now).unwrap();
        let tx = paid_transaction(&w, &event, true);
        assert_eq!(points_of(&w), 0);

        let rejected = reject(&w.store, tx.id, w.organizer, w.now).unwrap();
        assert_eq!(rejected.status, TransactionStatus::Rejected);
        assert_eq!(points_of(&w), 40_000);

        let err = accept(&w.store, tx.id, w.organizer, w.now).unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidTransition {
                from: TransactionStatus::Rejected,
                action: TransactionAction::Accept
            }
        ));
    }

    #[test]
    fn test_accept_requires_awaiting_confirmation() {
        let w = world();
        let event = create_event(&w.store, &event_form(&w, w.organizer), w.now).unwrap();
        let unpaid = create_transaction(
            &w.store,
            &CreateTransactionPayload {
                user_id: w.customer,
                event_id: event.id,
                ticket_id: None,
                quantity: 1,
                use_points: false,
                voucher_code: None,
            },
            w.now,
            Duration::hours(2),
        )
        .unwrap();

        assert!(matches!(
            accept(&w.store, unpaid.id, w.organizer, w.now),
            Err(AppError::InvalidTransition {
                from: TransactionStatus::AwaitingPayment,
                ..
            })
        ));
    }

    #[test]
    fn test_other_organizer_is_forbidden() {
        let w = world();
        let event = create_event(&w.store, &event_form(&w, w.organizer), w.now).unwrap();
        let tx = paid_transaction(&w, &event, false);

        let rival = user(UserRole::Organizer, "rival@example.com", 0, w.now);
        let rival_id = rival.id;
        w.store.insert_user(rival).unwrap();

        assert!(matches!(
            accept(&w.store, tx.id, rival_id, w.now),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            review_transaction(&w.store, tx.id, w.organizer, TransactionAction::Cancel, w.now),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_transactions_listed_newest_first() {
        let w = world();
        let event = create_event(&w.store, &event_form(&w, w.organizer), w.now).unwrap();
        let first = paid_transaction(&w, &event, false);
        let later = World {
            now: w.now + Duration::minutes(5),
            ..w
        };
        let second = paid_transaction(&later, &event, false);

        let views = organizer_transactions(&later.store, later.organizer).unwrap();
        let ids: Vec<Uuid> = views.iter().map(|v| v.transaction.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert_eq!(views[0].event_name, "Bandung Coffee Expo");
        assert_eq!(views[0].user_name, "customer account");
    }
}
