//! Demo dataset for local development, loaded when `SEED_DEMO_DATA` is on.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::event::{Event, EventDraft};
use crate::models::ticket::Ticket;
use crate::models::transaction::{Transaction, TransactionStatus};
use crate::models::user::{User, UserRole};
use crate::services::account::referral_code_for;
use crate::store::Repository;
use crate::utils::error::AppError;

struct DemoEvent {
    name: &'static str,
    description: &'static str,
    category: &'static str,
    location: &'static str,
    starts_in_days: i64,
    hours: i64,
    price: i64,
    seats: u32,
}

const DEMO_EVENTS: &[DemoEvent] = &[
    DemoEvent {
        name: "Jakarta Tech Summit",
        description: "Talks and workshops on cloud, AI and developer tooling",
        category: "Technology",
        location: "Jakarta Convention Center, Jakarta",
        starts_in_days: 14,
        hours: 8,
        price: 250_000,
        seats: 500,
    },
    DemoEvent {
        name: "Jazz Night by the Beach",
        description: "An evening of live jazz with local and international artists",
        category: "Music",
        location: "Kuta Beach, Bali",
        starts_in_days: 21,
        hours: 5,
        price: 350_000,
        seats: 300,
    },
    DemoEvent {
        name: "Startup Founders Breakfast",
        description: "Informal networking for early stage founders and investors",
        category: "Business",
        location: "Dago, Bandung",
        starts_in_days: 7,
        hours: 2,
        price: 0,
        seats: 60,
    },
    DemoEvent {
        name: "Surabaya Street Food Festival",
        description: "Two days of regional dishes from more than fifty vendors",
        category: "Food & Drink",
        location: "Tunjungan, Surabaya",
        starts_in_days: 30,
        hours: 48,
        price: 50_000,
        seats: 2_000,
    },
    DemoEvent {
        name: "Batik Painting Workshop",
        description: "Learn traditional batik techniques from master artisans",
        category: "Arts",
        location: "Malioboro, Yogyakarta",
        starts_in_days: 10,
        hours: 4,
        price: 150_000,
        seats: 25,
    },
];

/// Ids of the seeded accounts, handy for manual testing.
#[derive(Debug, Clone, Copy)]
pub struct SeedSummary {
    pub organizer_id: Uuid,
    pub customer_id: Uuid,
    pub events: usize,
    pub transactions: usize,
}

fn demo_user(name: &str, email: &str, role: UserRole, points: u64, now: DateTime<Utc>) -> User {
    User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        points,
        points_expiry: (points > 0).then(|| now + Duration::days(90)),
        referral_code: Some(referral_code_for(name)),
        profile_image: None,
        created_at: now - Duration::days(120),
    }
}

pub fn seed_demo_data<R>(repo: &R, now: DateTime<Utc>) -> Result<SeedSummary, AppError>
where
    R: Repository + ?Sized,
{
    let organizer = demo_user(
        "MeetNexus Events",
        "organizer@meetnexus.id",
        UserRole::Organizer,
        0,
        now,
    );
    let customer = demo_user(
        "Budi Santoso",
        "budi@example.com",
        UserRole::Customer,
        75_000,
        now,
    );
    let organizer_id = organizer.id;
    let customer_id = customer.id;
    repo.insert_user(organizer.clone())?;
    repo.insert_user(customer)?;

    let mut tickets = Vec::with_capacity(DEMO_EVENTS.len());
    for demo in DEMO_EVENTS {
        let start = now + Duration::days(demo.starts_in_days);
        let price = Decimal::from(demo.price);
        let event = Event::try_new(
            EventDraft {
                organizer_id,
                organizer_name: organizer.name.clone(),
                name: demo.name.to_string(),
                description: demo.description.to_string(),
                category: demo.category.to_string(),
                location: demo.location.to_string(),
                start_date: start,
                end_date: start + Duration::hours(demo.hours),
                price,
                is_free: demo.price == 0,
                available_seats: demo.seats,
                image: None,
            },
            now - Duration::days(5),
        )?;
        let ticket = Ticket::general_admission(event.id, price);
        repo.insert_event(event)?;
        repo.insert_ticket(ticket.clone())?;
        tickets.push(ticket);
    }

    let seeded = [
        (0, 2, TransactionStatus::AwaitingConfirmation, Duration::hours(1)),
        (1, 1, TransactionStatus::Completed, Duration::days(3)),
        (4, 2, TransactionStatus::AwaitingPayment, Duration::minutes(20)),
    ];
    for (index, quantity, status, age) in seeded {
        let ticket = &tickets[index];
        let created_at = now - age;
        repo.insert_transaction(Transaction {
            id: Uuid::new_v4(),
            user_id: customer_id,
            event_id: ticket.event_id,
            ticket_id: ticket.id,
            quantity,
            total_price: ticket.price * Decimal::from(quantity),
            status,
            payment_proof: None,
            points_used: 0,
            voucher_code: None,
            created_at,
            expires_at: created_at + Duration::hours(2),
            updated_at: created_at,
        })?;
    }

    let summary = SeedSummary {
        organizer_id,
        customer_id,
        events: DEMO_EVENTS.len(),
        transactions: seeded.len(),
    };
    tracing::info!(
        organizer_id = %summary.organizer_id,
        customer_id = %summary.customer_id,
        events = summary.events,
        transactions = summary.transactions,
        "Seeded demo data"
    );
    Ok(summary)
}
