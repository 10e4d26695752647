use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, Config, SecurityHeadersLayer};
use crate::handlers::{auth, catalog, events, health_check, organizers, transactions};
use crate::store::Repository;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn Repository>,
    pub payment_window: chrono::Duration,
}

impl AppState {
    pub fn new(repo: Arc<dyn Repository>, config: &Config) -> Self {
        Self {
            repo,
            payment_window: config.payment_window(),
        }
    }
}

pub fn create_routes(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/catalog", get(catalog))
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/events/:id", get(events::get_event))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/payments/summary", post(transactions::payment_summary))
        .route("/transactions", post(transactions::create_transaction))
        .route("/transactions/expire", post(transactions::expire_overdue))
        .route("/transactions/:id", get(transactions::get_transaction))
        .route(
            "/transactions/:id/payment-proof",
            post(transactions::submit_payment),
        )
        .route("/transactions/:id/accept", post(transactions::accept))
        .route("/transactions/:id/reject", post(transactions::reject))
        .route("/transactions/:id/cancel", post(transactions::cancel))
        .route(
            "/organizers/:id/transactions",
            get(organizers::list_transactions),
        )
        .route("/organizers/:id/stats", get(organizers::stats))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(SecurityHeadersLayer::new(config.production))
        .layer(create_cors_layer(&config.cors_allowed_origins))
}
