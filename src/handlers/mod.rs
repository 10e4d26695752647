use axum::response::Response;
use serde::Serialize;

use crate::services::event_query::{CATEGORIES, LOCATIONS};
use crate::utils::response::success;

pub mod auth;
pub mod events;
pub mod organizers;
pub mod transactions;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "meetnexus-api",
    };

    success(payload, "Health check successful")
}

#[derive(Serialize)]
struct CatalogPayload {
    categories: &'static [&'static str],
    locations: &'static [&'static str],
}

/// Options for the category and location pickers, "All" first.
pub async fn catalog() -> Response {
    let payload = CatalogPayload {
        categories: &CATEGORIES,
        locations: &LOCATIONS,
    };

    success(payload, "Catalog loaded")
}
