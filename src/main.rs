use std::sync::Arc;

use axum::Router;
use chrono::Utc;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use meetnexus_server::config::Config;
use meetnexus_server::routes::{create_routes, AppState};
use meetnexus_server::store::seed::seed_demo_data;
use meetnexus_server::store::{InMemoryStore, Repository};

const DEFAULT_LOG_FILTER: &str = "meetnexus_server=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env();

    let repo: Arc<dyn Repository> = Arc::new(InMemoryStore::new());
    if config.seed_demo_data {
        seed_demo_data(repo.as_ref(), Utc::now())?;
    }

    let app: Router = create_routes(AppState::new(repo, &config), &config);

    tracing::info!(
        payment_window_minutes = config.payment_window_minutes,
        "🚀 Server running at http://{}",
        config.bind_addr
    );

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
