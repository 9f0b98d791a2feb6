//! PayUp API Server
//!
//! Main entry point for the PayUp backend service.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payup_api::{AppState, create_router};
use payup_core::notification::PushDispatcher;
use payup_core::store::{InMemoryStore, Store};
use payup_db::{PgStore, connect_with};
use payup_shared::{AppConfig, JwtConfig, JwtService, PushClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "payup=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    if config.database.is_in_memory() {
        warn!("Using the in-memory store; data is lost on shutdown");
        serve(Arc::new(InMemoryStore::new()), &config).await
    } else {
        let db = connect_with(&config.database).await?;
        info!("Connected to database");
        serve(Arc::new(PgStore::new(db)), &config).await
    }
}

async fn serve<S: Store>(store: Arc<S>, config: &AppConfig) -> anyhow::Result<()> {
    let jwt_service = Arc::new(JwtService::new(JwtConfig::from(&config.jwt)));

    let push_client = PushClient::new(&config.push)?;
    if push_client.is_configured() {
        info!(endpoint = %config.push.endpoint, "Push notifications enabled");
    } else {
        warn!("PAYUP__PUSH__SERVER_KEY is not set; notifications will be dropped");
    }
    let notifier = Arc::new(PushDispatcher::new(
        Arc::clone(&store),
        Arc::new(push_client),
        Duration::from_secs(config.push.timeout_secs),
    ));

    let app = create_router(AppState::new(store, notifier, jwt_service));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
