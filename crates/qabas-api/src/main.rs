// Qabas API server

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use qabas_api::auth::{LocalIdentityProvider, SessionResolver};
use qabas_api::{build_router, AppConfig, AppState};
use qabas_storage::StorageBackend;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qabas_api=debug,qabas_storage=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Qabas API v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::from_env()?;

    let store = match &config.database_url {
        Some(url) => StorageBackend::postgres(url).await?,
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store (data is lost on restart)");
            StorageBackend::in_memory()
        }
    };

    tracing::info!(
        project_id = %config.auth.identity.project_id,
        production = config.auth.production,
        admin_emails = config.auth.admin_emails.len(),
        "Authentication configured"
    );

    let provider = Arc::new(LocalIdentityProvider::new(config.auth.identity.clone()));
    let resolver = SessionResolver::new(provider, config.auth.cookie.clone());
    let state = AppState::new(store, resolver, config.auth.admin_emails.clone());

    let app = build_router(state, config.cors_origins.clone());

    let listener = tokio::net::TcpListener::bind(&config.http_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.http_addr))?;
    tracing::info!("Qabas API listening on {}", config.http_addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", config.http_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
