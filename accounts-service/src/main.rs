use std::sync::Arc;

use accounts_adapters::{JwtTokenService, PostgresUserStore, Settings};
use accounts_service::{build_router, configure_postgresql};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .with(ErrorLayer::default())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let settings = Settings::load();

    // Setup database connection pool and run migrations
    let pg_pool = configure_postgresql(settings).await;

    // Create store and token service
    let user_store = Arc::new(PostgresUserStore::new(pg_pool));
    let token_service = Arc::new(JwtTokenService::new(settings.auth.jwt.clone()));

    // Build router
    let app = build_router(user_store, token_service, settings.application.graphiql);

    // Start server
    let address = format!(
        "{}:{}",
        settings.application.host, settings.application.port
    );
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
