use std::sync::Arc;

use project_roster_api::{
    auth::JwtKeys,
    config,
    gateway::{PgGateway, ProcedureGateway},
    is_production,
    routes::{self, AppState},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_TOKEN, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Project Roster API in {:?} mode", config.environment);

    let jwt = JwtKeys::new(&config.security.jwt_secret);
    if !jwt.is_configured() {
        if is_production!() {
            anyhow::bail!("JWT secret is required in production (set SECURITY_JWT_SECRET or JWT_TOKEN)");
        }
        tracing::warn!("JWT secret not configured; every protected request will be rejected");
    }

    let gateway = PgGateway::connect(&config.database).await?;
    let state = AppState::new(Arc::new(gateway.clone()) as Arc<dyn ProcedureGateway>, jwt);
    let app = routes::configured_app(state, config);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Project Roster API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    gateway.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
