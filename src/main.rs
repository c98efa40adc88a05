use axum::{ServiceExt, extract::Request};
use miqa::api::{self, app_state::AppState};
use miqa::config::loader::ConfigLoader;
use miqa::observability::init_tracing;
use miqa::services::create_mailer;
use miqa::storage::SurrealPool;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load()?;
    let _log_guard = init_tracing(&config.logging);
    ConfigLoader::validate(&config)?;
    info!(
        "Starting {} ({} environment)...",
        config.app_name, config.environment
    );

    let db_pool = SurrealPool::new(config.database.clone()).await?;
    info!("Database connection initialized");

    let mailer = create_mailer(&config.email);
    info!("Mailer initialized: {}", mailer.name());

    let app_state = AppState::new(db_pool.clone(), mailer, &config).await?;
    info!("Application state created");

    let app = api::into_service(api::create_app(
        app_state,
        &config.server,
        env!("CARGO_PKG_VERSION"),
    ));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_pool.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
