use condo_ledger::{
    api::{self, AppState},
    config::{database, seed, settings},
    errors::Result,
};
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file before reading any environment variables
    dotenv().ok();

    // 3. Load settings (condo.toml, with environment overrides)
    let settings = settings::load_default_settings()?;

    // 4. Initialize the database and ensure the schema exists
    let db = database::create_connection().await?;
    database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    // 5. Seed configured condominiums and their units (idempotent)
    seed::seed_condominiums(&db, &settings).await?;

    // 6. Serve the API
    let state = AppState::new(db, &settings)?;
    let app = api::build_app(state);

    let listener = tokio::net::TcpListener::bind(&settings.server.bind_addr).await?;
    info!("Listening on {}", settings.server.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
