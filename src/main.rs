//! SeatHub Server — Seat Session Manager
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{fmt, EnvFilter};

use seathub_core::config::AppConfig;
use seathub_core::error::AppError;
use seathub_session::{DecrementSweep, SeatRegistry, SessionController};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("SEATHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting SeatHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let database = seathub_database::connection::DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    seathub_database::migration::run_migrations(database.pool()).await?;
    tracing::info!("Database migrations complete");

    // ── Step 2: Repositories ─────────────────────────────────────
    let seat_repo = Arc::new(seathub_database::repositories::seat::SeatRepository::new(
        database.pool().clone(),
    ));
    let member_repo = Arc::new(
        seathub_database::repositories::member::MemberRepository::new(database.pool().clone()),
    );
    let seat_store: Arc<dyn seathub_session::SeatStore> = seat_repo;
    let member_store: Arc<dyn seathub_session::MemberStore> = member_repo;

    // ── Step 3: Seat registry ────────────────────────────────────
    tracing::info!("Loading seat registry...");
    let registry = Arc::new(SeatRegistry::initialize(seat_store.as_ref()).await?);
    tracing::info!(seats = registry.len(), "Seat registry loaded");

    // ── Step 4: Session controller ───────────────────────────────
    let controller = Arc::new(SessionController::new(
        Arc::clone(&registry),
        Arc::clone(&seat_store),
        Arc::clone(&member_store),
    ));

    // ── Step 5: Realtime layer ───────────────────────────────────
    let connections = Arc::new(seathub_realtime::ConnectionManager::new());
    let notifier = Arc::new(seathub_realtime::WsNotifier::new(Arc::clone(&connections)));

    // ── Step 6: Shutdown channel ─────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Step 7: Tick scheduler ───────────────────────────────────
    let scheduler_handle = if config.clock.enabled {
        tracing::info!("Starting tick scheduler...");
        let sweep = Arc::new(DecrementSweep::new(
            Arc::clone(&registry),
            Arc::clone(&controller),
            Arc::clone(&seat_store),
            notifier,
        ));
        let scheduler = seathub_worker::TickScheduler::new(sweep, config.clock.clone());
        let cancel = shutdown_rx.clone();
        Some(tokio::spawn(async move {
            scheduler.run(cancel).await;
        }))
    } else {
        tracing::info!("Tick scheduler disabled");
        None
    };

    // ── Step 8: Command server ───────────────────────────────────
    let server = seathub_realtime::CommandServer::new(
        config.server.clone(),
        Arc::clone(&controller),
        Arc::clone(&connections),
    );

    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server.run(shutdown_rx).await?;

    // ── Step 9: Wait for background tasks ────────────────────────
    tracing::info!("Waiting for background tasks to complete...");

    if let Some(handle) = scheduler_handle {
        let _ = tokio::time::timeout(std::time::Duration::from_secs(10), handle).await;
    }

    database.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
