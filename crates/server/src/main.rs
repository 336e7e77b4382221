//! Portal application entry point.
//!
//! Selects the configuration profile, connects the database pool and keeps it
//! open until the process is asked to stop.

use anyhow::Context;
use portal_common::{Settings, init_tracing, settings};
use tokio::signal;
use tracing::info;

/// Which signal ended the wait.
#[derive(Debug, PartialEq, Eq)]
enum Shutdown {
    Interrupt,
    Terminate,
}

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    match wait_for_shutdown(signal::ctrl_c(), terminate).await {
        Shutdown::Interrupt => info!("Received SIGINT, shutting down..."),
        Shutdown::Terminate => info!("Received SIGTERM, shutting down..."),
    }
}

/// Race the interrupt listener against `terminate`.
///
/// A listener that fails never counts as an interrupt.
async fn wait_for_shutdown<I, T>(interrupt: I, terminate: T) -> Shutdown
where
    I: Future<Output = std::io::Result<()>>,
    T: Future<Output = ()>,
{
    let interrupt = async {
        if let Err(e) = interrupt.await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = interrupt => Shutdown::Interrupt,
        () = terminate => Shutdown::Terminate,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let loaded = Settings::load().context("failed to load settings")?;
    init_tracing(&loaded);
    loaded.log_selection();
    let settings = settings::init(loaded)?;

    info!(
        profile = settings.profile.name(),
        debug = settings.debug,
        testing = settings.testing,
        "Starting portal..."
    );

    let db = portal_db::init(settings).await?;
    info!("Connected to database");

    portal_db::migrate(&db).await?;
    info!("Schema is up to date");

    shutdown_signal().await;

    db.close().await?;
    info!("Database pool closed");
    Ok(())
}
