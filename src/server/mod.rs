//! HTTP server exposing the stores to board views
//!
//! This module provides:
//! - `AppContext`, the explicit handle bundle every handler receives
//! - the axum router and its handlers
//! - `serve`, which runs the router until SIGINT/SIGTERM

pub mod context;
pub mod handlers;
pub mod router;

pub use context::{AppContext, AppContextBuilder, OfflineAssets};
pub use router::build_router;

use anyhow::Result;
use tokio::net::TcpListener;

/// Serve `ctx` on `addr` with graceful shutdown
pub async fn serve(ctx: AppContext, addr: &str) -> Result<()> {
    let app = build_router(ctx);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM
///
/// If a handler cannot be installed, that signal is simply never awaited.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
