//! Server lifecycle

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;
use tokio::signal;
use tracing::{error, info, warn};

/// Bind, serve and wait for a shutdown signal
pub async fn run_server(state: AppState, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let app = routes::create_router(state, config.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("MailSift listening on http://{}", addr);

    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolve on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
