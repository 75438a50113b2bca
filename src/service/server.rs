//! HTTP server lifecycle
//!
//! Binds the API router to the configured address and serves it until a
//! shutdown signal arrives on the broadcast channel.

use crate::service::app::AppState;
use crate::service::routes::create_router;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{info, warn};

/// API server wrapping the Axum router
pub struct ApiServer {
    state: Arc<AppState>,
    shutdown_tx: broadcast::Sender<()>,
}

impl ApiServer {
    /// Create a new API server for the given state
    pub fn new(state: Arc<AppState>) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self { state, shutdown_tx }
    }

    /// Address taken from the service settings
    pub fn address(&self) -> Result<SocketAddr> {
        self.state
            .config()
            .http_addr()
            .parse()
            .context("Invalid HTTP server address")
    }

    /// Start serving requests, returning once shut down
    pub async fn start(&self) -> Result<()> {
        let addr = self.address()?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind HTTP server to {}", addr))?;

        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        let app = create_router(self.state.clone());
        let local_addr = listener.local_addr()?;

        info!("API server listening on http://{}", local_addr);

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        self.state.set_running(true).await;

        let served = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("API server shutdown signal received");
            })
            .await;

        self.state.set_running(false).await;
        served?;

        info!("API server stopped");
        Ok(())
    }

    /// Signal the server to stop
    pub fn stop(&self) {
        info!("Stopping API server...");

        if let Err(e) = self.shutdown_tx.send(()) {
            warn!("Failed to send shutdown signal to API server: {}", e);
        }
    }
}
