//! Web server for filedepot.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::auth::TokenStore;
use crate::config::Config;
use crate::file::BlobStore;
use crate::{Database, DepotError, Result};

use super::handlers::AppState;
use super::router::create_router;

/// Web server for the API.
pub struct WebServer {
    addr: SocketAddr,
    app_state: Arc<AppState>,
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &Config, db: Database) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| DepotError::Config(format!("invalid server address: {e}")))?;

        let blobs = BlobStore::new(&config.storage.root);
        let tokens =
            TokenStore::with_duration(Duration::from_secs(config.auth.token_expiry_secs));

        Ok(Self {
            addr,
            app_state: Arc::new(AppState::new(db, blobs, tokens)),
            cors_origins: config.server.cors_origins.clone(),
        })
    }

    /// Get the configured server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the session cleanup background task.
    ///
    /// Runs every hour and sweeps expired tokens out of the store.
    fn start_token_cleanup_task(app_state: Arc<AppState>) {
        tokio::spawn(async move {
            const CLEANUP_INTERVAL_SECS: u64 = 3600;

            let mut interval = tokio::time::interval(Duration::from_secs(CLEANUP_INTERVAL_SECS));

            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;

                let removed = app_state.tokens.cleanup();
                if removed > 0 {
                    tracing::info!(removed = removed, "Cleaned up expired session tokens");
                } else {
                    tracing::debug!("No expired session tokens to clean up");
                }
            }
        });
    }

    /// Run the web server until the process exits.
    pub async fn run(self) -> Result<()> {
        let router = create_router(self.app_state.clone(), &self.cors_origins);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        Self::start_token_cleanup_task(self.app_state);
        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await?;
        Ok(())
    }
}
