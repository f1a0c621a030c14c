//! Relay server.
//!
//! Serves until either Ctrl-C arrives or the request-count threshold asks
//! for a recycle, then drains in-flight requests and returns.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Notify;
use tracing::{info, warn};

use crate::http::routes::create_router;
use crate::state::AppState;

/// Listen address.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// The relay server.
pub struct RelayServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl RelayServer {
    pub fn new(config: ServerConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Get the server address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Bind and serve until shutdown.
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let addr: SocketAddr = self.addr().parse()?;
        let listener = TcpListener::bind(addr).await?;
        info!("Relay server listening on {}", addr);
        self.serve(listener).await
    }

    /// Serve on an already bound listener until shutdown.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), Box<dyn std::error::Error>> {
        let app = create_router(self.state.clone());
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(self.state.shutdown_notify.clone()))
            .await?;

        if self.state.is_shutdown_requested() {
            info!(
                "Worker recycled after {} requests",
                self.state.request_count()
            );
        }
        info!("Relay server stopped");
        Ok(())
    }
}

async fn shutdown_signal(notify: Arc<Notify>) {
    tokio::select! {
        _ = notify.notified() => {
            info!("Recycle requested, draining connections");
        }
        result = tokio::signal::ctrl_c() => {
            match result {
                Ok(()) => info!("Ctrl-C received, shutting down"),
                Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use relay_config::Config;

    use super::*;

    fn state() -> Arc<AppState> {
        Arc::new(AppState::from_config(&Config::default()).unwrap())
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn test_server_addr_format() {
        let server = RelayServer::new(ServerConfig::new("127.0.0.1", 9000), state());
        assert_eq!(server.addr(), "127.0.0.1:9000");
    }

    #[tokio::test]
    async fn test_serve_stops_on_shutdown_request() {
        let state = state();
        let server = RelayServer::new(ServerConfig::default(), state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

        state.request_shutdown();
        let result = tokio::time::timeout(Duration::from_secs(5), server.serve(listener))
            .await
            .unwrap();
        assert!(result.is_ok());
    }
}
