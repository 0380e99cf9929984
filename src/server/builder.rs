//! ServerBuilder for fluent API to build the record store HTTP server

use super::host::ServerHost;
use super::router::build_router;
use crate::config::{DashboardCredentials, StorefrontConfig};
use crate::core::OrderStore;
use crate::storage::TimeoutOrderStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Builder for the REST server exposing an order store
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_store(InMemoryOrderStore::new())
///     .with_config(&StorefrontConfig::default_config().with_env_overrides()?)
///     .serve("127.0.0.1:3000")
///     .await?;
/// ```
#[derive(Default)]
pub struct ServerBuilder {
    store: Option<Arc<dyn OrderStore>>,
    credentials: Option<DashboardCredentials>,
    request_timeout: Option<Duration>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the order store (required)
    pub fn with_store(mut self, store: impl OrderStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set an already shared order store (required, alternative to `with_store`)
    pub fn with_shared_store(mut self, store: Arc<dyn OrderStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Enable the operator routes behind static credentials
    pub fn with_dashboard_credentials(mut self, credentials: DashboardCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Bound every store request made by the handlers
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Apply the relevant parts of a loaded configuration
    pub fn with_config(mut self, config: &StorefrontConfig) -> Self {
        if let Some(credentials) = config.dashboard.credentials() {
            self.credentials = Some(credentials);
        }
        self.request_timeout = Some(config.store.request_timeout());
        self
    }

    /// Add routes that don't belong to the order API (static pages, webhooks, ...)
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(&mut self) -> Result<ServerHost> {
        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("OrderStore is required. Call .with_store()"))?;

        let store: Arc<dyn OrderStore> = match self.request_timeout {
            Some(timeout) => Arc::new(TimeoutOrderStore::new(store, timeout)),
            None => store,
        };

        if self.credentials.is_none() {
            tracing::warn!("dashboard credentials not configured; operator routes will answer 503");
        }

        Ok(ServerHost::new(store, self.credentials.take()))
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let host = Arc::new(self.build_host()?);
        let custom_routes = std::mem::take(&mut self.custom_routes);
        Ok(build_router(host, custom_routes))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
