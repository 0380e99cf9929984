//! Server host holding the state shared by every REST handler

use crate::config::DashboardCredentials;
use crate::core::OrderStore;
use std::sync::Arc;

/// Host context containing all server state
///
/// Transport-agnostic: the REST router consumes it, but nothing here knows
/// about HTTP.
pub struct ServerHost {
    /// The record store behind the API
    pub store: Arc<dyn OrderStore>,

    /// Credentials gating the operator routes, if configured
    pub credentials: Option<DashboardCredentials>,
}

impl ServerHost {
    pub fn new(store: Arc<dyn OrderStore>, credentials: Option<DashboardCredentials>) -> Self {
        Self { store, credentials }
    }

    /// Whether operator routes can be unlocked at all
    pub fn dashboard_enabled(&self) -> bool {
        self.credentials.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryOrderStore;

    #[test]
    fn test_dashboard_disabled_without_credentials() {
        let host = ServerHost::new(Arc::new(InMemoryOrderStore::new()), None);
        assert!(!host.dashboard_enabled());
    }

    #[test]
    fn test_dashboard_enabled_with_credentials() {
        let host = ServerHost::new(
            Arc::new(InMemoryOrderStore::new()),
            Some(DashboardCredentials::new("ops", "pw")),
        );
        assert!(host.dashboard_enabled());
    }
}
