//! Application state for the backend service.

use std::sync::Arc;

use common::config::AppConfig;

use crate::db::{Connector, PgConnector};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub connector: Arc<dyn Connector>,
}

impl AppState {
    /// Creates state backed by PostgreSQL.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_connector(Arc::new(PgConnector::new(
            config.database.clone(),
            config.connect_timeout,
        )))
    }

    /// Creates state around an arbitrary connector.
    pub fn with_connector(connector: Arc<dyn Connector>) -> Self {
        Self { connector }
    }
}
