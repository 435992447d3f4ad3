//! Database probing service.

use std::sync::Arc;

use common::errors::{AppError, AppResult};

use crate::db::{Connector, Session};

/// Runs the fixed queries behind the HTTP endpoints.
///
/// Every session opened here is closed before the method returns, whether
/// the query succeeded or not.
pub struct DatabaseService {
    connector: Arc<dyn Connector>,
}

impl DatabaseService {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self { connector }
    }

    /// Opens a session and asks for the server version.
    ///
    /// Returns `Ok(false)` when the connector produced no session.
    pub async fn check(&self) -> AppResult<bool> {
        let Some(mut session) = self.connector.connect().await? else {
            return Ok(false);
        };

        let result = session.server_version().await;
        release(session).await;

        let version = result?;
        tracing::debug!(version = %version, "database reachable");
        Ok(true)
    }

    /// Fetches the current time from the database server.
    pub async fn server_time(&self) -> AppResult<String> {
        let mut session = self
            .connector
            .connect()
            .await?
            .ok_or(AppError::DatabaseUnavailable)?;

        let result = session.server_time().await;
        release(session).await;
        result
    }
}

async fn release(mut session: Box<dyn Session>) {
    if let Err(e) = session.close().await {
        tracing::warn!(error = %e, "closing database session failed");
    }
}
