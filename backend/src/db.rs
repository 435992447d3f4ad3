//! Database access.
//!
//! Handlers never hold a connection directly: a [`Connector`] opens a fresh
//! [`Session`] per request and the caller closes it when done.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection};

use common::config::DbConfig;
use common::errors::{AppError, AppResult};

/// Opens database sessions.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Opens a new session.
    ///
    /// `Ok(None)` means the connector produced no session without reporting
    /// a failure.
    async fn connect(&self) -> AppResult<Option<Box<dyn Session>>>;
}

/// A single open database session, owned by one request.
#[async_trait]
pub trait Session: Send {
    /// Runs `SELECT version()`.
    async fn server_version(&mut self) -> AppResult<String>;

    /// Runs `SELECT NOW()` and renders the result as text.
    async fn server_time(&mut self) -> AppResult<String>;

    /// Closes the session gracefully. Further queries fail.
    async fn close(&mut self) -> AppResult<()>;
}

/// PostgreSQL connector. Opens one unpooled connection per call.
pub struct PgConnector {
    config: DbConfig,
    connect_timeout: Option<Duration>,
}

impl PgConnector {
    pub fn new(config: DbConfig, connect_timeout: Option<Duration>) -> Self {
        Self {
            config,
            connect_timeout,
        }
    }
}

#[async_trait]
impl Connector for PgConnector {
    async fn connect(&self) -> AppResult<Option<Box<dyn Session>>> {
        let options = connect_options(&self.config)?;
        let connecting = PgConnection::connect_with(&options);

        let result = match self.connect_timeout {
            Some(limit) => tokio::time::timeout(limit, connecting).await.map_err(|_| {
                AppError::DatabaseConnection(format!(
                    "timed out connecting to {}:{} after {}s",
                    self.config.host,
                    self.config.port,
                    limit.as_secs()
                ))
            })?,
            None => connecting.await,
        };

        let conn = result.map_err(|e| {
            tracing::warn!(host = %self.config.host, port = %self.config.port, error = %e, "database connection failed");
            AppError::DatabaseConnection(e.to_string())
        })?;

        tracing::debug!(host = %self.config.host, database = %self.config.database, "database session opened");
        Ok(Some(Box::new(PgSession { conn: Some(conn) })))
    }
}

/// Builds connect options from the configuration record.
///
/// The port is only interpreted here, so a malformed value is reported as a
/// connection failure.
pub fn connect_options(config: &DbConfig) -> AppResult<PgConnectOptions> {
    let port: u16 = config.port.parse().map_err(|e| {
        AppError::DatabaseConnection(format!("invalid port \"{}\": {}", config.port, e))
    })?;

    Ok(PgConnectOptions::new()
        .host(&config.host)
        .port(port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.database))
}

struct PgSession {
    conn: Option<PgConnection>,
}

impl PgSession {
    fn conn(&mut self) -> AppResult<&mut PgConnection> {
        self.conn
            .as_mut()
            .ok_or_else(|| AppError::DatabaseQuery("connection is closed".to_string()))
    }
}

#[async_trait]
impl Session for PgSession {
    async fn server_version(&mut self) -> AppResult<String> {
        let conn = self.conn()?;
        sqlx::query_scalar::<_, String>("SELECT version()")
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| AppError::DatabaseQuery(e.to_string()))
    }

    async fn server_time(&mut self) -> AppResult<String> {
        let conn = self.conn()?;
        let now = sqlx::query_scalar::<_, DateTime<Utc>>("SELECT NOW()")
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| AppError::DatabaseQuery(e.to_string()))?;
        Ok(now.to_string())
    }

    async fn close(&mut self) -> AppResult<()> {
        match self.conn.take() {
            Some(conn) => conn
                .close()
                .await
                .map_err(|e| AppError::DatabaseConnection(e.to_string())),
            None => Ok(()),
        }
    }
}
