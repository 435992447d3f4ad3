//! Response bodies.

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};
use utoipa::ToSchema;

use crate::errors::AppResult;

/// Deployment version reported by the health check.
pub const API_VERSION: &str = "1.0";

/// Message returned alongside a successful data fetch.
pub const DATA_FETCHED_MESSAGE: &str = "Data fetched successfully";

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `healthy` while the process is serving.
    pub status: String,

    /// `connected`, `disconnected` or `error: <reason>`.
    #[schema(value_type = String)]
    pub database: DatabaseStatus,

    pub version: String,

    /// Local wall-clock time at response construction.
    pub timestamp: DateTime<Local>,
}

impl HealthResponse {
    pub fn new(database: DatabaseStatus) -> Self {
        Self {
            status: "healthy".to_string(),
            database,
            version: API_VERSION.to_string(),
            timestamp: Local::now(),
        }
    }
}

/// Database reachability as seen by the health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseStatus {
    Connected,
    Disconnected,
    Error(String),
}

impl From<AppResult<bool>> for DatabaseStatus {
    /// `Ok(true)` means a session was opened and queried, `Ok(false)` that
    /// no session was produced.
    fn from(result: AppResult<bool>) -> Self {
        match result {
            Ok(true) => DatabaseStatus::Connected,
            Ok(false) => DatabaseStatus::Disconnected,
            Err(e) => DatabaseStatus::Error(e.to_string()),
        }
    }
}

impl fmt::Display for DatabaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseStatus::Connected => write!(f, "connected"),
            DatabaseStatus::Disconnected => write!(f, "disconnected"),
            DatabaseStatus::Error(reason) => write!(f, "error: {}", reason),
        }
    }
}

impl Serialize for DatabaseStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Sample data response.
#[derive(Debug, Serialize, ToSchema)]
pub struct DataResponse {
    pub message: String,

    /// Database server time rendered as text.
    pub server_time: String,
}

impl DataResponse {
    pub fn new(server_time: impl Into<String>) -> Self {
        Self {
            message: DATA_FETCHED_MESSAGE.to_string(),
            server_time: server_time.into(),
        }
    }
}

/// Error body: `{"error": "..."}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
