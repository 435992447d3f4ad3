//! Environment-driven configuration.
//!
//! Everything is resolved once at startup and handed to the components that
//! need it. Lookups go through a caller-supplied function so the resolution
//! rules can be exercised without touching the process environment.

use std::time::Duration;

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 5000;

/// Database connection parameters.
///
/// Values are kept exactly as read. The port is not checked to be numeric;
/// a malformed value shows up as a connection failure instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub database: String,
    pub user: String,
    pub password: String,
    pub port: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            database: "myapp".to_string(),
            user: "postgres".to_string(),
            password: "password".to_string(),
            port: "5432".to_string(),
        }
    }
}

impl DbConfig {
    /// Resolves `DB_HOST`, `DB_NAME`, `DB_USER`, `DB_PASSWORD` and `DB_PORT`
    /// through `lookup`. Absent or empty values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str, default: String| {
            lookup(key).filter(|v| !v.is_empty()).unwrap_or(default)
        };

        Self {
            host: get("DB_HOST", defaults.host),
            database: get("DB_NAME", defaults.database),
            user: get("DB_USER", defaults.user),
            password: get("DB_PASSWORD", defaults.password),
            port: get("DB_PORT", defaults.port),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Process-wide configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address.
    pub host: String,

    /// Bind port.
    pub port: u16,

    /// Upper bound on opening a database connection. `None` waits forever.
    pub connect_timeout: Option<Duration>,

    pub log_format: LogFormat,

    pub database: DbConfig,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(env_lookup)
    }

    /// Loads configuration through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("SERVER_HOST")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = lookup("SERVER_PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let connect_timeout = lookup("DB_CONNECT_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Self {
            host,
            port,
            connect_timeout,
            log_format,
            database: DbConfig::from_lookup(&lookup),
        }
    }

    /// `host:port` string suitable for binding a listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
