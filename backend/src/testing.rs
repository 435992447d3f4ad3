//! Scripted connector for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use common::errors::{AppError, AppResult};

use crate::db::{Connector, Session};

#[derive(Clone)]
pub enum Script {
    /// Sessions open and every query succeeds.
    Healthy,
    /// Opening a session fails with the given message.
    Refuse(String),
    /// The connector yields no session and no error.
    NoSession,
    /// Sessions open but every query fails with the given message.
    FailQuery(String),
}

pub struct ScriptedConnector {
    script: Script,
    closed: Arc<AtomicUsize>,
}

impl ScriptedConnector {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            closed: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of sessions closed so far.
    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for ScriptedConnector {
    async fn connect(&self) -> AppResult<Option<Box<dyn Session>>> {
        match &self.script {
            Script::Refuse(msg) => Err(AppError::DatabaseConnection(msg.clone())),
            Script::NoSession => Ok(None),
            Script::Healthy => Ok(Some(Box::new(ScriptedSession {
                fail: None,
                closed: self.closed.clone(),
            }))),
            Script::FailQuery(msg) => Ok(Some(Box::new(ScriptedSession {
                fail: Some(msg.clone()),
                closed: self.closed.clone(),
            }))),
        }
    }
}

struct ScriptedSession {
    fail: Option<String>,
    closed: Arc<AtomicUsize>,
}

impl ScriptedSession {
    fn answer(&self, value: &str) -> AppResult<String> {
        match &self.fail {
            Some(msg) => Err(AppError::DatabaseQuery(msg.clone())),
            None => Ok(value.to_string()),
        }
    }
}

#[async_trait]
impl Session for ScriptedSession {
    async fn server_version(&mut self) -> AppResult<String> {
        self.answer("PostgreSQL 16.2")
    }

    async fn server_time(&mut self) -> AppResult<String> {
        self.answer("2024-05-01 12:30:45.123456 UTC")
    }

    async fn close(&mut self) -> AppResult<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
