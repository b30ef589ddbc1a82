//! Black-box contract suite for the to-do service.
//!
//! # Overview
//! `Harness` bundles an `ApiClient` with the session cookie the suite acts
//! as. It points at a live server when `TODO_BASE_URL` and
//! `TODO_SESSION_COOKIE` are set and at an in-process mock otherwise. The
//! scenarios live in `tests/`; every one creates its own randomly generated
//! tasks and deletes them again, so tests can run in any order or in
//! parallel against a shared server.

pub mod config;
pub mod fixtures;
pub mod server;

use std::cell::RefCell;
use std::sync::Once;

use thiserror::Error;
use todo_client::{ApiClient, ApiError, HttpResponse, Task};
use tracing::{info, warn};

pub use config::HarnessConfig;
pub use fixtures::{random_date, random_date_with, random_text};

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error("could not start mock server: {0}")]
    MockServer(#[from] std::io::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// An `ApiClient` plus the session it acts as.
///
/// Every task created through `create_task` or `create_random_task` is
/// tracked and deleted when the harness drops, including during a panic
/// unwind, so a failing assertion does not leave data on a live server.
pub struct Harness {
    pub api: ApiClient,
    pub cookie: String,
    created: RefCell<Vec<String>>,
}

impl Harness {
    /// Resolve the target from the environment, falling back to a fresh mock server.
    pub fn start() -> Result<Self, HarnessError> {
        init_tracing();
        let config = match HarnessConfig::from_env()? {
            Some(config) => {
                info!(base_url = %config.base_url, "testing live server");
                config
            }
            None => server::spawn_mock_server()?,
        };
        Ok(Self::connect(config))
    }

    pub fn connect(config: HarnessConfig) -> Self {
        Self {
            api: ApiClient::new(&config.base_url),
            cookie: config.cookie,
            created: RefCell::new(Vec::new()),
        }
    }

    /// Create a task and track it for cleanup when the server accepted it.
    pub fn create_task(&self, text: &str, date: &str) -> Result<HttpResponse, HarnessError> {
        let resp = self.api.create_task(&self.cookie, text, date)?;
        if let Ok(task) = self.api.requests().parse_task(&resp) {
            self.track(&task.id);
        }
        Ok(resp)
    }

    /// Create a task with random text and date and return it parsed.
    pub fn create_random_task(&self) -> Result<Task, HarnessError> {
        let resp = self.create_task(&random_text(10), &random_date())?;
        Ok(self.api.requests().parse_task(&resp)?)
    }

    /// Ids still awaiting cleanup.
    pub fn tracked(&self) -> Vec<String> {
        self.created.borrow().clone()
    }

    /// Delete `task_id` now and stop tracking it. Failures are logged, not raised.
    pub fn cleanup(&self, task_id: &str) {
        self.created.borrow_mut().retain(|id| id != task_id);
        self.delete_quietly(task_id);
    }

    fn track(&self, task_id: &str) {
        self.created.borrow_mut().push(task_id.to_string());
    }

    fn delete_quietly(&self, task_id: &str) {
        match self.api.delete_task(&self.cookie, task_id) {
            // 404: the scenario already deleted it.
            Ok(resp) if resp.is_success() || resp.status() == 404 => {}
            Ok(resp) => warn!(task_id, status = resp.status(), "cleanup delete failed"),
            Err(e) => warn!(task_id, error = %e, "cleanup delete failed"),
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let leftover = std::mem::take(self.created.get_mut());
        for task_id in &leftover {
            self.delete_quietly(task_id);
        }
    }
}

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "contract_tests=info,todo_client=debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}
