//! Blocking client for the six to-do service operations.
//!
//! Each call builds a request with `TodoClient`, executes it once through the
//! transport and returns the raw `HttpResponse`, whatever its status. Use
//! `TodoClient::parse_*` on the result to get typed values.

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::transport::{Transport, UreqTransport};
use crate::types::{NewTask, TaskUpdate};

#[derive(Debug, Clone)]
pub struct ApiClient<T = UreqTransport> {
    client: TodoClient,
    transport: T,
}

impl ApiClient<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: TodoClient::new(base_url),
            transport,
        }
    }

    /// The request builder, for callers that want the typed `parse_*` helpers.
    pub fn requests(&self) -> &TodoClient {
        &self.client
    }

    pub fn create_task(&self, cookie: &str, text: &str, date: &str) -> Result<HttpResponse, ApiError> {
        let input = NewTask {
            text: text.to_string(),
            date: date.to_string(),
        };
        let req = self.client.build_create_task(cookie, &input)?;
        self.transport.execute(req)
    }

    pub fn read_all_tasks(&self, cookie: &str) -> Result<HttpResponse, ApiError> {
        self.transport.execute(self.client.build_read_all_tasks(cookie))
    }

    pub fn read_task(&self, cookie: &str, task_id: &str) -> Result<HttpResponse, ApiError> {
        self.transport.execute(self.client.build_read_task(cookie, task_id))
    }

    pub fn update_task(&self, cookie: &str, task_id: &str, done: bool) -> Result<HttpResponse, ApiError> {
        let req = self
            .client
            .build_update_task(cookie, task_id, &TaskUpdate { done })?;
        self.transport.execute(req)
    }

    pub fn delete_task(&self, cookie: &str, task_id: &str) -> Result<HttpResponse, ApiError> {
        self.transport.execute(self.client.build_delete_task(cookie, task_id))
    }

    pub fn get_user(&self, cookie: &str) -> Result<HttpResponse, ApiError> {
        self.transport.execute(self.client.build_get_user(cookie))
    }
}
