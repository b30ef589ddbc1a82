//! Stateless HTTP request builder and response parser for the to-do API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Every request carries the caller's session as `todo-session=<token>`.

use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewTask, Task, TaskUpdate, User};

/// Name of the cookie the service reads the session token from.
pub const SESSION_COOKIE: &str = "todo-session";

const ITEMS_PATH: &str = "/api/v1/items";
const USER_PATH: &str = "/api/v1/user";

/// Synchronous, stateless request builder for the to-do API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. `ApiClient` pairs it with a `Transport`.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_create_task(&self, cookie: &str, input: &NewTask) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Post, self.items_url(), cookie, input)
    }

    pub fn build_read_all_tasks(&self, cookie: &str) -> HttpRequest {
        self.without_body(HttpMethod::Get, self.items_url(), cookie)
    }

    /// `task_id` is embedded in the path as given.
    pub fn build_read_task(&self, cookie: &str, task_id: &str) -> HttpRequest {
        self.without_body(HttpMethod::Get, self.item_url(task_id), cookie)
    }

    pub fn build_update_task(
        &self,
        cookie: &str,
        task_id: &str,
        input: &TaskUpdate,
    ) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Put, self.item_url(task_id), cookie, input)
    }

    pub fn build_delete_task(&self, cookie: &str, task_id: &str) -> HttpRequest {
        self.without_body(HttpMethod::Delete, self.item_url(task_id), cookie)
    }

    pub fn build_get_user(&self, cookie: &str) -> HttpRequest {
        self.without_body(HttpMethod::Get, format!("{}{USER_PATH}", self.base_url), cookie)
    }

    /// Parse the task returned by create, read-one and update.
    pub fn parse_task(&self, response: &HttpResponse) -> Result<Task, ApiError> {
        check_status(response)?;
        response.json()
    }

    pub fn parse_tasks(&self, response: &HttpResponse) -> Result<Vec<Task>, ApiError> {
        check_status(response)?;
        response.json()
    }

    pub fn parse_user(&self, response: &HttpResponse) -> Result<User, ApiError> {
        check_status(response)?;
        response.json()
    }

    /// Delete responses carry no meaningful body; only the status matters.
    pub fn parse_delete(&self, response: &HttpResponse) -> Result<(), ApiError> {
        check_status(response)
    }

    fn items_url(&self) -> String {
        format!("{}{ITEMS_PATH}", self.base_url)
    }

    fn item_url(&self, task_id: &str) -> String {
        format!("{}{ITEMS_PATH}/{task_id}", self.base_url)
    }

    fn without_body(&self, method: HttpMethod, url: String, cookie: &str) -> HttpRequest {
        HttpRequest {
            method,
            url,
            headers: vec![session_header(cookie)],
            body: None,
        }
    }

    fn with_json<T: Serialize>(
        &self,
        method: HttpMethod,
        url: String,
        cookie: &str,
        input: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            url,
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                session_header(cookie),
            ],
            body: Some(body),
        })
    }
}

fn session_header(cookie: &str) -> (String, String) {
    ("cookie".to_string(), format!("{SESSION_COOKIE}={cookie}"))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200..=299 => Ok(()),
        401 => Err(ApiError::Unauthorized),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
