//! Synchronous API client for the to-do service.
//!
//! # Overview
//! `TodoClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network. `ApiClient` pairs it with a blocking
//! `Transport` and exposes the service's six operations, returning raw
//! responses so callers can assert on status codes directly.
//!
//! # Design
//! - `TodoClient` is stateless, it holds only `base_url`.
//! - The session cookie is a caller-supplied argument on every call.
//! - Payloads are serialized with serde, never string-formatted.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::ApiClient;
pub use client::{TodoClient, SESSION_COOKIE};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{NewTask, Task, TaskUpdate, User};
