//! Domain DTOs for the to-do API.
//!
//! # Design
//! Field names follow the service's wire format (`_id`, `Text`, `Date`,
//! `Done`, `UserId`) through serde renames while the Rust side stays
//! snake_case. Fields the client does not model, such as a database version
//! counter, are ignored on input.

use serde::{Deserialize, Serialize};

/// A single task owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
    pub date: String,
    #[serde(default)]
    pub done: bool,
    pub user_id: String,
}

/// The user bound to a session cookie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub id: String,
    pub user_name: String,
    pub email: String,
}

/// Request payload for creating a task. The server assigns `_id` and
/// `UserId` and starts every task with `Done = false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewTask {
    pub text: String,
    pub date: String,
}

/// Request payload for updating a task. Only the completion flag is mutable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskUpdate {
    pub done: bool,
}
