//! In-memory stand-in for the to-do web service.
//!
//! Reproduces the contract the client is tested against: sessions are read
//! from the `todo-session` cookie, identifiers are 24 lowercase hex
//! characters, each user only sees their own tasks, and failures surface as
//! 401 (bad session), 404 (unknown task) or 500 (malformed id or missing text).

pub mod config;

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{FromRequestParts, Path, State},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "todo-session";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
    pub date: String,
    pub done: bool,
    pub user_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub id: String,
    pub user_name: String,
    pub email: String,
}

impl User {
    /// A user with a fresh id.
    pub fn new(user_name: &str, email: &str) -> Self {
        Self {
            id: new_object_id(),
            user_name: user_name.to_string(),
            email: email.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewTask {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub date: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskUpdate {
    pub done: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

pub type Db = Arc<RwLock<HashMap<String, Task>>>;

/// Shared server state. Sessions are fixed once the server starts.
#[derive(Clone, Default)]
pub struct AppState {
    sessions: Arc<HashMap<String, User>>,
    tasks: Db,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `token` as a valid session for `user`.
    pub fn with_session(mut self, token: impl Into<String>, user: User) -> Self {
        Arc::make_mut(&mut self.sessions).insert(token.into(), user);
        self
    }

    fn user_for(&self, token: &str) -> Option<&User> {
        self.sessions.get(token)
    }
}

/// A 24 character lowercase hex identifier, the shape the service uses for
/// task and user ids.
pub fn new_object_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(24);
    id
}

fn is_object_id(id: &str) -> bool {
    id.len() == 24 && id.bytes().all(|b| b.is_ascii_hexdigit())
}

/// A failed request, rendered as `{"message": ...}` with the given status.
#[derive(Debug)]
pub struct Failure {
    status: StatusCode,
    message: String,
}

impl Failure {
    fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "no valid session".to_string(),
        }
    }

    fn not_found(id: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("task {id} not found"),
        }
    }

    fn invalid_id(id: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("cast to ObjectId failed for value \"{id}\""),
        }
    }

    fn validation(message: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_string(),
        }
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { message: self.message })).into_response()
    }
}

/// The user behind the request's session cookie.
pub struct Session(pub User);

impl FromRequestParts<AppState> for Session {
    type Rejection = Failure;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(session_token)
            .ok_or_else(Failure::unauthorized)?;
        state
            .user_for(token)
            .cloned()
            .map(Session)
            .ok_or_else(Failure::unauthorized)
    }
}

/// Extract a non-empty `todo-session` value from a `Cookie` header.
fn session_token(header: &str) -> Option<&str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/items", get(list_tasks).post(create_task))
        .route(
            "/api/v1/items/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/api/v1/user", get(current_user))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

async fn list_tasks(State(state): State<AppState>, Session(user): Session) -> Json<Vec<Task>> {
    let tasks = state.tasks.read().await;
    Json(
        tasks
            .values()
            .filter(|task| task.user_id == user.id)
            .cloned()
            .collect(),
    )
}

async fn create_task(
    State(state): State<AppState>,
    Session(user): Session,
    Json(input): Json<NewTask>,
) -> Result<(StatusCode, Json<Task>), Failure> {
    if input.text.is_empty() {
        return Err(Failure::validation("Text is required"));
    }
    let task = Task {
        id: new_object_id(),
        text: input.text,
        date: input.date,
        done: false,
        user_id: user.id,
    };
    info!(id = %task.id, user = %task.user_id, "task created");
    state.tasks.write().await.insert(task.id.clone(), task.clone());
    Ok((StatusCode::CREATED, Json(task)))
}

async fn get_task(
    State(state): State<AppState>,
    Session(user): Session,
    Path(id): Path<String>,
) -> Result<Json<Task>, Failure> {
    if !is_object_id(&id) {
        return Err(Failure::invalid_id(&id));
    }
    let tasks = state.tasks.read().await;
    tasks
        .get(&id)
        .filter(|task| task.user_id == user.id)
        .cloned()
        .map(Json)
        .ok_or_else(|| Failure::not_found(&id))
}

async fn update_task(
    State(state): State<AppState>,
    Session(user): Session,
    Path(id): Path<String>,
    Json(input): Json<TaskUpdate>,
) -> Result<Json<Task>, Failure> {
    if !is_object_id(&id) {
        return Err(Failure::invalid_id(&id));
    }
    let mut tasks = state.tasks.write().await;
    let task = tasks
        .get_mut(&id)
        .filter(|task| task.user_id == user.id)
        .ok_or_else(|| Failure::not_found(&id))?;
    task.done = input.done;
    debug!(id = %id, done = input.done, "task updated");
    Ok(Json(task.clone()))
}

async fn delete_task(
    State(state): State<AppState>,
    Session(user): Session,
    Path(id): Path<String>,
) -> Result<StatusCode, Failure> {
    if !is_object_id(&id) {
        return Err(Failure::invalid_id(&id));
    }
    let mut tasks = state.tasks.write().await;
    let owned = tasks.get(&id).is_some_and(|task| task.user_id == user.id);
    if !owned {
        return Err(Failure::not_found(&id));
    }
    tasks.remove(&id);
    info!(id = %id, "task deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn current_user(Session(user): Session) -> Json<User> {
    Json(user)
}
