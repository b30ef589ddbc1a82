use axum::{
    http::{self, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use mock_server::{app, AppState, ErrorBody, Task, User};
use tower::ServiceExt;

const TOKEN: &str = "alice-session";
const OTHER_TOKEN: &str = "bob-session";
const UNKNOWN_ID: &str = "0123456789abcdef01234567";

fn server() -> Router {
    app(AppState::new()
        .with_session(TOKEN, User::new("alice", "alice@example.com"))
        .with_session(OTHER_TOKEN, User::new("bob", "bob@example.com")))
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn request(method: &str, uri: &str, token: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::COOKIE, format!("todo-session={token}"))
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, token: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::COOKIE, format!("todo-session={token}"))
        .body(body.to_string())
        .unwrap()
}

async fn create(app: &Router, token: &str, text: &str) -> Task {
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/items",
            token,
            &serde_json::json!({"Text": text, "Date": "2021-6-15"}).to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}

// --- auth ---

#[tokio::test]
async fn missing_cookie_returns_401() {
    let resp = server()
        .oneshot(Request::builder().uri("/api/v1/items").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let error: ErrorBody = body_json(resp).await;
    assert!(!error.message.is_empty());
}

#[tokio::test]
async fn empty_cookie_returns_401() {
    let resp = server()
        .oneshot(request("GET", "/api/v1/items", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_cookie_returns_401() {
    let resp = server()
        .oneshot(request("GET", "/api/v1/user", "forged"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn write_routes_without_cookie_return_401() {
    let app = server();
    let task = create(&app, TOKEN, "keep me").await;
    let uri = format!("/api/v1/items/{}", task.id);

    let no_cookie = |method: &str, uri: &str, body: &str| {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .unwrap()
    };

    let resp = app
        .clone()
        .oneshot(no_cookie("POST", "/api/v1/items", r#"{"Text":"x","Date":"2021-6-15"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app
        .clone()
        .oneshot(no_cookie("PUT", &uri, r#"{"Done":true}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app.clone().oneshot(no_cookie("DELETE", &uri, "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Nothing was created, changed or removed.
    let resp = app.oneshot(request("GET", "/api/v1/items", TOKEN)).await.unwrap();
    let tasks: Vec<Task> = body_json(resp).await;
    assert_eq!(tasks, vec![task]);
}

// --- user ---

#[tokio::test]
async fn current_user_is_bound_to_session() {
    let resp = server()
        .oneshot(request("GET", "/api/v1/user", TOKEN))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let user: serde_json::Value = body_json(resp).await;
    assert_eq!(user["UserName"], "alice");
    assert_eq!(user["Email"], "alice@example.com");
    assert!(user["Id"].is_string());
}

// --- create ---

#[tokio::test]
async fn create_task_defaults_done_to_false() {
    let app = server();
    let task = create(&app, TOKEN, "ab12cd34ef").await;

    assert_eq!(task.text, "ab12cd34ef");
    assert_eq!(task.date, "2021-6-15");
    assert!(!task.done);
    assert_eq!(task.id.len(), 24);
}

#[tokio::test]
async fn create_task_with_empty_text_returns_500() {
    let resp = server()
        .oneshot(json_request(
            "POST",
            "/api/v1/items",
            TOKEN,
            r#"{"Text":"","Date":"2021-6-15"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// --- read / update / delete by id ---

#[tokio::test]
async fn unknown_id_returns_404() {
    let app = server();
    let uri = format!("/api/v1/items/{UNKNOWN_ID}");

    let resp = app.clone().oneshot(request("GET", &uri, TOKEN)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .clone()
        .oneshot(json_request("PUT", &uri, TOKEN, r#"{"Done":true}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app.oneshot(request("DELETE", &uri, TOKEN)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_id_returns_500() {
    let app = server();

    let resp = app
        .clone()
        .oneshot(request("DELETE", "/api/v1/items/0123456789ab", TOKEN))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v1/items/0123456789ab",
            TOKEN,
            r#"{"Done":true}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error: ErrorBody = body_json(resp).await;
    assert!(error.message.contains("0123456789ab"));

    let resp = app
        .oneshot(request("GET", "/api/v1/items/not-an-id", TOKEN))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// --- ownership ---

#[tokio::test]
async fn tasks_are_scoped_to_their_owner() {
    let app = server();
    let mine = create(&app, TOKEN, "mine").await;
    let theirs = create(&app, OTHER_TOKEN, "theirs").await;
    assert_ne!(mine.user_id, theirs.user_id);

    let resp = app
        .clone()
        .oneshot(request("GET", "/api/v1/items", TOKEN))
        .await
        .unwrap();
    let tasks: Vec<Task> = body_json(resp).await;
    assert_eq!(tasks, vec![mine.clone()]);

    // Someone else's task looks like it does not exist.
    let uri = format!("/api/v1/items/{}", theirs.id);
    let resp = app.clone().oneshot(request("GET", &uri, TOKEN)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = app.oneshot(request("DELETE", &uri, TOKEN)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    let app = server();

    let created = create(&app, TOKEN, "walk dog").await;
    let uri = format!("/api/v1/items/{}", created.id);

    // get
    let resp = app.clone().oneshot(request("GET", &uri, TOKEN)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Task = body_json(resp).await;
    assert_eq!(fetched, created);

    // update
    let resp = app
        .clone()
        .oneshot(json_request("PUT", &uri, TOKEN, r#"{"Done":true}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Task = body_json(resp).await;
    assert!(updated.done);
    assert_eq!(updated.text, "walk dog");

    // delete
    let resp = app.clone().oneshot(request("DELETE", &uri, TOKEN)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // get after delete
    let resp = app.clone().oneshot(request("GET", &uri, TOKEN)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete
    let resp = app.oneshot(request("GET", "/api/v1/items", TOKEN)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let tasks: Vec<Task> = body_json(resp).await;
    assert!(tasks.is_empty());
}
