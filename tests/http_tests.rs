// tests/http_tests.rs

//! Router-level checks that never reach the database.
//!
//! The pool is created lazily against an address nothing listens on, so any
//! request that got as far as a query would fail with a 500.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use trivia_backend::{config::Config, routes, state::AppState};

fn app() -> Router {
    let database_url = "postgres://postgres@127.0.0.1:1/unused".to_string();
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy(&database_url)
        .expect("lazy pool");

    let config = Config {
        database_url,
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        db_max_connections: 1,
        cors_origins: None,
        log_dir: "logs".to_string(),
    };

    routes::create_router(AppState { pool, config })
}

async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

#[tokio::test]
async fn root_returns_welcome_message() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Trivia API");
}

#[tokio::test]
async fn unknown_path_is_404() {
    let request = Request::builder()
        .uri("/random_path_that_does_not_exist")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_user_patch_is_rejected_before_any_query() {
    let (status, body) = send(json_request("PATCH", "/users/1", serde_json::json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn all_null_quiz_patch_counts_as_empty() {
    let (status, _) = send(json_request(
        "PATCH",
        "/quizzes/1",
        serde_json::json!({ "name": null, "media_id": null }),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_user_with_invalid_email_is_400() {
    let (status, body) = send(json_request(
        "POST",
        "/users/",
        serde_json::json!({
            "username": "ada",
            "email": "not-an-email",
            "password_hash": "x"
        }),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().to_lowercase().contains("email"));
}

#[tokio::test]
async fn create_quiz_with_empty_name_is_400() {
    let (status, _) = send(json_request(
        "POST",
        "/quizzes/",
        serde_json::json!({ "name": "" }),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn join_with_empty_nickname_is_400() {
    let (status, _) = send(json_request(
        "POST",
        "/sessions/join",
        serde_json::json!({ "session_id": 1, "nickname": "" }),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let request = Request::builder()
        .uri("/users/abc")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cors_preflight_allows_any_origin_by_default() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/users/")
        .header(header::ORIGIN, "http://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn access_codes_that_shadow_session_routes_are_rejected() {
    for code in ["join", "submit-answer"] {
        let (status, body) = send(json_request(
            "POST",
            "/sessions/",
            serde_json::json!({ "quiz_id": 1, "host_id": 1, "access_code": code }),
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{code}");
        assert!(body["error"].as_str().unwrap().contains("access_code"));
    }
}

#[tokio::test]
async fn access_code_with_a_slash_is_rejected() {
    let (status, _) = send(json_request(
        "POST",
        "/sessions/",
        serde_json::json!({ "quiz_id": 1, "host_id": 1, "access_code": "a/b" }),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_body_field_answers_with_error_json() {
    let (status, body) = send(json_request(
        "POST",
        "/users/",
        serde_json::json!({ "username": "ada", "password_hash": "x" }),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn malformed_json_answers_with_error_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/quizzes/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn body_without_content_type_answers_with_error_json() {
    let request = Request::builder()
        .method("PUT")
        .uri("/participants/1/score")
        .body(Body::from("{\"score\": 3}"))
        .unwrap();

    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
