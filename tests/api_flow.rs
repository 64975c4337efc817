use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use time_tracker::{api::create_router, state::AppState};

fn test_router() -> Router {
    create_router(Arc::new(AppState::new(0, "127.0.0.1".to_string())))
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

#[tokio::test]
async fn add_then_status_reports_full_countdown() {
    let app = test_router();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/tasks",
            r#"{"name":"Write report","minutes":1,"seconds":30}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["tasks"][0]["seconds_left"], 90);

    let (status, body) = send(
        &app,
        Request::get("/status").body(Body::empty()).expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tasks"].as_array().expect("tasks").len(), 1);
    assert_eq!(body["run"]["is_stopped"], true);
    assert_eq!(body["last_action"], "add");
}

#[tokio::test]
async fn zero_duration_add_is_rejected_inline() {
    let app = test_router();

    let (status, body) = send(
        &app,
        json_request("POST", "/tasks", r#"{"name":"Nothing","minutes":0,"seconds":0}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error");
    assert!(body["tasks"].as_array().expect("tasks").is_empty());
}

#[tokio::test]
async fn blank_name_is_rejected_inline() {
    let app = test_router();

    let (status, body) = send(
        &app,
        json_request("POST", "/tasks", r#"{"name":"   ","seconds":10}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error");
    assert!(body["tasks"].as_array().expect("tasks").is_empty());
}

#[tokio::test]
async fn delete_of_missing_index_is_not_found() {
    let app = test_router();

    let (status, _) = send(
        &app,
        Request::delete("/tasks/3").body(Body::empty()).expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn toggle_over_empty_queue_stays_inactive() {
    let app = test_router();

    let (status, body) = send(
        &app,
        Request::post("/toggle").body(Body::empty()).expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["run"]["is_active"], false);
    assert_eq!(body["run"]["is_stopped"], true);
}

#[tokio::test]
async fn deleting_running_head_stops_the_run() {
    let app = test_router();

    send(
        &app,
        json_request("POST", "/tasks", r#"{"name":"A","seconds":5}"#),
    )
    .await;
    send(
        &app,
        json_request("POST", "/tasks", r#"{"name":"B","seconds":3}"#),
    )
    .await;

    let (_, body) = send(
        &app,
        Request::post("/toggle").body(Body::empty()).expect("request"),
    )
    .await;
    assert_eq!(body["run"]["is_active"], true);

    let (status, body) = send(
        &app,
        Request::delete("/tasks/0").body(Body::empty()).expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["run"]["is_active"], false);
    assert_eq!(body["run"]["is_stopped"], true);
    assert_eq!(body["tasks"][0]["name"], "B");
}

#[tokio::test]
async fn edit_replaces_task_and_resets_countdown() {
    let app = test_router();

    send(
        &app,
        json_request("POST", "/tasks", r#"{"name":"A","seconds":5}"#),
    )
    .await;

    let (status, body) = send(
        &app,
        json_request("PUT", "/tasks/0", r#"{"name":"A2","minutes":2,"seconds":10}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["tasks"][0]["name"], "A2");
    assert_eq!(body["tasks"][0]["seconds_left"], 130);
}
