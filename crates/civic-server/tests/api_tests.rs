// Rust guideline compliant 2026-02-09

//! End-to-end tests of the REST routes.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use civic_app::IssueService;
use civic_core::IssueStore;
use civic_server::{router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> (Router, AppState) {
    let state = AppState::new(IssueService::new(IssueStore::in_memory()), 16);
    (router(state.clone()), state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, category: &str) -> u64 {
    let (status, body) = send(
        app,
        "POST",
        "/issues",
        Some(json!({
            "title": "Broken thing",
            "description": "Please fix",
            "category": category,
            "reporter_id": "c-1",
            "location": { "address": "1 Main St", "lat": 40.0, "lng": -70.0 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_u64().unwrap()
}

async fn transition(app: &Router, id: u64, status: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        &format!("/issues/{id}/transitions"),
        Some(json!({ "status": status, "user_id": "staff-1" })),
    )
    .await
}

#[tokio::test]
async fn test_health() {
    let (app, _) = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn test_create_and_show() {
    let (app, _) = app();
    let id = create(&app, "pothole").await;

    let (status, body) = send(&app, "GET", &format!("/issues/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "reported");
    assert_eq!(body["category_name"], "Pothole");
    assert_eq!(body["department_id"], "public-works");
    assert_eq!(body["updates"].as_array().unwrap().len(), 1);
    assert_eq!(body["updates"][0]["update_type"], "status_change");
}

#[tokio::test]
async fn test_create_validation_error() {
    let (app, _) = app();
    let (status, body) = send(
        &app,
        "POST",
        "/issues",
        Some(json!({ "title": " ", "description": "x", "category": "pothole" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation_error");

    let (status, body) = send(&app, "POST", "/issues", Some(json!({ "title": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_input");
}

#[tokio::test]
async fn test_unknown_and_unparseable_ids_are_404() {
    let (app, _) = app();
    for uri in ["/issues/99", "/issues/abc", "/issues/abc/updates"] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["code"], "not_found");
    }
}

#[tokio::test]
async fn test_transition_flow_and_conflict() {
    let (app, _) = app();
    let id = create(&app, "water-main").await;

    let (status, body) = transition(&app, id, "resolved").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "invalid_transition");
    assert_eq!(body["details"]["allowed"], json!(["acknowledged", "rejected"]));

    for next in ["acknowledged", "in_progress", "resolved"] {
        let (status, body) = transition(&app, id, next).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["status"], next);
    }

    let (status, body) = send(&app, "GET", &format!("/issues/{id}/updates"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 4);

    let (status, body) = transition(&app, id, "open").await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
}

#[tokio::test]
async fn test_comments_respect_visibility() {
    let (app, _) = app();
    let id = create(&app, "graffiti").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/issues/{id}/comments"),
        Some(json!({ "user_id": "staff-1", "message": "internal", "is_public": false })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["update_type"], "comment");

    let (_, all) = send(&app, "GET", &format!("/issues/{id}/updates"), None).await;
    let (_, public) = send(
        &app,
        "GET",
        &format!("/issues/{id}/updates?public_only=true"),
        None,
    )
    .await;
    assert_eq!(all.as_array().unwrap().len(), 2);
    assert_eq!(public.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_patch_routes_status_through_lifecycle() {
    let (app, _) = app();
    let id = create(&app, "streetlight").await;

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/issues/{id}"),
        Some(json!({ "user_id": "admin", "title": "New", "status": "closed" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "invalid_transition");

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/issues/{id}"),
        Some(json!({ "user_id": "admin", "title": "New", "status": "acknowledged" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "New");
    assert_eq!(body["status"], "acknowledged");
}

#[tokio::test]
async fn test_assignment_and_feedback() {
    let (app, _) = app();
    let id = create(&app, "trash").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/issues/{id}/assignment"),
        Some(json!({ "user_id": "admin", "assigned_to": "crew-9", "department_id": "parks" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["department_name"], "Parks & Recreation");

    let feedback = json!({ "user_id": "c-1", "rating": 5 });
    let (status, body) = send(
        &app,
        "POST",
        &format!("/issues/{id}/feedback"),
        Some(feedback.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "invalid_transition");

    for next in ["acknowledged", "in_progress", "resolved"] {
        transition(&app, id, next).await;
    }
    let (status, body) = send(
        &app,
        "POST",
        &format!("/issues/{id}/feedback"),
        Some(feedback),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["citizen_rating"], 5);
}

#[tokio::test]
async fn test_list_filters() {
    let (app, _) = app();
    create(&app, "pothole").await;
    create(&app, "playground").await;
    create(&app, "graffiti").await;

    let (status, body) = send(&app, "GET", "/issues?status=all&department=all", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);

    let (_, body) = send(&app, "GET", "/issues?department=public-works&limit=1", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], 1);

    let (status, body) = send(&app, "GET", "/issues?status=bogus", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_input");

    let (status, _) = send(&app, "GET", "/issues?limit=many", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reference_data_and_stats() {
    let (app, _) = app();
    create(&app, "pothole").await;

    let (status, body) = send(&app, "GET", "/departments", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 6);

    let (_, body) = send(&app, "GET", "/categories", None).await;
    assert_eq!(body.as_array().unwrap().len(), 10);

    let (status, body) = send(&app, "GET", "/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_issues"], 1);
    assert_eq!(body["by_status"]["reported"], 1);
}

#[tokio::test]
async fn test_events_published_for_commits_only() {
    let (app, state) = app();
    let mut receiver = state.events.subscribe();

    let id = create(&app, "sewer").await;
    transition(&app, id, "closed").await;
    transition(&app, id, "acknowledged").await;

    let first = receiver.recv().await.unwrap();
    assert_eq!(first.issue_id, id);
    assert_eq!(first.kind.as_str(), "created");
    let second = receiver.recv().await.unwrap();
    assert_eq!(second.kind.as_str(), "status_changed");
    assert!(receiver.try_recv().is_err(), "Rejected transition must not publish");
}

#[tokio::test]
async fn test_event_stream_endpoints() {
    let (app, _) = app();
    let id = create(&app, "sewer").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/issues/{id}/events"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/event-stream"
    );

    let (status, _) = send(&app, "GET", "/issues/404/events", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
