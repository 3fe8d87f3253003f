// Rust guideline compliant 2026-02-09

//! REST routes.

use crate::error::{bad_body, bad_query, ApiError};
use crate::events::{sse_stream, EventHub};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use civic_app::{
    parse_issue_id, AssignRequest, CommentRequest, FeedbackRequest, IssueService, ListOptions,
    PatchRequest, StatusChangeRequest,
};
use civic_core::IssueDraft;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The issue service.
    pub service: Arc<IssueService>,
    /// Event fan-out wired into the service.
    pub events: EventHub,
}

impl AppState {
    /// Wires a service to a fresh event hub.
    #[must_use]
    pub fn new(service: IssueService, event_buffer: usize) -> Self {
        let events = EventHub::new(event_buffer);
        let service = service.with_events(Arc::new(events.clone()));
        Self {
            service: Arc::new(service),
            events,
        }
    }
}

/// Builds the router with CORS and request tracing.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/issues", get(list_issues).post(create_issue))
        .route("/issues/:id", get(show_issue).patch(patch_issue))
        .route("/issues/:id/transitions", post(transition_issue))
        .route("/issues/:id/updates", get(issue_updates))
        .route("/issues/:id/comments", post(add_comment))
        .route("/issues/:id/assignment", post(assign_issue))
        .route("/issues/:id/feedback", post(submit_feedback))
        .route("/issues/:id/events", get(issue_events))
        .route("/events", get(all_events))
        .route("/departments", get(departments))
        .route("/categories", get(categories))
        .route("/stats", get(stats))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    storage: &'static str,
}

#[derive(Debug, Default, Deserialize)]
struct VisibilityQuery {
    #[serde(default)]
    public_only: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.service.backend_kind(),
    })
}

async fn list_issues(
    State(state): State<AppState>,
    query: Result<Query<ListOptions>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(options) = query.map_err(bad_query)?;
    Ok(Json(state.service.list(&options)?))
}

async fn create_issue(
    State(state): State<AppState>,
    body: Result<Json<IssueDraft>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(draft) = body.map_err(bad_body)?;
    let view = state.service.create(draft)?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn show_issue(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<VisibilityQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_issue_id(&id)?;
    let Query(visibility) = query.map_err(bad_query)?;
    Ok(Json(state.service.get(id, visibility.public_only)?))
}

async fn patch_issue(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<PatchRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_issue_id(&id)?;
    let Json(request) = body.map_err(bad_body)?;
    Ok(Json(state.service.patch(id, request)?))
}

async fn transition_issue(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<StatusChangeRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_issue_id(&id)?;
    let Json(request) = body.map_err(bad_body)?;
    Ok(Json(state.service.transition(id, request)?))
}

async fn issue_updates(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<VisibilityQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_issue_id(&id)?;
    let Query(visibility) = query.map_err(bad_query)?;
    Ok(Json(state.service.updates(id, visibility.public_only)?))
}

async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<CommentRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_issue_id(&id)?;
    let Json(request) = body.map_err(bad_body)?;
    let update = state.service.add_comment(id, request)?;
    Ok((StatusCode::CREATED, Json(update)))
}

async fn assign_issue(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<AssignRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_issue_id(&id)?;
    let Json(request) = body.map_err(bad_body)?;
    Ok(Json(state.service.assign(id, request)?))
}

async fn submit_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<FeedbackRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_issue_id(&id)?;
    let Json(request) = body.map_err(bad_body)?;
    Ok(Json(state.service.submit_feedback(id, request)?))
}

async fn issue_events(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_issue_id(&id)?;
    // Subscribe before the existence check so no commit slips between them.
    let receiver = state.events.subscribe();
    state.service.get(id, true)?;
    Ok(sse_stream(receiver, Some(id)))
}

async fn all_events(State(state): State<AppState>) -> impl IntoResponse {
    sse_stream(state.events.subscribe(), None)
}

async fn departments(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.service.departments())
}

async fn categories(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.service.categories())
}

async fn stats(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.service.stats()?))
}
