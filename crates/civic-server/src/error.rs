// Rust guideline compliant 2026-02-09

//! HTTP error responses.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use civic_app::{AppError, ErrorCode, ErrorEnvelope};

/// An application error on its way to the client.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// HTTP status for the error code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self.0.code() {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError | ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorCode::InvalidTransition | ErrorCode::Conflict => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl<E> From<E> for ApiError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, code = ?self.0.code(), "Request failed");
        }
        (status, Json(ErrorEnvelope::from_error(&self.0))).into_response()
    }
}

/// Maps a rejected JSON body to an invalid-input error.
pub fn bad_body(rejection: JsonRejection) -> ApiError {
    ApiError(AppError::InvalidInput(rejection.body_text()))
}

/// Maps rejected query parameters to an invalid-input error.
pub fn bad_query(rejection: QueryRejection) -> ApiError {
    ApiError(AppError::InvalidInput(rejection.body_text()))
}
