use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use services::ServiceError;
use tracing::error;

/// Standardized envelope for every JSON response:
/// ```json
/// {
///   "code": 0,
///   "msg": "Some message",
///   "data": { ... }
/// }
/// ```
///
/// - `code` is `0` on success, otherwise the HTTP status code of the response.
/// - `msg` provides a human-readable context string.
/// - `data` carries the payload and is `null` on errors.
///
/// ## Example (error):
/// ```json
/// {
///   "code": 404,
///   "msg": "Class not found",
///   "data": null
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub code: u16,
    pub msg: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Constructs a success response with the given data and message.
    pub fn success(data: T, msg: impl Into<String>) -> Self {
        Self {
            code: 0,
            msg: msg.into(),
            data: Some(data),
        }
    }

    /// Constructs an error response carrying the HTTP status as its code.
    pub fn error(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            msg: msg.into(),
            data: None,
        }
    }
}

/// `200 OK` with the payload wrapped in the envelope.
pub fn ok<T: Serialize>(data: T, msg: &str) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data, msg))).into_response()
}

/// An error envelope with the given status.
pub fn fail(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<()>::error(status, msg))).into_response()
}

/// HTTP status for a service failure.
pub fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::InvalidInput(_)
        | ServiceError::Conflict(_)
        | ServiceError::InvalidTransition(_) => StatusCode::BAD_REQUEST,
        ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Database(_) | ServiceError::Scoring(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps a service failure onto the envelope. Server-side failures are logged with their
/// cause and answered with `fallback` so internals do not leak to clients.
pub fn service_error(err: ServiceError, fallback: &str) -> Response {
    let status = status_for(&err);
    if status.is_server_error() {
        error!(error = %err, "{fallback}");
        fail(status, fallback)
    } else {
        fail(status, err.to_string())
    }
}
