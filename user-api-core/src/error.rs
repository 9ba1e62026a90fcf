use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Body of every 404 for an id that matches no record.
pub const USER_NOT_FOUND: &str = "User not found";

/// Body of the 404 returned for unmatched routes.
pub const ROUTE_NOT_FOUND: &str = "Not Found";

/// Helper to create a JSON error response with a `{ "message": message }` body.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "message": message.into() });
    (status, Json(body)).into_response()
}

/// Failure of an id-addressed registry operation.
#[derive(Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No record carries the requested id. Holds the id as it was requested.
    NotFound(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::NotFound(id) => write!(f, "User not found: {id}"),
        }
    }
}

impl std::fmt::Debug for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::error::Error for RegistryError {}

pub enum HttpError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
    Custom {
        status: StatusCode,
        body: serde_json::Value,
    },
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::Custom { status, body } => return (status, Json(body)).into_response(),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        error_response(status, message)
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            HttpError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            HttpError::Internal(msg) => write!(f, "Internal Error: {msg}"),
            HttpError::Custom { status, body } => write!(f, "Custom Error ({status}): {body}"),
        }
    }
}

impl std::fmt::Debug for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl From<RegistryError> for HttpError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => {
                tracing::debug!(user_id = %id, "user lookup missed");
                HttpError::NotFound(USER_NOT_FOUND.into())
            }
        }
    }
}
