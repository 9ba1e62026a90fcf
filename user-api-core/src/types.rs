//! Convenience type aliases for handler return types.

use axum::Json;

use crate::error::HttpError;

/// Any response type with [`HttpError`].
///
/// ```ignore
/// async fn remove(State(registry): State<UserRegistry>) -> ApiResult<StatusCode> {
///     Ok(StatusCode::OK)
/// }
/// ```
pub type ApiResult<T> = Result<T, HttpError>;

/// The most common handler return type: `Result<Json<T>, HttpError>`.
pub type JsonResult<T> = Result<Json<T>, HttpError>;
