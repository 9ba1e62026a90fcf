//! HTTP routes over the [`UserRegistry`].

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::error::{HttpError, RegistryError, ROUTE_NOT_FOUND};
use crate::model::{User, UserFilter};
use crate::params::{parse_id, UserBody};
use crate::registry::UserRegistry;
use crate::state::AppState;
use crate::types::{ApiResult, JsonResult};

pub const WELCOME: &str = "Welcome to the User API!";
pub const USER_DELETED: &str = "User deleted successfully";

/// A `{ "message": ... }` response body.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

/// All routes, without fallbacks or state.
///
/// `/users/filter` is a static segment and wins over `/users/{id}`, so its
/// `PUT` and `DELETE` answer as an id lookup of `"filter"` would.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .route("/users", get(list).post(create))
        .route(
            "/users/filter",
            get(filter).put(update_filter_segment).delete(remove_filter_segment),
        )
        .route("/users/{id}", get(get_by_id).put(update).delete(remove))
}

async fn welcome() -> Json<Message> {
    Json(Message { message: WELCOME })
}

async fn list(State(registry): State<UserRegistry>) -> Json<Vec<User>> {
    Json(registry.list().await)
}

async fn filter(
    State(registry): State<UserRegistry>,
    query: Result<Query<UserFilter>, QueryRejection>,
) -> JsonResult<Vec<User>> {
    let Query(filter) = query.map_err(|e| HttpError::BadRequest(e.body_text()))?;
    Ok(Json(registry.filter(&filter).await))
}

async fn get_by_id(
    State(registry): State<UserRegistry>,
    Path(raw_id): Path<String>,
) -> JsonResult<User> {
    let id = lookup_id(&raw_id)?;
    Ok(Json(registry.get_by_id(id).await?))
}

async fn create(
    State(registry): State<UserRegistry>,
    UserBody(input): UserBody,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = registry.create(input).await;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update(
    State(registry): State<UserRegistry>,
    Path(raw_id): Path<String>,
    UserBody(input): UserBody,
) -> JsonResult<User> {
    let id = lookup_id(&raw_id)?;
    Ok(Json(registry.update(id, input).await?))
}

async fn remove(
    State(registry): State<UserRegistry>,
    Path(raw_id): Path<String>,
) -> JsonResult<Message> {
    let id = lookup_id(&raw_id)?;
    registry.delete(id).await?;
    Ok(Json(Message { message: USER_DELETED }))
}

async fn update_filter_segment(UserBody(_): UserBody) -> HttpError {
    RegistryError::NotFound("filter".into()).into()
}

async fn remove_filter_segment() -> HttpError {
    RegistryError::NotFound("filter".into()).into()
}

/// Unparseable ids can never match a record.
fn lookup_id(raw: &str) -> Result<u64, RegistryError> {
    parse_id(raw).ok_or_else(|| RegistryError::NotFound(raw.to_string()))
}

/// Catch-all for unknown paths and unsupported methods.
pub async fn not_found() -> HttpError {
    HttpError::NotFound(ROUTE_NOT_FOUND.into())
}
