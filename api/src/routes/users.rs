//! `/users` route group: full CRUD over the `users` collection.
//!
//! User documents keep store-minted ids (every other resource gets a
//! prefixed generated id). Create, update, and delete additionally emit an
//! informational sink entry.

use super::crud;
use super::policy::{Filter, ListOrder, ResourcePolicy};
use crate::error::ApiResult;
use crate::response::ApiResponse;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query as UrlQuery, State},
    http::StatusCode,
    routing::get,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use util::state::AppState;

pub static POLICY: ResourcePolicy = ResourcePolicy {
    collection: "users",
    id_prefix: None,
    required: &["name", "email", "password"],
    references: &[],
    filters: &[Filter {
        param: "email",
        attribute: "email",
    }],
    order: ListOrder::CreatedDesc,
    defaults: None,
};

pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}

/// GET /users
///
/// Lists users newest-first, optionally filtered by exact `email`.
async fn list_users(
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<HashMap<String, String>>,
) -> ApiResult<Json<ApiResponse<Vec<Value>>>> {
    let list = crud::list(&state, &POLICY, &params).await?;
    Ok(Json(ApiResponse::list(list.documents, list.total)))
}

/// GET /users/{id} — point lookup; 404 when absent.
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let user = crud::get(&state, &POLICY, &id).await?;
    Ok(Json(ApiResponse::data(user)))
}

/// POST /users
///
/// Requires `name`, `email`, and `password`; the store mints the id.
///
/// ### Responses
/// - `201 Created` with the stored document
/// - `400 Bad Request` naming the missing fields
async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ApiResponse<Value>>)> {
    let fields = crud::parse_body(&body)?;
    let user = crud::create(&state, &POLICY, fields).await?;
    state.notifier().log_info(
        "User created",
        json!({ "userId": user["$id"], "email": user["email"] }),
    );
    Ok((StatusCode::CREATED, Json(ApiResponse::data(user))))
}

/// PUT /users/{id} — merges the body's attributes into the document.
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let fields = crud::parse_body(&body)?;
    let user = crud::update(&state, &POLICY, &id, fields).await?;
    state
        .notifier()
        .log_info("User updated", json!({ "userId": id }));
    Ok(Json(ApiResponse::data(user)))
}

/// DELETE /users/{id} — 404 when absent; no cascading delete.
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    crud::delete(&state, &POLICY, &id).await?;
    state
        .notifier()
        .log_info("User deleted", json!({ "userId": id }));
    Ok(Json(ApiResponse::message("User deleted")))
}
