//! `/instructors` route group: full CRUD over the `instructors` collection.

use super::crud;
use super::policy::{ListOrder, ResourcePolicy};
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
    collection: "instructors",
    id_prefix: Some("INSTRUCTOR"),
    required: &["instructorName"],
    references: &[],
    filters: &[],
    order: ListOrder::Asc("instructorName"),
    defaults: None,
};

pub fn instructors_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_instructors).post(create_instructor))
        .route(
            "/{id}",
            get(get_instructor)
                .put(update_instructor)
                .delete(delete_instructor),
        )
}

/// GET /instructors — lists instructors sorted by name.
async fn list_instructors(
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<HashMap<String, String>>,
) -> ApiResult<Json<ApiResponse<Vec<Value>>>> {
    let list = crud::list(&state, &POLICY, &params).await?;
    Ok(Json(ApiResponse::list(list.documents, list.total)))
}

/// GET /instructors/{id} — point lookup; 404 when absent.
async fn get_instructor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let instructor = crud::get(&state, &POLICY, &id).await?;
    Ok(Json(ApiResponse::data(instructor)))
}

/// POST /instructors — requires `instructorName`.
async fn create_instructor(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ApiResponse<Value>>)> {
    let fields = crud::parse_body(&body)?;
    let instructor = crud::create(&state, &POLICY, fields).await?;
    state.notifier().log_info(
        "Instructor created",
        json!({ "instructorId": instructor["$id"], "name": instructor["instructorName"] }),
    );
    Ok((StatusCode::CREATED, Json(ApiResponse::data(instructor))))
}

/// PUT /instructors/{id} — merges the body's attributes into the document.
async fn update_instructor(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let fields = crud::parse_body(&body)?;
    let instructor = crud::update(&state, &POLICY, &id, fields).await?;
    state
        .notifier()
        .log_info("Instructor updated", json!({ "instructorId": id }));
    Ok(Json(ApiResponse::data(instructor)))
}

/// DELETE /instructors/{id}
async fn delete_instructor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    crud::delete(&state, &POLICY, &id).await?;
    state
        .notifier()
        .log_info("Instructor deleted", json!({ "instructorId": id }));
    Ok(Json(ApiResponse::message("Instructor deleted")))
}
