//! `/lessons` route group: full CRUD over the `lessons` collection.

use super::crud;
use super::policy::{Filter, ListOrder, Reference, ResourcePolicy};
use crate::error::ApiResult;
use crate::response::ApiResponse;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query as UrlQuery, State},
    http::StatusCode,
    routing::get,
};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use util::state::AppState;

pub static POLICY: ResourcePolicy = ResourcePolicy {
    collection: "lessons",
    id_prefix: Some("LESSON"),
    required: &["courseId", "instructorId", "title", "content", "type"],
    references: &[
        Reference {
            field: "courseId",
            collection: "courses",
        },
        Reference {
            field: "instructorId",
            collection: "instructors",
        },
    ],
    filters: &[Filter {
        param: "courseId",
        attribute: "courseId",
    }],
    order: ListOrder::Asc("order"),
    defaults: Some(lesson_defaults),
};

fn lesson_defaults(fields: &mut Map<String, Value>) {
    fields.insert("completionCount".into(), json!(0));
}

pub fn lessons_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_lessons).post(create_lesson))
        .route(
            "/{id}",
            get(get_lesson).put(update_lesson).delete(delete_lesson),
        )
}

/// GET /lessons — ordered by `order`; supports `?courseId=`.
async fn list_lessons(
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<HashMap<String, String>>,
) -> ApiResult<Json<ApiResponse<Vec<Value>>>> {
    let list = crud::list(&state, &POLICY, &params).await?;
    Ok(Json(ApiResponse::list(list.documents, list.total)))
}

/// GET /lessons/{id}
async fn get_lesson(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let lesson = crud::get(&state, &POLICY, &id).await?;
    Ok(Json(ApiResponse::data(lesson)))
}

/// POST /lessons
///
/// Requires `courseId`, `instructorId`, `title`, `content`, and `type`; both
/// references must resolve. New lessons start with `completionCount: 0`.
async fn create_lesson(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ApiResponse<Value>>)> {
    let fields = crud::parse_body(&body)?;
    let lesson = crud::create(&state, &POLICY, fields).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(lesson))))
}

/// PUT /lessons/{id} — re-validates `courseId`/`instructorId` when present.
async fn update_lesson(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let fields = crud::parse_body(&body)?;
    let lesson = crud::update(&state, &POLICY, &id, fields).await?;
    Ok(Json(ApiResponse::data(lesson)))
}

/// DELETE /lessons/{id}
async fn delete_lesson(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    crud::delete(&state, &POLICY, &id).await?;
    Ok(Json(ApiResponse::message("Lesson deleted")))
}
