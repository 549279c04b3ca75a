//! `/courses` route group: full CRUD over the `courses` collection.
//!
//! A point lookup additionally fetches the course's lessons (ordered by
//! `order`) and inlines them on the response object. New courses start
//! unpublished with an enrollment count of zero.

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
use store::Query;
use util::state::AppState;

pub static POLICY: ResourcePolicy = ResourcePolicy {
    collection: "courses",
    id_prefix: Some("COURSE"),
    required: &["title", "description", "instructorId", "category", "price"],
    references: &[Reference {
        field: "instructorId",
        collection: "instructors",
    }],
    filters: &[
        Filter {
            param: "category",
            attribute: "category",
        },
        Filter {
            param: "instructor",
            attribute: "instructorId",
        },
    ],
    order: ListOrder::CreatedDesc,
    defaults: Some(course_defaults),
};

fn course_defaults(fields: &mut Map<String, Value>) {
    fields.insert("enrollmentCount".into(), json!(0));
    fields.insert("isPublished".into(), json!(false));
}

pub fn courses_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route(
            "/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
}

/// GET /courses
///
/// Lists courses newest-first. Supports `?category=` and `?instructor=`
/// equality filters (the latter matches `instructorId`).
async fn list_courses(
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<HashMap<String, String>>,
) -> ApiResult<Json<ApiResponse<Vec<Value>>>> {
    let list = crud::list(&state, &POLICY, &params).await?;
    Ok(Json(ApiResponse::list(list.documents, list.total)))
}

/// GET /courses/{id}
///
/// Returns the course with its lessons inlined as a `lessons` array, sorted
/// ascending by `order`.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": { "$id": "COURSE_...", "title": "...", "lessons": [ ... ] }
/// }
/// ```
/// - `404 Not Found` — unknown course id
async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let mut course = crud::get(&state, &POLICY, &id).await?;
    let lessons = state
        .store()
        .list(
            "lessons",
            &[
                Query::equal("courseId", id.as_str()),
                Query::order_asc("order"),
            ],
        )
        .await?;
    course["lessons"] = Value::Array(lessons.documents);
    Ok(Json(ApiResponse::data(course)))
}

/// POST /courses
///
/// Requires `title`, `description`, `instructorId`, `category`, and `price`;
/// `instructorId` must name an existing instructor. The stored document
/// starts with `enrollmentCount: 0` and `isPublished: false`.
async fn create_course(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ApiResponse<Value>>)> {
    let fields = crud::parse_body(&body)?;
    let course = crud::create(&state, &POLICY, fields).await?;
    state.notifier().log_info(
        "Course created",
        json!({ "courseId": course["$id"], "title": course["title"] }),
    );
    Ok((StatusCode::CREATED, Json(ApiResponse::data(course))))
}

/// PUT /courses/{id}
///
/// Re-validates `instructorId` when present in the body, then merges the
/// body's attributes into the document.
async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let fields = crud::parse_body(&body)?;
    let course = crud::update(&state, &POLICY, &id, fields).await?;
    state
        .notifier()
        .log_info("Course updated", json!({ "courseId": id }));
    Ok(Json(ApiResponse::data(course)))
}

/// DELETE /courses/{id}
///
/// Removes the course only; its lessons are not cascaded.
async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    crud::delete(&state, &POLICY, &id).await?;
    state
        .notifier()
        .log_info("Course deleted", json!({ "courseId": id }));
    Ok(Json(ApiResponse::message("Course deleted")))
}
