//! `/quizzes` route group: full CRUD over the `quizzes` collection.
//!
//! A point lookup inlines the quiz's questions ordered by `order`. New
//! quizzes start with `attemptCount: 0`; the count is bumped by
//! [`super::quiz_attempts`] whenever an attempt is recorded.

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
    collection: "quizzes",
    id_prefix: Some("QUIZ"),
    required: &["courseId", "title", "description", "timeLimit", "passingScore"],
    references: &[Reference {
        field: "courseId",
        collection: "courses",
    }],
    filters: &[Filter {
        param: "courseId",
        attribute: "courseId",
    }],
    order: ListOrder::CreatedDesc,
    defaults: Some(quiz_defaults),
};

fn quiz_defaults(fields: &mut Map<String, Value>) {
    fields.insert("attemptCount".into(), json!(0));
}

pub fn quizzes_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_quizzes).post(create_quiz))
        .route("/{id}", get(get_quiz).put(update_quiz).delete(delete_quiz))
}

/// GET /quizzes — newest first; supports `?courseId=`.
async fn list_quizzes(
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<HashMap<String, String>>,
) -> ApiResult<Json<ApiResponse<Vec<Value>>>> {
    let list = crud::list(&state, &POLICY, &params).await?;
    Ok(Json(ApiResponse::list(list.documents, list.total)))
}

/// GET /quizzes/{id}
///
/// Returns the quiz with its questions inlined as a `questions` array,
/// sorted ascending by `order`. 404 when the quiz is absent.
async fn get_quiz(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let mut quiz = crud::get(&state, &POLICY, &id).await?;
    let questions = state
        .store()
        .list(
            "quiz_questions",
            &[
                Query::equal("quizId", id.as_str()),
                Query::order_asc("order"),
            ],
        )
        .await?;
    quiz["questions"] = Value::Array(questions.documents);
    Ok(Json(ApiResponse::data(quiz)))
}

/// POST /quizzes
///
/// Requires `courseId`, `title`, `description`, `timeLimit`, and
/// `passingScore`; `courseId` must name an existing course.
async fn create_quiz(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ApiResponse<Value>>)> {
    let fields = crud::parse_body(&body)?;
    let quiz = crud::create(&state, &POLICY, fields).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(quiz))))
}

/// PUT /quizzes/{id} — re-validates `courseId` when present.
async fn update_quiz(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let fields = crud::parse_body(&body)?;
    let quiz = crud::update(&state, &POLICY, &id, fields).await?;
    Ok(Json(ApiResponse::data(quiz)))
}

/// DELETE /quizzes/{id} — questions are not cascaded.
async fn delete_quiz(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    crud::delete(&state, &POLICY, &id).await?;
    Ok(Json(ApiResponse::message("Quiz deleted")))
}
