//! `/quiz-questions` route group: CRUD over the `quiz_questions` collection.

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
use serde_json::Value;
use std::collections::HashMap;
use util::state::AppState;

pub static POLICY: ResourcePolicy = ResourcePolicy {
    collection: "quiz_questions",
    id_prefix: Some("QUESTION"),
    required: &["quizId", "question", "options", "correctAnswer"],
    references: &[Reference {
        field: "quizId",
        collection: "quizzes",
    }],
    filters: &[Filter {
        param: "quizId",
        attribute: "quizId",
    }],
    order: ListOrder::Asc("order"),
    defaults: None,
};

pub fn quiz_questions_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_questions).post(create_question))
        .route(
            "/{id}",
            get(get_question)
                .put(update_question)
                .delete(delete_question),
        )
}

/// GET /quiz-questions — ordered by `order`; supports `?quizId=`.
async fn list_questions(
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<HashMap<String, String>>,
) -> ApiResult<Json<ApiResponse<Vec<Value>>>> {
    let list = crud::list(&state, &POLICY, &params).await?;
    Ok(Json(ApiResponse::list(list.documents, list.total)))
}

/// GET /quiz-questions/{id}
async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let question = crud::get(&state, &POLICY, &id).await?;
    Ok(Json(ApiResponse::data(question)))
}

/// POST /quiz-questions
///
/// Requires `quizId`, `question`, `options`, and `correctAnswer`; `quizId`
/// must name an existing quiz.
async fn create_question(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ApiResponse<Value>>)> {
    let fields = crud::parse_body(&body)?;
    let question = crud::create(&state, &POLICY, fields).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(question))))
}

/// PUT /quiz-questions/{id} — re-validates `quizId` when present.
async fn update_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let fields = crud::parse_body(&body)?;
    let question = crud::update(&state, &POLICY, &id, fields).await?;
    Ok(Json(ApiResponse::data(question)))
}

/// DELETE /quiz-questions/{id}
async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    crud::delete(&state, &POLICY, &id).await?;
    Ok(Json(ApiResponse::message("Question deleted")))
}
