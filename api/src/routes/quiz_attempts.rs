//! `/quiz-attempts` route group: recording and querying quiz attempts.

use super::crud;
use super::policy::{Filter, ListOrder, Reference, ResourcePolicy};
use crate::error::ApiResult;
use crate::response::ApiResponse;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query as UrlQuery, State},
    http::StatusCode,
    routing::get,
};
use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};
use std::collections::HashMap;
use util::state::AppState;

pub static POLICY: ResourcePolicy = ResourcePolicy {
    collection: "quiz_attempts",
    id_prefix: Some("ATTEMPT"),
    required: &["userId", "quizId", "answers", "score", "totalQuestions"],
    references: &[
        Reference {
            field: "userId",
            collection: "users",
        },
        Reference {
            field: "quizId",
            collection: "quizzes",
        },
    ],
    filters: &[
        Filter {
            param: "userId",
            attribute: "userId",
        },
        Filter {
            param: "quizId",
            attribute: "quizId",
        },
    ],
    order: ListOrder::CreatedDesc,
    defaults: None,
};

pub fn quiz_attempts_routes() -> Router<AppState> {
    Router::new().route("/", get(list_attempts).post(record_attempt))
}

/// GET /quiz-attempts — newest first; supports `?userId=` and `?quizId=`.
async fn list_attempts(
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<HashMap<String, String>>,
) -> ApiResult<Json<ApiResponse<Vec<Value>>>> {
    let list = crud::list(&state, &POLICY, &params).await?;
    Ok(Json(ApiResponse::list(list.documents, list.total)))
}

/// POST /quiz-attempts
///
/// Records an attempt and bumps the referenced quiz's `attemptCount`.
///
/// `passed` is derived from the *submitted* `score` and `passingScore`
/// values; a missing submitted `passingScore` yields `passed: false`. The
/// quiz's stored passing score is intentionally not consulted.
///
/// The attempt write and the count update are two separate store calls;
/// concurrent attempts against the same quiz can lose increments.
///
/// ### Responses
/// - `201 Created` with the stored attempt (including `passed` and
///   `attemptedAt`)
/// - `400 Bad Request` — missing fields or unresolvable references
async fn record_attempt(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ApiResponse<Value>>)> {
    let mut fields = crud::parse_body(&body)?;
    crud::check_required(&POLICY, &fields)?;
    crud::check_references(&state, POLICY.references, &fields).await?;

    let score = fields.get("score").and_then(Value::as_f64);
    let passing_score = fields.get("passingScore").and_then(Value::as_f64);
    let passed = matches!((score, passing_score), (Some(s), Some(p)) if s >= p);
    fields.insert("passed".into(), json!(passed));
    fields.insert(
        "attemptedAt".into(),
        json!(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    );

    let quiz_id = fields
        .get("quizId")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let id = POLICY.generate_id();
    let attempt = state
        .store()
        .create(POLICY.collection, id.as_deref(), Value::Object(fields))
        .await?;

    let quiz = state.store().get("quizzes", &quiz_id).await?;
    let attempt_count = quiz.get("attemptCount").and_then(Value::as_i64).unwrap_or(0);
    state
        .store()
        .update("quizzes", &quiz_id, json!({ "attemptCount": attempt_count + 1 }))
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::data(attempt))))
}
