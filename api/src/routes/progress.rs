//! `/progress` route group: query and upsert over the `user_progress`
//! collection.
//!
//! Progress is unique per (userId, courseId, lessonId): recording the same
//! triple twice updates the existing document instead of duplicating it.

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
use serde_json::Value;
use std::collections::HashMap;
use store::Query;
use util::state::AppState;

pub static POLICY: ResourcePolicy = ResourcePolicy {
    collection: "user_progress",
    id_prefix: Some("PROGRESS"),
    required: &["userId", "courseId", "lessonId"],
    references: &[
        Reference {
            field: "userId",
            collection: "users",
        },
        Reference {
            field: "courseId",
            collection: "courses",
        },
        Reference {
            field: "lessonId",
            collection: "lessons",
        },
    ],
    filters: &[
        Filter {
            param: "userId",
            attribute: "userId",
        },
        Filter {
            param: "courseId",
            attribute: "courseId",
        },
    ],
    order: ListOrder::Unordered,
    defaults: None,
};

pub fn progress_routes() -> Router<AppState> {
    Router::new().route("/", get(list_progress).post(record_progress))
}

/// GET /progress — supports `?userId=` and `?courseId=` filters.
async fn list_progress(
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<HashMap<String, String>>,
) -> ApiResult<Json<ApiResponse<Vec<Value>>>> {
    let list = crud::list(&state, &POLICY, &params).await?;
    Ok(Json(ApiResponse::list(list.documents, list.total)))
}

/// POST /progress
///
/// Upserts a progress record keyed by (userId, courseId, lessonId). All
/// three references must resolve.
///
/// ### Responses
/// - `200 OK` — an existing record for the triple was updated
/// - `201 Created` — no record existed, one was created
async fn record_progress(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ApiResponse<Value>>)> {
    let fields = crud::parse_body(&body)?;
    crud::check_required(&POLICY, &fields)?;
    crud::check_references(&state, POLICY.references, &fields).await?;

    let key = |field: &str| {
        fields
            .get(field)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let existing = state
        .store()
        .list(
            POLICY.collection,
            &[
                Query::equal("userId", key("userId")),
                Query::equal("courseId", key("courseId")),
                Query::equal("lessonId", key("lessonId")),
            ],
        )
        .await?;

    if let Some(current) = existing.documents.first() {
        let id = crud::document_id(current)?;
        let updated = state
            .store()
            .update(POLICY.collection, &id, Value::Object(fields))
            .await?;
        Ok((StatusCode::OK, Json(ApiResponse::data(updated))))
    } else {
        let id = POLICY.generate_id();
        let created = state
            .store()
            .create(POLICY.collection, id.as_deref(), Value::Object(fields))
            .await?;
        Ok((StatusCode::CREATED, Json(ApiResponse::data(created))))
    }
}
