//! `/notifications` route group: per-user notifications.
//!
//! PUT does not accept arbitrary updates; it marks the notification read and
//! stamps `readAt`, ignoring the request body.

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
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use util::state::AppState;

pub static POLICY: ResourcePolicy = ResourcePolicy {
    collection: "notifications",
    id_prefix: Some("NOTIFICATION"),
    required: &["userId", "title", "message", "type"],
    references: &[Reference {
        field: "userId",
        collection: "users",
    }],
    filters: &[Filter {
        param: "userId",
        attribute: "userId",
    }],
    order: ListOrder::CreatedDesc,
    defaults: Some(notification_defaults),
};

fn notification_defaults(fields: &mut Map<String, Value>) {
    fields.insert("isRead".into(), json!(false));
}

pub fn notifications_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications).post(create_notification))
        .route("/{id}", get(get_notification).put(mark_read))
}

/// GET /notifications — newest first; supports `?userId=`.
async fn list_notifications(
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<HashMap<String, String>>,
) -> ApiResult<Json<ApiResponse<Vec<Value>>>> {
    let list = crud::list(&state, &POLICY, &params).await?;
    Ok(Json(ApiResponse::list(list.documents, list.total)))
}

/// GET /notifications/{id}
async fn get_notification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let notification = crud::get(&state, &POLICY, &id).await?;
    Ok(Json(ApiResponse::data(notification)))
}

/// POST /notifications
///
/// Requires `userId`, `title`, `message`, and `type`; stored unread.
async fn create_notification(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ApiResponse<Value>>)> {
    let fields = crud::parse_body(&body)?;
    let notification = crud::create(&state, &POLICY, fields).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(notification))))
}

/// PUT /notifications/{id}
///
/// Marks the notification read and stamps `readAt`. The request body is
/// ignored.
async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let notification = state
        .store()
        .update(
            POLICY.collection,
            &id,
            json!({
                "isRead": true,
                "readAt": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            }),
        )
        .await?;
    Ok(Json(ApiResponse::data(notification)))
}
