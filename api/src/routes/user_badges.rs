//! `/user-badges` route group: badge-award records.

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
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use util::state::AppState;

pub static POLICY: ResourcePolicy = ResourcePolicy {
    collection: "user_badges",
    id_prefix: Some("USERBADGE"),
    required: &["userId", "badgeId"],
    references: &[
        Reference {
            field: "userId",
            collection: "users",
        },
        Reference {
            field: "badgeId",
            collection: "badges",
        },
    ],
    filters: &[Filter {
        param: "userId",
        attribute: "userId",
    }],
    order: ListOrder::CreatedDesc,
    defaults: Some(user_badge_defaults),
};

fn user_badge_defaults(fields: &mut Map<String, Value>) {
    fields.insert(
        "earnedAt".into(),
        json!(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
}

pub fn user_badges_routes() -> Router<AppState> {
    Router::new().route("/", get(list_user_badges).post(award_badge))
}

/// GET /user-badges — newest first; supports `?userId=`.
async fn list_user_badges(
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<HashMap<String, String>>,
) -> ApiResult<Json<ApiResponse<Vec<Value>>>> {
    let list = crud::list(&state, &POLICY, &params).await?;
    Ok(Json(ApiResponse::list(list.documents, list.total)))
}

/// POST /user-badges
///
/// Awards a badge to a user; both references must resolve. Stamped with
/// `earnedAt`.
async fn award_badge(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ApiResponse<Value>>)> {
    let fields = crud::parse_body(&body)?;
    let award = crud::create(&state, &POLICY, fields).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(award))))
}
