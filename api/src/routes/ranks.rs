//! `/ranks` route group: per-course leaderboard entries.

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
    collection: "ranks",
    id_prefix: Some("RANK"),
    required: &["userId", "courseId", "score", "rank"],
    references: &[
        Reference {
            field: "userId",
            collection: "users",
        },
        Reference {
            field: "courseId",
            collection: "courses",
        },
    ],
    filters: &[Filter {
        param: "courseId",
        attribute: "courseId",
    }],
    order: ListOrder::Asc("rank"),
    defaults: Some(rank_defaults),
};

fn rank_defaults(fields: &mut Map<String, Value>) {
    fields.insert(
        "achievedAt".into(),
        json!(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
}

pub fn ranks_routes() -> Router<AppState> {
    Router::new().route("/", get(list_ranks).post(create_rank))
}

/// GET /ranks — ascending by `rank`; supports `?courseId=`.
async fn list_ranks(
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<HashMap<String, String>>,
) -> ApiResult<Json<ApiResponse<Vec<Value>>>> {
    let list = crud::list(&state, &POLICY, &params).await?;
    Ok(Json(ApiResponse::list(list.documents, list.total)))
}

/// POST /ranks
///
/// Requires `userId`, `courseId`, `score`, and `rank`; both references must
/// resolve. Stamped with `achievedAt`.
async fn create_rank(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ApiResponse<Value>>)> {
    let fields = crud::parse_body(&body)?;
    let rank = crud::create(&state, &POLICY, fields).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(rank))))
}
