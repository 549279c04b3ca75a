//! `/badges` route group: the badge catalog.

use super::crud;
use super::policy::{ListOrder, ResourcePolicy};
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
use util::state::AppState;

pub static POLICY: ResourcePolicy = ResourcePolicy {
    collection: "badges",
    id_prefix: Some("BADGE"),
    required: &["name", "description", "category", "icon"],
    references: &[],
    filters: &[],
    order: ListOrder::Asc("name"),
    defaults: None,
};

pub fn badges_routes() -> Router<AppState> {
    Router::new().route("/", get(list_badges).post(create_badge))
}

/// GET /badges — the catalog, sorted by name.
async fn list_badges(
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<HashMap<String, String>>,
) -> ApiResult<Json<ApiResponse<Vec<Value>>>> {
    let list = crud::list(&state, &POLICY, &params).await?;
    Ok(Json(ApiResponse::list(list.documents, list.total)))
}

/// POST /badges — requires `name`, `description`, `category`, and `icon`.
async fn create_badge(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ApiResponse<Value>>)> {
    let fields = crud::parse_body(&body)?;
    let badge = crud::create(&state, &POLICY, fields).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(badge))))
}
