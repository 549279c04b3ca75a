//! `/transactions` route group: ledger entries for purchases and payouts.

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
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use util::state::AppState;

pub static POLICY: ResourcePolicy = ResourcePolicy {
    collection: "transactions",
    id_prefix: Some("TRANSACTION"),
    required: &["userId", "type", "amount", "description"],
    // courseId is optional but must resolve when supplied.
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
        param: "userId",
        attribute: "userId",
    }],
    order: ListOrder::CreatedDesc,
    defaults: Some(transaction_defaults),
};

fn transaction_defaults(fields: &mut Map<String, Value>) {
    fields.insert("status".into(), json!("completed"));
}

pub fn transactions_routes() -> Router<AppState> {
    Router::new().route("/", get(list_transactions).post(create_transaction))
}

/// GET /transactions — newest first; supports `?userId=`.
async fn list_transactions(
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<HashMap<String, String>>,
) -> ApiResult<Json<ApiResponse<Vec<Value>>>> {
    let list = crud::list(&state, &POLICY, &params).await?;
    Ok(Json(ApiResponse::list(list.documents, list.total)))
}

/// POST /transactions
///
/// Requires `userId`, `type`, `amount`, and `description`. Entries are
/// stored with `status: "completed"`.
async fn create_transaction(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ApiResponse<Value>>)> {
    let fields = crud::parse_body(&body)?;
    let transaction = crud::create(&state, &POLICY, fields).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(transaction))))
}
