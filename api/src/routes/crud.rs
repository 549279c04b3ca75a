//! Policy-driven CRUD operations shared by every resource route group.
//!
//! Handlers stay thin: they pick their [`ResourcePolicy`], call one of these
//! functions, and wrap the result in the response envelope. Bespoke behaviors
//! (child inlining, upserts, counters) compose these with direct store calls.

use super::policy::{ListOrder, Reference, ResourcePolicy};
use crate::error::{ApiError, ApiResult};
use serde_json::{Map, Value};
use std::collections::HashMap;
use store::{DocumentList, Query};
use util::state::AppState;

/// Parses a raw request body into a field map.
///
/// An absent body is treated as an empty document, matching the store's
/// schemaless writes; anything that is not a JSON object is rejected.
pub fn parse_body(bytes: &[u8]) -> ApiResult<Map<String, Value>> {
    if bytes.is_empty() {
        return Ok(Map::new());
    }
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| ApiError::InvalidBody(e.to_string()))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::InvalidBody(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

/// Extracts the store-assigned id from a document.
pub fn document_id(document: &Value) -> ApiResult<String> {
    document
        .get("$id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            ApiError::Upstream(store::StoreError::Unexpected {
                status: 500,
                message: "store returned a document without an $id".into(),
            })
        })
}

/// A field counts as missing when it is absent, null, or an empty string.
/// Zero and `false` are present values.
fn is_missing(fields: &Map<String, Value>, field: &str) -> bool {
    match fields.get(field) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Validates the policy's required fields, naming every missing one at once.
pub fn check_required(policy: &ResourcePolicy, fields: &Map<String, Value>) -> ApiResult<()> {
    let missing: Vec<String> = policy
        .required
        .iter()
        .filter(|field| is_missing(fields, field))
        .map(|field| field.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::MissingFields(missing))
    }
}

/// Validates every reference attribute present in the field map with a point
/// lookup. Checks run sequentially; the first failure aborts. Absent or empty
/// references are skipped (optional references stay optional).
pub async fn check_references(
    state: &AppState,
    references: &[Reference],
    fields: &Map<String, Value>,
) -> ApiResult<()> {
    for reference in references {
        let Some(id) = fields
            .get(reference.field)
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
        else {
            continue;
        };
        match state.store().get(reference.collection, id).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                return Err(ApiError::InvalidReference {
                    field: reference.field.to_string(),
                    id: id.to_string(),
                    collection: reference.collection.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Lists documents, applying the policy's query-string filters and ordering.
pub async fn list(
    state: &AppState,
    policy: &ResourcePolicy,
    params: &HashMap<String, String>,
) -> ApiResult<DocumentList> {
    let mut queries: Vec<Query> = policy
        .filters
        .iter()
        .filter_map(|filter| {
            params
                .get(filter.param)
                .map(|value| Query::equal(filter.attribute, value.as_str()))
        })
        .collect();
    match policy.order {
        ListOrder::CreatedDesc => queries.push(Query::order_desc("$createdAt")),
        ListOrder::Asc(attribute) => queries.push(Query::order_asc(attribute)),
        ListOrder::Unordered => {}
    }
    Ok(state.store().list(policy.collection, &queries).await?)
}

/// Point lookup by id.
pub async fn get(state: &AppState, policy: &ResourcePolicy, id: &str) -> ApiResult<Value> {
    Ok(state.store().get(policy.collection, id).await?)
}

/// Validates required fields and references, applies the policy's derived
/// defaults, and creates the document with a generated id.
pub async fn create(
    state: &AppState,
    policy: &ResourcePolicy,
    mut fields: Map<String, Value>,
) -> ApiResult<Value> {
    check_required(policy, &fields)?;
    check_references(state, policy.references, &fields).await?;
    if let Some(defaults) = policy.defaults {
        defaults(&mut fields);
    }
    let id = policy.generate_id();
    Ok(state
        .store()
        .create(policy.collection, id.as_deref(), Value::Object(fields))
        .await?)
}

/// Re-validates any reference attributes present in the body, then applies
/// the update (the store merges the given attributes into the document).
pub async fn update(
    state: &AppState,
    policy: &ResourcePolicy,
    id: &str,
    fields: Map<String, Value>,
) -> ApiResult<Value> {
    check_references(state, policy.references, &fields).await?;
    Ok(state
        .store()
        .update(policy.collection, id, Value::Object(fields))
        .await?)
}

/// Deletes the document; absent ids surface as NotFound.
pub async fn delete(state: &AppState, policy: &ResourcePolicy, id: &str) -> ApiResult<()> {
    Ok(state.store().delete(policy.collection, id).await?)
}
