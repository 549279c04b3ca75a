use crate::response::ApiResponse;
use axum::{Json, response::IntoResponse};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

/// GET / and GET /health
///
/// Returns a liveness payload with the current timestamp. Used by uptime
/// checks and deployment health probes.
///
/// ### Response
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": { "timestamp": "2025-01-01T00:00:00.000Z" },
///   "message": "EdTech API is running"
/// }
/// ```
pub async fn health_check() -> impl IntoResponse {
    Json(
        ApiResponse::data(json!({
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }))
        .with_message("EdTech API is running"),
    )
}
