use crate::response::ApiResponse;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::Value;

/// POST /upload
///
/// File uploads are not implemented; storage integration is still pending.
/// Always answers `501 Not Implemented`.
pub async fn upload_stub() -> impl IntoResponse {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(ApiResponse::<Value>::error(
            "File upload endpoint not implemented yet",
        )),
    )
}
