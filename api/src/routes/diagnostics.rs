use crate::response::ApiResponse;
use axum::{Json, extract::State, response::IntoResponse};
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use util::state::AppState;

/// GET /test-discord
///
/// Emits one test entry per severity (success, info, warning) through the
/// notification sink and reports whether the sink is enabled. Delivery is
/// fire-and-forget, so this endpoint always answers 200; delivery failures
/// only show up in the sink's own logs.
pub async fn test_discord(State(state): State<AppState>) -> impl IntoResponse {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let notifier = state.notifier();

    notifier.log_success(
        "Discord Test",
        json!({
            "message": "Discord webhook is working correctly!",
            "endpoint": "/test-discord",
            "timestamp": now,
            "status": "Active",
        }),
    );
    notifier.log_info(
        "API Test Information",
        json!({
            "testType": "Discord Integration",
            "result": "Success",
            "webhook": if notifier.enabled() { "Enabled" } else { "Disabled" },
        }),
    );
    notifier.log_warning(
        "Test Warning",
        json!({
            "message": "This is a test warning message",
            "level": "Warning",
        }),
    );

    Json(
        ApiResponse::data(json!({
            "webhookEnabled": notifier.enabled(),
            "timestamp": now,
        }))
        .with_message("Discord test messages sent"),
    )
}
