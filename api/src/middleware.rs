//! Request observability middleware.

use crate::error::ErrorReport;
use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    middleware::Next,
    response::Response,
};
use serde_json::json;
use tracing::info;
use util::state::AppState;

/// Logs method and path for each incoming request and mirrors it to the
/// notification sink; after the handler runs, forwards any [`ErrorReport`]
/// left in the response extensions. CORS preflight `OPTIONS` requests are
/// skipped entirely so preflights stay side-effect free.
pub async fn log_request(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if req.method() == Method::OPTIONS {
        return next.run(req).await;
    }

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let user_agent = header_value(&req, "user-agent");
    let ip = header_value(&req, "x-forwarded-for").or_else(|| header_value(&req, "x-real-ip"));

    info!(%method, %path, "incoming request");
    state.notifier().log_info(
        &format!("API Request: {method} {path}"),
        json!({
            "userAgent": user_agent.unwrap_or_else(|| "unknown".into()),
            "ip": ip.unwrap_or_else(|| "unknown".into()),
        }),
    );

    let response = next.run(req).await;

    if let Some(report) = response.extensions().get::<ErrorReport>() {
        state.notifier().log_error(
            "EdTech API Error",
            json!({
                "method": method.to_string(),
                "path": path,
                "status": report.status.as_u16(),
                "error": report.message,
                "detail": report.detail,
            }),
        );
    }

    response
}

fn header_value(req: &Request<Body>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
