//! HTTP route entry point.
//!
//! Routes are organized as one module per resource, each owning its
//! [`policy::ResourcePolicy`] (required fields, references, filters,
//! ordering, derived defaults) and its route group. The generic handlers in
//! [`crud`] do the shared list/get/create/update/delete work.
//!
//! Route groups:
//! - `/` and `/health` → liveness
//! - `/test-discord` → notification sink diagnostics
//! - `/users`, `/instructors`, `/courses`, `/lessons`, `/quizzes`,
//!   `/quiz-questions` → full CRUD
//! - `/progress`, `/quiz-attempts`, `/transactions`, `/ranks`, `/badges`,
//!   `/user-badges` → list + create (progress upserts)
//! - `/notifications` → list, create, mark-read
//! - `/upload` → not-implemented stub
//!
//! Anything else, including an unsupported method on a known path, falls
//! through to a 404 enumerating the available endpoints.

use crate::response::ApiResponse;
use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};
use util::state::AppState;

pub mod badges;
pub mod courses;
pub mod crud;
pub mod diagnostics;
pub mod health;
pub mod instructors;
pub mod lessons;
pub mod notifications;
pub mod policy;
pub mod progress;
pub mod quiz_attempts;
pub mod quiz_questions;
pub mod quizzes;
pub mod ranks;
pub mod transactions;
pub mod upload;
pub mod user_badges;
pub mod users;

/// Builds the complete application router.
///
/// The unmatched-path fallback and the method-not-allowed fallback both
/// answer 404 with the endpoint directory, so an unsupported method on a
/// known resource reads the same as an unknown resource.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(health::health_check))
        .route("/health", get(health::health_check))
        .route("/test-discord", get(diagnostics::test_discord))
        .nest("/users", users::users_routes())
        .nest("/instructors", instructors::instructors_routes())
        .nest("/courses", courses::courses_routes())
        .nest("/lessons", lessons::lessons_routes())
        .nest("/quizzes", quizzes::quizzes_routes())
        .nest("/quiz-questions", quiz_questions::quiz_questions_routes())
        .nest("/progress", progress::progress_routes())
        .nest("/quiz-attempts", quiz_attempts::quiz_attempts_routes())
        .nest("/transactions", transactions::transactions_routes())
        .nest("/ranks", ranks::ranks_routes())
        .nest("/badges", badges::badges_routes())
        .nest("/user-badges", user_badges::user_badges_routes())
        .nest("/notifications", notifications::notifications_routes())
        .route("/upload", post(upload::upload_stub))
        .fallback(endpoint_not_found)
        .method_not_allowed_fallback(endpoint_not_found)
        .with_state(app_state)
}

/// 404 handler listing every supported endpoint.
async fn endpoint_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(
            ApiResponse::<Value>::error("Endpoint not found").with_data(json!([
                "GET /health",
                "GET|POST|PUT|DELETE /users",
                "GET|POST|PUT|DELETE /instructors",
                "GET|POST|PUT|DELETE /courses",
                "GET|POST|PUT|DELETE /lessons",
                "GET|POST|PUT|DELETE /quizzes",
                "GET|POST|PUT|DELETE /quiz-questions",
                "GET|POST /progress",
                "GET|POST /quiz-attempts",
                "GET|POST /transactions",
                "GET|POST /ranks",
                "GET|POST /badges",
                "GET|POST /user-badges",
                "GET|POST|PUT /notifications",
            ])),
        ),
    )
}
