#![allow(dead_code)]

use api::middleware::log_request;
use api::routes::routes;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    middleware::from_fn_with_state,
};
use notifier::Notifier;
use serde_json::{Value, json};
use std::sync::Arc;
use store::{DocumentStore, MemoryStore};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use util::state::AppState;

/// The app under test plus a handle to its backing store for seeding and
/// direct assertions.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

/// Builds the full router (including the logging middleware and CORS layer)
/// on top of an empty in-memory store and a disabled notification sink.
pub fn make_test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), Notifier::disabled());
    let router = routes(state.clone())
        .layer(from_fn_with_state(state, log_request))
        .layer(CorsLayer::permissive());
    TestApp { router, store }
}

/// Sends one request and returns the status plus the decoded JSON body.
pub async fn request(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn seed_user(store: &MemoryStore, id: &str) {
    store
        .create(
            "users",
            Some(id),
            json!({
                "name": "Test User",
                "email": format!("{}@example.com", id.to_lowercase()),
                "password": "hunter2",
            }),
        )
        .await
        .unwrap();
}

pub async fn seed_instructor(store: &MemoryStore, id: &str) {
    store
        .create("instructors", Some(id), json!({ "instructorName": "Dr. Test" }))
        .await
        .unwrap();
}

pub async fn seed_course(store: &MemoryStore, id: &str, instructor_id: &str) {
    store
        .create(
            "courses",
            Some(id),
            json!({
                "title": "Intro to Testing",
                "description": "A course",
                "instructorId": instructor_id,
                "category": "engineering",
                "price": 10,
                "enrollmentCount": 0,
                "isPublished": false,
            }),
        )
        .await
        .unwrap();
}

pub async fn seed_lesson(store: &MemoryStore, id: &str, course_id: &str, order: i64) {
    store
        .create(
            "lessons",
            Some(id),
            json!({
                "courseId": course_id,
                "instructorId": "INSTRUCTOR_SEED",
                "title": format!("Lesson {order}"),
                "content": "...",
                "type": "text",
                "order": order,
                "completionCount": 0,
            }),
        )
        .await
        .unwrap();
}

pub async fn seed_quiz(store: &MemoryStore, id: &str, course_id: &str) {
    store
        .create(
            "quizzes",
            Some(id),
            json!({
                "courseId": course_id,
                "title": "Checkpoint",
                "description": "A quiz",
                "timeLimit": 600,
                "passingScore": 70,
                "attemptCount": 0,
            }),
        )
        .await
        .unwrap();
}

pub async fn seed_question(store: &MemoryStore, id: &str, quiz_id: &str, order: i64) {
    store
        .create(
            "quiz_questions",
            Some(id),
            json!({
                "quizId": quiz_id,
                "question": format!("Question {order}?"),
                "options": ["a", "b", "c"],
                "correctAnswer": "a",
                "order": order,
            }),
        )
        .await
        .unwrap();
}

pub async fn seed_badge(store: &MemoryStore, id: &str, name: &str) {
    store
        .create(
            "badges",
            Some(id),
            json!({
                "name": name,
                "description": "A badge",
                "category": "progress",
                "icon": "star",
            }),
        )
        .await
        .unwrap();
}
