mod helpers;

use helpers::{make_test_app, request, seed_course, seed_instructor, seed_lesson, seed_user};
use serde_json::json;

#[tokio::test]
async fn posting_the_same_triple_twice_upserts() {
    let app = make_test_app();
    seed_user(&app.store, "U1").await;
    seed_instructor(&app.store, "INSTRUCTOR_1").await;
    seed_course(&app.store, "COURSE_1", "INSTRUCTOR_1").await;
    seed_lesson(&app.store, "LESSON_A", "COURSE_1", 1).await;

    let record = json!({
        "userId": "U1",
        "courseId": "COURSE_1",
        "lessonId": "LESSON_A",
        "completed": false,
    });
    let (status, first) = request(&app.router, "POST", "/progress", Some(record)).await;
    assert_eq!(status, 201);

    let (status, second) = request(
        &app.router,
        "POST",
        "/progress",
        Some(json!({
            "userId": "U1",
            "courseId": "COURSE_1",
            "lessonId": "LESSON_A",
            "completed": true,
        })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(second["data"]["$id"], first["data"]["$id"]);
    assert_eq!(second["data"]["completed"], true);

    let (_, list) = request(&app.router, "GET", "/progress?userId=U1", None).await;
    assert_eq!(list["total"], 1);
}

#[tokio::test]
async fn progress_requires_resolvable_references() {
    let app = make_test_app();
    seed_user(&app.store, "U1").await;

    let (status, body) = request(
        &app.router,
        "POST",
        "/progress",
        Some(json!({
            "userId": "U1",
            "courseId": "COURSE_GHOST",
            "lessonId": "LESSON_A",
        })),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(
        body["error"],
        "Invalid courseId: COURSE_GHOST does not exist in courses collection"
    );
}

#[tokio::test]
async fn progress_requires_the_full_triple() {
    let app = make_test_app();

    let (status, body) = request(
        &app.router,
        "POST",
        "/progress",
        Some(json!({ "userId": "U1" })),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Missing required fields: courseId, lessonId");
}
