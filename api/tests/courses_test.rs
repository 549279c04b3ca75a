mod helpers;

use helpers::{make_test_app, request, seed_course, seed_instructor, seed_lesson};
use serde_json::json;

#[tokio::test]
async fn create_course_applies_derived_defaults() {
    let app = make_test_app();
    seed_instructor(&app.store, "INSTRUCTOR_1").await;

    let (status, body) = request(
        &app.router,
        "POST",
        "/courses",
        Some(json!({
            "title": "Rust 101",
            "description": "Ownership and friends",
            "instructorId": "INSTRUCTOR_1",
            "category": "programming",
            "price": 25,
        })),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(body["data"]["enrollmentCount"], 0);
    assert_eq!(body["data"]["isPublished"], false);
    assert!(
        body["data"]["$id"]
            .as_str()
            .is_some_and(|id| id.starts_with("COURSE_"))
    );
}

#[tokio::test]
async fn create_course_rejects_unknown_instructor() {
    let app = make_test_app();

    let (status, body) = request(
        &app.router,
        "POST",
        "/courses",
        Some(json!({
            "title": "Rust 101",
            "description": "Ownership and friends",
            "instructorId": "INSTRUCTOR_GHOST",
            "category": "programming",
            "price": 25,
        })),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(
        body["error"],
        "Invalid instructorId: INSTRUCTOR_GHOST does not exist in instructors collection"
    );
}

#[tokio::test]
async fn create_course_with_zero_price_is_valid() {
    let app = make_test_app();
    seed_instructor(&app.store, "INSTRUCTOR_1").await;

    let (status, _) = request(
        &app.router,
        "POST",
        "/courses",
        Some(json!({
            "title": "Free course",
            "description": "On the house",
            "instructorId": "INSTRUCTOR_1",
            "category": "misc",
            "price": 0,
        })),
    )
    .await;
    assert_eq!(status, 201);
}

#[tokio::test]
async fn get_course_inlines_lessons_sorted_by_order() {
    let app = make_test_app();
    seed_instructor(&app.store, "INSTRUCTOR_1").await;
    seed_course(&app.store, "COURSE_1", "INSTRUCTOR_1").await;
    seed_lesson(&app.store, "LESSON_B", "COURSE_1", 2).await;
    seed_lesson(&app.store, "LESSON_A", "COURSE_1", 1).await;
    seed_lesson(&app.store, "LESSON_OTHER", "COURSE_2", 1).await;

    let (status, body) = request(&app.router, "GET", "/courses/COURSE_1", None).await;
    assert_eq!(status, 200);
    let lessons = body["data"]["lessons"].as_array().unwrap();
    assert_eq!(lessons.len(), 2);
    assert_eq!(lessons[0]["$id"], "LESSON_A");
    assert_eq!(lessons[1]["$id"], "LESSON_B");
}

#[tokio::test]
async fn list_courses_filters_by_category_and_instructor() {
    let app = make_test_app();
    seed_instructor(&app.store, "INSTRUCTOR_1").await;
    seed_instructor(&app.store, "INSTRUCTOR_2").await;
    seed_course(&app.store, "COURSE_1", "INSTRUCTOR_1").await;
    seed_course(&app.store, "COURSE_2", "INSTRUCTOR_2").await;

    let (_, body) = request(&app.router, "GET", "/courses?instructor=INSTRUCTOR_2", None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["$id"], "COURSE_2");
}

#[tokio::test]
async fn update_course_revalidates_instructor_reference() {
    let app = make_test_app();
    seed_instructor(&app.store, "INSTRUCTOR_1").await;
    seed_course(&app.store, "COURSE_1", "INSTRUCTOR_1").await;

    let (status, body) = request(
        &app.router,
        "PUT",
        "/courses/COURSE_1",
        Some(json!({ "instructorId": "INSTRUCTOR_GHOST" })),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn deleting_a_course_does_not_cascade_to_lessons() {
    let app = make_test_app();
    seed_instructor(&app.store, "INSTRUCTOR_1").await;
    seed_course(&app.store, "COURSE_1", "INSTRUCTOR_1").await;
    seed_lesson(&app.store, "LESSON_A", "COURSE_1", 1).await;

    let (status, _) = request(&app.router, "DELETE", "/courses/COURSE_1", None).await;
    assert_eq!(status, 200);

    let (status, body) = request(&app.router, "GET", "/lessons/LESSON_A", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["courseId"], "COURSE_1");
}
