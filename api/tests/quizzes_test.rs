mod helpers;

use helpers::{make_test_app, request, seed_course, seed_instructor, seed_question, seed_quiz};
use serde_json::json;

#[tokio::test]
async fn get_quiz_inlines_questions_sorted_by_order() {
    let app = make_test_app();
    seed_quiz(&app.store, "QUIZ_1", "COURSE_1").await;
    seed_question(&app.store, "QUESTION_B", "QUIZ_1", 2).await;
    seed_question(&app.store, "QUESTION_A", "QUIZ_1", 1).await;
    seed_question(&app.store, "QUESTION_OTHER", "QUIZ_2", 1).await;

    let (status, body) = request(&app.router, "GET", "/quizzes/QUIZ_1", None).await;
    assert_eq!(status, 200);
    let questions = body["data"]["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0]["$id"], "QUESTION_A");
    assert_eq!(questions[1]["$id"], "QUESTION_B");
}

#[tokio::test]
async fn get_unknown_quiz_is_404() {
    let app = make_test_app();

    let (status, _) = request(&app.router, "GET", "/quizzes/QUIZ_GHOST", None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn create_quiz_starts_with_zero_attempts() {
    let app = make_test_app();
    seed_instructor(&app.store, "INSTRUCTOR_1").await;
    seed_course(&app.store, "COURSE_1", "INSTRUCTOR_1").await;

    let (status, body) = request(
        &app.router,
        "POST",
        "/quizzes",
        Some(json!({
            "courseId": "COURSE_1",
            "title": "Checkpoint",
            "description": "Midterm",
            "timeLimit": 900,
            "passingScore": 60,
        })),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(body["data"]["attemptCount"], 0);
}

#[tokio::test]
async fn create_question_requires_an_existing_quiz() {
    let app = make_test_app();

    let (status, body) = request(
        &app.router,
        "POST",
        "/quiz-questions",
        Some(json!({
            "quizId": "QUIZ_GHOST",
            "question": "Is this fine?",
            "options": ["yes", "no"],
            "correctAnswer": "no",
        })),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(
        body["error"],
        "Invalid quizId: QUIZ_GHOST does not exist in quizzes collection"
    );
}

#[tokio::test]
async fn list_questions_filters_by_quiz() {
    let app = make_test_app();
    seed_question(&app.store, "QUESTION_A", "QUIZ_1", 1).await;
    seed_question(&app.store, "QUESTION_B", "QUIZ_2", 1).await;

    let (_, body) = request(&app.router, "GET", "/quiz-questions?quizId=QUIZ_1", None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["$id"], "QUESTION_A");
}
