mod helpers;

use axum::{body::Body, http::Request};
use helpers::{make_test_app, request};
use tower::ServiceExt;

#[tokio::test]
async fn unknown_path_returns_the_endpoint_directory() {
    let app = make_test_app();

    let (status, body) = request(&app.router, "GET", "/no-such-resource", None).await;
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Endpoint not found");
    let endpoints = body["data"].as_array().unwrap();
    assert!(endpoints.iter().any(|e| e == "GET /health"));
    assert!(endpoints.iter().any(|e| e == "GET|POST /progress"));
}

#[tokio::test]
async fn unsupported_method_on_a_known_path_is_also_404() {
    let app = make_test_app();

    // /badges only supports GET and POST.
    let (status, body) = request(&app.router, "PUT", "/badges", None).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Endpoint not found");

    let (status, _) = request(&app.router, "DELETE", "/progress/PROGRESS_1", None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn upload_is_a_501_stub() {
    let app = make_test_app();

    let (status, body) = request(&app.router, "POST", "/upload", None).await;
    assert_eq!(status, 501);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "File upload endpoint not implemented yet");
}

#[tokio::test]
async fn preflight_requests_pass_the_cors_layer() {
    let app = make_test_app();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/courses")
                .header("origin", "https://example.com")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin")
    );

    // Preflight must not touch the store.
    let (_, list) = request(&app.router, "GET", "/courses", None).await;
    assert_eq!(list["total"], 0);
}
