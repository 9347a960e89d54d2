mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_reports_ok() {
    // Arrange
    let app = common::build_test_app();

    // Act
    let (status, json) = common::get_json(&app.router, "/health").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    // Arrange
    let app = common::build_test_app();

    // Act
    let (status, _) = common::get_json(&app.router, "/api/v1/slides").await;

    // Assert
    assert_eq!(status, StatusCode::NOT_FOUND);
}
