mod common;

use axum::http::StatusCode;

const BASE: &str = "/api/v1/presentation";

#[tokio::test]
async fn test_current_presentation_state() {
    // Arrange
    let app = common::build_test_app();

    // Act
    let (status, json) = common::get_json(&app.router, BASE).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["current_index"], 0);
    assert_eq!(json["playing"], false);
    assert_eq!(json["scene_count"], 3);
    assert_eq!(json["title"], "Scene 0");
    assert_eq!(json["phase"]["phase"], "active");
}

#[tokio::test]
async fn test_next_and_previous_move_between_scenes() {
    // Arrange
    let app = common::build_test_app();

    // Act
    let (_, after_next) = common::post(&app.router, &format!("{BASE}/next")).await;
    let (_, after_previous) = common::post(&app.router, &format!("{BASE}/previous")).await;
    let (_, wrapped) = common::post(&app.router, &format!("{BASE}/previous")).await;

    // Assert
    assert_eq!(after_next["current_index"], 1);
    assert_eq!(after_previous["current_index"], 0);
    assert_eq!(wrapped["current_index"], 2);
    assert_eq!(wrapped["title"], "Scene 2");
}

#[tokio::test]
async fn test_goto_jumps_to_scene() {
    // Arrange
    let app = common::build_test_app();

    // Act
    let (status, json) = common::post(&app.router, &format!("{BASE}/goto/2")).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["current_index"], 2);
}

#[tokio::test]
async fn test_goto_out_of_range_is_rejected_without_moving() {
    // Arrange
    let app = common::build_test_app();

    // Act
    let (status, json) = common::post(&app.router, &format!("{BASE}/goto/7")).await;
    let (_, current) = common::get_json(&app.router, BASE).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "scene_out_of_range");
    assert_eq!(current["current_index"], 0);
}

#[tokio::test]
async fn test_toggle_autoplay_flips_playing() {
    // Arrange
    let app = common::build_test_app();

    // Act
    let (status, json) = common::post(&app.router, &format!("{BASE}/toggle-autoplay")).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["playing"], true);
    assert_eq!(json["narration_paused"], false);
}

#[tokio::test]
async fn test_scene_listing() {
    // Arrange
    let app = common::build_test_app();

    // Act
    let (status, json) = common::get_json(&app.router, &format!("{BASE}/scenes")).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    let scenes = json.as_array().unwrap();
    assert_eq!(scenes.len(), 3);
    assert_eq!(scenes[1]["narration"], "here is the dashboard");
    assert_eq!(scenes[1]["minimum_duration_ms"], 1000);
    assert!(scenes[1]["demo"].is_null());
}

#[tokio::test]
async fn test_stage_follows_navigation() {
    // Arrange
    let app = common::build_test_app();
    common::post(&app.router, &format!("{BASE}/next")).await;

    // Act
    let (status, json) = common::get_json(&app.router, &format!("{BASE}/stage")).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["stage"]["scene"], 1);
    assert!(json["caption"].is_null());
    assert_eq!(json["caption_paused"], false);
}

#[tokio::test]
async fn test_events_record_navigation() {
    // Arrange
    let app = common::build_test_app();
    common::post(&app.router, &format!("{BASE}/next")).await;

    // Act
    let (status, json) = common::get_json(&app.router, &format!("{BASE}/events")).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    let events = json.as_array().unwrap();
    assert!(
        events
            .iter()
            .any(|event| event["kind"]["type"] == "navigation_applied")
    );
}

#[tokio::test]
async fn test_requests_after_shutdown_are_unavailable() {
    // Arrange
    let app = common::build_test_app();
    app.presentation.shutdown().await.unwrap();

    // Act
    let (status, json) = common::post(&app.router, &format!("{BASE}/next")).await;

    // Assert
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"], "sequencer_stopped");
}
