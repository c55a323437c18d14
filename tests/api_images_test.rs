//! Tests for image upload and metadata endpoints.

mod common;

use axum::http::StatusCode;
use common::{fixtures, TestApp};
use shade_engine::Srgb;

#[tokio::test]
async fn test_upload_returns_id_and_dimensions() {
    let app = TestApp::new();
    let png = fixtures::shade_board_png();

    let response = app.post_bytes("/api/images", "image/png", png.clone()).await;
    common::assert_status(&response, StatusCode::CREATED);

    let json: serde_json::Value = response.json();
    assert_eq!(json["width"], 220);
    assert_eq!(json["height"], 80);
    assert_eq!(
        json["id"].as_str().unwrap(),
        shadematch::services::image_id(&png)
    );
}

#[tokio::test]
async fn test_get_image_metadata() {
    let app = TestApp::new();
    let id = app.upload(fixtures::solid_png(12, 7, Srgb::new(1, 2, 3))).await;

    let response = app.get(&format!("/api/images/{id}")).await;
    common::assert_ok(&response);

    let json: serde_json::Value = response.json();
    assert_eq!(json["id"], id.as_str());
    assert_eq!(json["width"], 12);
    assert_eq!(json["height"], 7);
    assert!(json["uploaded_at"].is_string(), "Expected uploaded_at timestamp");
}

#[tokio::test]
async fn test_identical_uploads_share_an_id() {
    let app = TestApp::new();
    let png = fixtures::solid_png(4, 4, Srgb::new(9, 9, 9));

    let first = app.upload(png.clone()).await;
    let second = app.upload(png).await;

    assert_eq!(first, second);
    assert_eq!(app.store.count().await, 1);
}

#[tokio::test]
async fn test_unknown_image_is_404() {
    let app = TestApp::new();

    let response = app.get("/api/images/does-not-exist").await;

    common::assert_status(&response, StatusCode::NOT_FOUND);
    common::assert_json_status(&response, 404);
}

#[tokio::test]
async fn test_garbage_upload_is_400() {
    let app = TestApp::new();

    let response = app
        .post_bytes("/api/images", "image/png", b"GIF89a not a png".to_vec())
        .await;

    common::assert_status(&response, StatusCode::BAD_REQUEST);
    common::assert_json_status(&response, 400);
    assert_eq!(app.store.count().await, 0);
}

#[tokio::test]
async fn test_body_over_byte_limit_is_413() {
    let app = TestApp::with_yaml("limits:\n  max_image_bytes: 64\n");
    let png = fixtures::shade_board_png();
    assert!(png.len() > 64);

    let response = app.post_bytes("/api/images", "image/png", png).await;

    common::assert_status(&response, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_image_over_pixel_limit_is_413() {
    let app = TestApp::with_yaml("limits:\n  max_pixels: 100\n");

    let response = app
        .post_bytes(
            "/api/images",
            "image/png",
            fixtures::solid_png(11, 10, Srgb::new(0, 0, 0)),
        )
        .await;

    common::assert_status(&response, StatusCode::PAYLOAD_TOO_LARGE);
    common::assert_json_status(&response, 413);
}

#[tokio::test]
async fn test_upload_past_max_images_evicts_oldest() {
    let app = TestApp::with_yaml("limits:\n  max_images: 2\n");

    let first = app.upload(fixtures::solid_png(4, 4, Srgb::new(10, 10, 10))).await;
    let second = app.upload(fixtures::solid_png(4, 4, Srgb::new(20, 20, 20))).await;
    let third = app.upload(fixtures::solid_png(4, 4, Srgb::new(30, 30, 30))).await;

    assert_eq!(app.store.count().await, 2);
    common::assert_status(
        &app.get(&format!("/api/images/{first}")).await,
        StatusCode::NOT_FOUND,
    );
    common::assert_ok(&app.get(&format!("/api/images/{second}")).await);
    common::assert_ok(&app.get(&format!("/api/images/{third}")).await);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.get("/health").await;

    common::assert_ok(&response);
    assert_eq!(response.text(), "OK");
}
