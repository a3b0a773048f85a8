mod support;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::Value;
use support::TestApp;

#[tokio::test]
async fn admin_upload_is_stored_and_served() {
    let app = TestApp::spawn();
    let admin_token = app.register_admin("warden").await;

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"fake audio bytes".to_vec())
            .file_name("episode one.mp3")
            .mime_type("audio/mpeg"),
    );

    let uploaded = app
        .server
        .post("/api/v1/uploads")
        .authorization_bearer(&admin_token)
        .multipart(form)
        .await;
    uploaded.assert_status_ok();

    let body: Value = uploaded.json();
    let url = body["data"]["url"].as_str().unwrap();
    let filename = body["data"]["filename"].as_str().unwrap();
    assert!(url.starts_with("/files/"));
    // Spaces are sanitized out of stored names.
    assert!(!filename.contains(' '));
    assert!(filename.ends_with(".mp3"));

    let served = app.server.get(url).await;
    served.assert_status_ok();
    assert_eq!(served.as_bytes().as_ref(), b"fake audio bytes");
}

#[tokio::test]
async fn large_upload_is_stored_whole() {
    let app = TestApp::spawn();
    let admin_token = app.register_admin("warden").await;

    // Big enough to arrive as more than one multipart chunk.
    let payload = vec![0xA7u8; 2 * 1024 * 1024];
    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(payload.clone())
            .file_name("service.mp4")
            .mime_type("video/mp4"),
    );

    let uploaded = app
        .server
        .post("/api/v1/uploads")
        .authorization_bearer(&admin_token)
        .multipart(form)
        .await;
    uploaded.assert_status_ok();

    let body: Value = uploaded.json();
    assert_eq!(
        body["data"]["size_bytes"].as_u64().unwrap(),
        payload.len() as u64
    );

    let url = body["data"]["url"].as_str().unwrap();
    let served = app.server.get(url).await;
    served.assert_status_ok();
    assert_eq!(served.as_bytes().len(), payload.len());
}

#[tokio::test]
async fn empty_upload_is_rejected() {
    let app = TestApp::spawn();
    let admin_token = app.register_admin("warden").await;

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(Vec::new()).file_name("empty.bin"),
    );
    let response = app
        .server
        .post("/api/v1/uploads")
        .authorization_bearer(&admin_token)
        .multipart(form)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_without_file_part_is_rejected() {
    let app = TestApp::spawn();
    let admin_token = app.register_admin("warden").await;

    let form = MultipartForm::new().add_text("note", "no file here");
    let response = app
        .server
        .post("/api/v1/uploads")
        .authorization_bearer(&admin_token)
        .multipart(form)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn uploads_require_admin() {
    let app = TestApp::spawn();
    let token = app.register("ruth").await;

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"bytes".to_vec()).file_name("a.bin"),
    );
    let response = app
        .server
        .post("/api/v1/uploads")
        .authorization_bearer(&token)
        .multipart(form)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}
