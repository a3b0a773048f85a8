mod support;

use axum::http::StatusCode;
use serde_json::{Value, json};
use support::TestApp;

#[tokio::test]
async fn progress_round_trip_and_continue_listening() {
    let app = TestApp::spawn();
    let token = app.register("ruth").await;
    let record = app.seed_podcast("Midweek Encouragement").await;

    app.server
        .post("/api/v1/playback/progress")
        .authorization_bearer(&token)
        .json(&json!({
            "media_id": record.id,
            "position": 120.0,
            "duration": 1800.0,
        }))
        .await
        .assert_status_ok();

    let fetched = app
        .server
        .get(&format!("/api/v1/media/{}/progress", record.id))
        .authorization_bearer(&token)
        .await;
    fetched.assert_status_ok();
    assert_eq!(fetched.json::<Value>()["data"]["position"], 120.0);

    let listing = app
        .server
        .get("/api/v1/playback/continue")
        .authorization_bearer(&token)
        .await;
    listing.assert_status_ok();
    assert_eq!(listing.json::<Value>()["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn near_complete_progress_marks_item_done() {
    let app = TestApp::spawn();
    let token = app.register("ruth").await;
    let record = app.seed_podcast("Midweek Encouragement").await;

    // 96% listened: past the completion threshold.
    app.server
        .post("/api/v1/playback/progress")
        .authorization_bearer(&token)
        .json(&json!({
            "media_id": record.id,
            "position": 1728.0,
            "duration": 1800.0,
        }))
        .await
        .assert_status_ok();

    app.server
        .get(&format!("/api/v1/media/{}/progress", record.id))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let listing = app
        .server
        .get("/api/v1/playback/continue")
        .authorization_bearer(&token)
        .await;
    assert!(listing.json::<Value>()["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_progress_payloads_are_rejected() {
    let app = TestApp::spawn();
    let token = app.register("ruth").await;
    let record = app.seed_podcast("Midweek Encouragement").await;

    for (position, duration) in
        [(-1.0, 1800.0), (10.0, 0.0), (10.0, -5.0)]
    {
        let response = app
            .server
            .post("/api/v1/playback/progress")
            .authorization_bearer(&token)
            .json(&json!({
                "media_id": record.id,
                "position": position,
                "duration": duration,
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn progress_is_scoped_per_user() {
    let app = TestApp::spawn();
    let ruth = app.register("ruth").await;
    let boaz = app.register("boaz").await;
    let record = app.seed_podcast("Midweek Encouragement").await;

    app.server
        .post("/api/v1/playback/progress")
        .authorization_bearer(&ruth)
        .json(&json!({
            "media_id": record.id,
            "position": 60.0,
            "duration": 1800.0,
        }))
        .await
        .assert_status_ok();

    app.server
        .get(&format!("/api/v1/media/{}/progress", record.id))
        .authorization_bearer(&boaz)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn clearing_progress_removes_the_entry() {
    let app = TestApp::spawn();
    let token = app.register("ruth").await;
    let record = app.seed_podcast("Midweek Encouragement").await;

    app.server
        .post("/api/v1/playback/progress")
        .authorization_bearer(&token)
        .json(&json!({
            "media_id": record.id,
            "position": 60.0,
            "duration": 1800.0,
        }))
        .await
        .assert_status_ok();

    app.server
        .delete(&format!("/api/v1/playback/progress/{}", record.id))
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    app.server
        .get(&format!("/api/v1/media/{}/progress", record.id))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn saved_items_round_trip() {
    let app = TestApp::spawn();
    let token = app.register("ruth").await;
    let record = app.seed_sermon("Walking in Grace").await;

    app.server
        .put(&format!("/api/v1/users/me/saved/{}", record.id))
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    // Saving twice is idempotent.
    app.server
        .put(&format!("/api/v1/users/me/saved/{}", record.id))
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    let listed = app
        .server
        .get("/api/v1/users/me/saved")
        .authorization_bearer(&token)
        .await;
    assert_eq!(listed.json::<Value>()["data"].as_array().unwrap().len(), 1);

    app.server
        .delete(&format!("/api/v1/users/me/saved/{}", record.id))
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    let unsave_again = app
        .server
        .delete(&format!("/api/v1/users/me/saved/{}", record.id))
        .authorization_bearer(&token)
        .await;
    unsave_again.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn saving_missing_media_is_not_found() {
    let app = TestApp::spawn();
    let token = app.register("ruth").await;

    app.server
        .put(&format!("/api/v1/users/me/saved/{}", uuid::Uuid::new_v4()))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
