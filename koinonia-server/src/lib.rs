//! # Koinonia Server
//!
//! REST backend for a church media platform.
//!
//! ## Overview
//!
//! - **Media catalog**: sermons, podcasts, and live broadcasts with view
//!   counts and full CRUD for administrators
//! - **Broadcast recording**: ffmpeg stream capture that turns a finished
//!   live broadcast into an on-demand sermon
//! - **Congregation engagement**: comments, prayer requests, contact form,
//!   and donation bookkeeping
//! - **Listening progress**: per-user resume positions and saved items
//!
//! ## Architecture
//!
//! The server is built on Axum and uses:
//! - PostgreSQL for persistent storage
//! - JWT bearer auth with refresh-token rotation
//! - FFmpeg for broadcast recording

pub mod auth;
pub mod broadcast;
pub mod db;
pub mod handlers;
pub mod infra;
pub mod routes;
pub mod store;

use axum::Router;
use axum::http::HeaderValue;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

pub use infra::AppState;

/// Assemble the full application router.
pub fn create_app(state: AppState) -> Router {
    let files = ServeDir::new(&state.config.media.upload_dir);
    let recordings = ServeDir::new(&state.config.broadcast.recording_dir);

    Router::new()
        .merge(routes::create_api_router(state.clone()))
        .nest_service("/files", files)
        .nest_service("/recordings", recordings)
        .layer(build_cors_layer(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(state: &AppState) -> CorsLayer {
    if state.config.dev_mode {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = state
        .config
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
