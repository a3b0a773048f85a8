use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
};

use crate::{
    auth::{
        handlers as auth_handlers,
        middleware::{
            admin_middleware, auth_middleware, optional_auth_middleware,
        },
    },
    handlers::{
        broadcasts, catalog, engagement, giving, health, media, progress,
        search, uploads,
    },
    infra::AppState,
};

/// Create all v1 API routes
pub fn create_v1_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/ping", get(health::ping))
        .route("/health", get(health::health))
        // Public authentication endpoints
        .route("/auth/register", post(auth_handlers::register))
        .route("/auth/login", post(auth_handlers::login))
        .route("/auth/refresh", post(auth_handlers::refresh))
        // Public content
        .route("/sermons", get(media::list_sermons))
        .route("/podcasts", get(media::list_podcasts))
        .route("/media/{id}", get(media::get_media))
        .route("/media/{id}/comments", get(engagement::list_comments))
        .route("/live-broadcasts", get(broadcasts::list_live))
        .route("/events", get(catalog::list_events))
        .route("/events/{id}", get(catalog::get_event))
        .route("/devotions", get(catalog::list_devotions))
        .route("/devotions/{id}", get(catalog::get_devotion))
        .route("/ministries", get(catalog::list_ministries))
        .route("/ministries/{id}", get(catalog::get_ministry))
        .route("/news", get(catalog::list_news))
        .route("/news/{id}", get(catalog::get_news))
        .route("/contact", post(engagement::create_contact_message))
        .route("/search", get(search::search))
        .merge(create_anonymous_submission_routes(state.clone()))
        .merge(create_protected_routes(state.clone()))
        .merge(create_admin_routes(state))
}

/// Submissions that accept anonymous users but attribute them when a
/// valid token is present.
fn create_anonymous_submission_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/prayer-requests",
            post(engagement::create_prayer_request),
        )
        .route("/donations", post(giving::create_donation))
        .route_layer(middleware::from_fn_with_state(
            state,
            optional_auth_middleware,
        ))
}

/// Routes that require authentication
fn create_protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/logout", post(auth_handlers::logout))
        .route("/users/me", get(auth_handlers::get_current_user))
        .route("/media/{id}/comments", post(engagement::create_comment))
        .route("/comments/{id}", delete(engagement::delete_comment))
        .route("/donations/mine", get(giving::list_my_donations))
        .route("/playback/progress", post(progress::update_progress))
        .route("/playback/continue", get(progress::continue_listening))
        .route("/media/{id}/progress", get(progress::get_progress))
        .route(
            "/playback/progress/{media_id}",
            delete(progress::clear_progress),
        )
        .route("/users/me/saved", get(progress::list_saved))
        .route("/users/me/saved/{media_id}", put(progress::save_item))
        .route(
            "/users/me/saved/{media_id}",
            delete(progress::unsave_item),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Routes that additionally require `is_admin`
fn create_admin_routes(state: AppState) -> Router<AppState> {
    let max_upload = state.config.media.max_upload_bytes;
    Router::new()
        .route("/media", post(media::create_media))
        .route("/media/{id}", put(media::update_media))
        .route("/media/{id}", delete(media::delete_media))
        .route("/live-broadcasts", post(broadcasts::create_broadcast))
        .route(
            "/live-broadcasts/{id}/recording/start",
            post(broadcasts::start_recording),
        )
        .route(
            "/live-broadcasts/{id}/recording/stop",
            post(broadcasts::stop_recording),
        )
        .route(
            "/live-broadcasts/{id}/recording",
            get(broadcasts::recording_status),
        )
        .route("/events", post(catalog::create_event))
        .route("/events/{id}", put(catalog::update_event))
        .route("/events/{id}", delete(catalog::delete_event))
        .route("/devotions", post(catalog::create_devotion))
        .route("/devotions/{id}", put(catalog::update_devotion))
        .route("/devotions/{id}", delete(catalog::delete_devotion))
        .route("/ministries", post(catalog::create_ministry))
        .route("/ministries/{id}", put(catalog::update_ministry))
        .route("/ministries/{id}", delete(catalog::delete_ministry))
        .route("/news", post(catalog::create_news))
        .route("/news/{id}", put(catalog::update_news))
        .route("/news/{id}", delete(catalog::delete_news))
        .route(
            "/prayer-requests",
            get(engagement::list_prayer_requests),
        )
        .route("/donations", get(giving::list_donations))
        .route(
            "/uploads",
            post(uploads::upload_file)
                .layer(DefaultBodyLimit::max(max_upload)),
        )
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
