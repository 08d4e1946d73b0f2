pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::enhance::handlers as enhance_handlers;
use crate::import::handlers as import_handlers;
use crate::import::validation::MAX_UPLOAD_BYTES;
use crate::profile::handlers as profile_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile API
        .route(
            "/api/v1/profile",
            get(profile_handlers::handle_get_profile).put(profile_handlers::handle_put_profile),
        )
        .route(
            "/api/v1/profile/import",
            post(import_handlers::handle_import),
        )
        .route("/api/v1/profile/deck", get(profile_handlers::handle_get_deck))
        // Enhancement API
        .route(
            "/api/v1/enhance/summary",
            post(enhance_handlers::handle_enhance_summary),
        )
        .route(
            "/api/v1/enhance/skill",
            post(enhance_handlers::handle_enhance_skill),
        )
        .route(
            "/api/v1/enhance/project",
            post(enhance_handlers::handle_enhance_project),
        )
        // The multipart body carries the file plus form fields; leave the
        // validator room to reject oversized files with its own message.
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024))
        .with_state(state)
}
