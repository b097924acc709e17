use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{self, AppState};

/// Build the axum router with all management-plane endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/things",
            post(handlers::add_thing).get(handlers::list_things),
        )
        .route(
            "/things/:id",
            put(handlers::update_thing)
                .get(handlers::view_thing)
                .delete(handlers::remove_thing),
        )
        .route(
            "/channels",
            post(handlers::create_channel).get(handlers::list_channels),
        )
        .route(
            "/channels/:id",
            put(handlers::update_channel)
                .get(handlers::view_channel)
                .delete(handlers::remove_channel),
        )
        .route(
            "/channels/:id/things/:thing_id",
            put(handlers::connect).delete(handlers::disconnect),
        )
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
