//! API Routes
//!
//! Router configuration for the HTTP API.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{self, ApiState};

/// Create the API router with all routes
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // Record registry
        .route(
            "/records",
            post(handlers::create_record).get(handlers::list_records),
        )
        .route(
            "/records/{id}",
            get(handlers::get_record).put(handlers::update_record),
        )
        // Proposal engine
        .route("/proposals", post(handlers::create_proposal))
        .route("/proposals/{id}", get(handlers::get_proposal))
        // Result engine
        .route("/results", post(handlers::create_result))
        .route("/results/{id}", get(handlers::get_result))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
