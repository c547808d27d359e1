//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{dashboard, health, messages, reactions};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(message_routes())
        .merge(dashboard_routes())
}

/// Public feed and reactions
fn message_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/messages",
            get(messages::list_messages).post(messages::create_message),
        )
        .route("/messages/:message_id", delete(messages::delete_message))
        .route(
            "/messages/:message_id/reactions",
            post(reactions::react_to_message),
        )
}

/// Signed-in user's own data
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/messages", get(dashboard::get_my_messages))
        .route(
            "/dashboard/preferences",
            get(dashboard::get_preferences).put(dashboard::update_preferences),
        )
        .route("/dashboard/reminders", get(dashboard::get_reminders))
}
