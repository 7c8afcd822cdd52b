//! # asteroid-server
//!
//! HTTP surface for user registration, nonce login, sessions and notes.

pub mod api;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

pub use config::Config;
pub use state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health checks
        .route("/ping", get(api::health::ping))
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))

        // Users
        .route("/users", post(api::users::create_user))
        .route("/users/:id", get(api::users::get_user))

        // Authentication
        .route("/login", post(api::auth::login))
        .route("/refresh_token", get(api::auth::refresh_token))

        // Notes
        .route("/notes", post(api::notes::create_note))
        .route("/notes/:id", get(api::notes::get_note))

        // Add middleware
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
