//! HTTP route handlers.

pub mod directory;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

/// Creates the router with all handler routes
#[must_use]
pub fn handler() -> Router {
    Router::new()
        .route("/health", get(health::handler))
        .route(
            "/_matrix/client/r0/user_directory/search",
            post(directory::search),
        )
}
