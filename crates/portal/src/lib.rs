//! Kostpanel portal library.
//!
//! This crate provides the portal functionality as a library, allowing it to
//! be tested in-process and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;

use state::AppState;

/// Build the portal application router with the session middleware applied.
///
/// Used by `main` and by the integration tests, so both exercise the same
/// stack.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::reconcile_session,
        ))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the backend.
async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
