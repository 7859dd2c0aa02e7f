//! HTTP route handlers for the portal.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Login page (redirects when logged in)
//! GET  /health                  - Health check (wired in main)
//!
//! # Auth
//! POST /auth/login              - Login action
//! POST /auth/logout             - Logout action
//! GET  /register                - Registration page
//! POST /register                - Registration action
//!
//! # Tenant views (requires login)
//! GET  /home                    - Tenant home with the current announcement
//! GET  /room                    - The tenant's room
//! GET  /payments                - The tenant's payment status
//! GET  /cleaning                - Cleaning schedule
//! GET  /faq                     - FAQ list
//! GET  /rules                   - House rules
//!
//! # Admin views (requires the ADMIN role)
//! GET  /admin                   - Dashboard
//! GET/POST /admin/rooms[...]    - Room CRUD
//! GET/POST /admin/tenants[...]  - Tenant CRUD + password reset
//! GET/POST /admin/announcement  - Single-record announcement editor
//! GET/POST /admin/rules[...]    - House-rule CRUD
//! GET/POST /admin/faqs[...]     - FAQ CRUD
//! GET  /admin/payments          - Derived payments view
//! POST /admin/payments/{id}/confirm - Mark a room's payment Lunas
//! GET  /admin/cleaning          - Static weekly cleaning template
//! ```

pub mod admin;
pub mod auth;
pub mod cleaning;
pub mod faq;
pub mod home;
pub mod payments;
pub mod rooms;
pub mod rules;

use axum::response::Redirect;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;

use crate::state::AppState;

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Redirect to `base` with a URL-encoded `?error=` message.
pub(crate) fn redirect_with_error(base: &str, message: &str) -> Redirect {
    Redirect::to(&format!("{base}?error={}", urlencoding::encode(message)))
}

/// Redirect to `base` with a URL-encoded `?success=` message.
pub(crate) fn redirect_with_success(base: &str, message: &str) -> Redirect {
    Redirect::to(&format!("{base}?success={}", urlencoding::encode(message)))
}

/// Turn an empty form field into `None`.
pub(crate) fn none_if_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the tenant routes router.
pub fn tenant_routes() -> Router<AppState> {
    Router::new()
        .route("/home", get(home::home))
        .route("/room", get(rooms::my_room))
        .route("/payments", get(payments::my_payments))
        .route("/cleaning", get(cleaning::schedule))
        .route("/faq", get(faq::index))
        .route("/rules", get(rules::index))
}

/// Create all routes for the portal.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Login page doubles as the landing page
        .route("/", get(auth::login_page))
        .route("/register", get(auth::register_page).post(auth::register))
        // Auth actions
        .nest("/auth", auth_routes())
        // Tenant views
        .merge(tenant_routes())
        // Admin surface
        .nest("/admin", admin::routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_if_empty_trims() {
        assert_eq!(none_if_empty("  ".to_owned()), None);
        assert_eq!(none_if_empty(String::new()), None);
        assert_eq!(none_if_empty(" AC ".to_owned()), Some("AC".to_owned()));
    }
}
