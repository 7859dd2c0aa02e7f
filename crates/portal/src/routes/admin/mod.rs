//! Admin surface.
//!
//! Every handler here extracts [`RequireAdmin`](crate::middleware::RequireAdmin);
//! tenants are redirected to `/home`, logged-out visitors to `/`.

pub mod announcement;
pub mod cleaning;
pub mod dashboard;
pub mod faqs;
pub mod payments;
pub mod rooms;
pub mod rules;
pub mod tenants;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

/// Create the admin routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::dashboard))
        // Rooms
        .route("/rooms", get(rooms::index).post(rooms::create))
        .route("/rooms/{id}/edit", get(rooms::edit_page))
        .route("/rooms/{id}", post(rooms::update))
        .route("/rooms/{id}/delete", post(rooms::delete))
        // Tenants
        .route("/tenants", get(tenants::index).post(tenants::create))
        .route("/tenants/{id}/edit", get(tenants::edit_page))
        .route("/tenants/{id}", post(tenants::update))
        .route("/tenants/{id}/delete", post(tenants::delete))
        .route("/tenants/{id}/reset-password", post(tenants::reset_password))
        // Single-record announcement editor
        .route(
            "/announcement",
            get(announcement::edit_page).post(announcement::save),
        )
        // House rules
        .route("/rules", get(rules::index).post(rules::create))
        .route("/rules/{id}/edit", get(rules::edit_page))
        .route("/rules/{id}", post(rules::update))
        .route("/rules/{id}/delete", post(rules::delete))
        // FAQs
        .route("/faqs", get(faqs::index).post(faqs::create))
        .route("/faqs/{id}/edit", get(faqs::edit_page))
        .route("/faqs/{id}", post(faqs::update))
        .route("/faqs/{id}/delete", post(faqs::delete))
        // Payments (derived view + confirmation action)
        .route("/payments", get(payments::index))
        .route("/payments/{id}/confirm", post(payments::confirm))
        // Weekly cleaning template
        .route("/cleaning", get(cleaning::index))
}
