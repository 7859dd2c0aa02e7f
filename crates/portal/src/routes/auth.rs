//! Authentication route handlers.
//!
//! Login, logout and tenant self-registration. The landing page at `/` is
//! the login form; logged-in visitors are bounced straight to their surface.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use kostpanel_core::Role;

use crate::middleware::{OptionalAuth, SessionHandle};
use crate::services::auth::{AuthService, persist_session};
use crate::state::AppState;

use super::{MessageQuery, none_if_empty, redirect_with_error, redirect_with_success};

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub password_confirm: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Registration page template.
#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Where a fresh or already-logged-in session lands.
fn surface_for(is_admin: bool) -> &'static str {
    if is_admin { "/admin" } else { "/home" }
}

/// Display the login page, or bounce logged-in visitors to their surface.
pub async fn login_page(
    OptionalAuth(snapshot): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    if snapshot.logged_in {
        return Redirect::to(surface_for(snapshot.is_admin)).into_response();
    }
    LoginTemplate {
        error: query.error,
        success: query.success,
    }
    .into_response()
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    store: SessionHandle,
    axum::Form(form): axum::Form<LoginForm>,
) -> Response {
    let service = AuthService::new(state.backend());
    match service.login(&form.username, &form.password).await {
        Ok((token, identity)) => {
            let destination = surface_for(identity.role == Role::Admin);
            store.with(|s| persist_session(s, &token, &identity));
            Redirect::to(destination).into_response()
        }
        Err(err) => {
            tracing::warn!(username = %form.username, error = %err, "login failed");
            redirect_with_error("/", &err.alert_text()).into_response()
        }
    }
}

/// Handle logout.
///
/// Drops the session cookies; the persisted `userData` blob stays behind.
pub async fn logout(store: SessionHandle) -> Redirect {
    store.with(AuthService::logout);
    Redirect::to("/")
}

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> RegisterTemplate {
    RegisterTemplate { error: query.error }
}

/// Handle registration form submission.
pub async fn register(
    State(state): State<AppState>,
    axum::Form(form): axum::Form<RegisterForm>,
) -> Response {
    let service = AuthService::new(state.backend());
    let phone = form.phone.and_then(none_if_empty);
    match service
        .register(
            &form.username,
            &form.email,
            phone.as_deref(),
            &form.password,
            &form.password_confirm,
        )
        .await
    {
        Ok(user) => {
            tracing::info!(username = %user.username, "tenant registered");
            redirect_with_success("/", "Registrasi berhasil, silakan login").into_response()
        }
        Err(err) => redirect_with_error("/register", &err.alert_text()).into_response(),
    }
}
