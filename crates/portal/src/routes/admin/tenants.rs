//! Admin tenant CRUD and password resets.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use std::str::FromStr;

use kostpanel_core::{Role, User, UserId, validate_password};

use crate::backend::types::UserPayload;
use crate::middleware::RequireAdmin;
use crate::services::auth::AuthService;
use crate::state::AppState;

use super::super::{MessageQuery, none_if_empty, redirect_with_error, redirect_with_success};

// =============================================================================
// Form Types
// =============================================================================

/// Tenant create form data.
#[derive(Debug, Deserialize)]
pub struct NewTenantForm {
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    /// Empty string means unassigned.
    pub room_id: String,
    pub password: String,
    pub password_confirm: String,
}

/// Tenant edit form data.
#[derive(Debug, Deserialize)]
pub struct EditTenantForm {
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    /// Empty string means unassigned.
    pub room_id: String,
}

/// Password reset form data.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordForm {
    pub password: String,
    pub password_confirm: String,
}

fn parse_room_field(raw: &str) -> Result<Option<i64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|_| "Nomor kamar harus berupa angka".to_owned())
}

// =============================================================================
// Templates
// =============================================================================

/// Tenant list + create form.
#[derive(Template, WebTemplate)]
#[template(path = "admin/tenants.html")]
pub struct AdminTenantsTemplate {
    pub users: Vec<User>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Tenant edit form (with the password-reset form alongside).
#[derive(Template, WebTemplate)]
#[template(path = "admin/tenant_edit.html")]
pub struct AdminTenantEditTemplate {
    pub user: User,
    pub room_field: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// List users with the create form.
pub async fn index(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> AdminTenantsTemplate {
    let (users, fetch_error) = match session.bearer() {
        Some(token) => match state.backend().list_users(token).await {
            Ok(users) => (users, None),
            Err(err) => (Vec::new(), Some(err.alert_text())),
        },
        None => (Vec::new(), None),
    };

    AdminTenantsTemplate {
        users,
        error: query.error.or(fetch_error),
        success: query.success,
    }
}

/// Create a tenant account.
pub async fn create(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    axum::Form(form): axum::Form<NewTenantForm>,
) -> Response {
    let Some(token) = session.bearer() else {
        return Redirect::to("/").into_response();
    };

    if let Err(policy) = validate_password(&form.password, &form.password_confirm) {
        return redirect_with_error("/admin/tenants", &policy.to_string()).into_response();
    }
    let room_id = match parse_room_field(&form.room_id) {
        Ok(room_id) => room_id,
        Err(message) => return redirect_with_error("/admin/tenants", &message).into_response(),
    };

    let payload = UserPayload {
        username: form.username,
        email: form.email,
        phone: form.phone.and_then(none_if_empty),
        role: Role::Tenant.as_str().to_owned(),
        room_id,
        password: Some(form.password),
    };

    match state.backend().create_user(token, &payload).await {
        Ok(user) => redirect_with_success(
            "/admin/tenants",
            &format!("Penghuni {} ditambahkan", user.username),
        )
        .into_response(),
        Err(err) => redirect_with_error("/admin/tenants", &err.alert_text()).into_response(),
    }
}

/// Show the edit form for one user.
pub async fn edit_page(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<MessageQuery>,
) -> Response {
    let Some(token) = session.bearer() else {
        return Redirect::to("/").into_response();
    };

    match state.backend().get_user(token, UserId::new(id)).await {
        Ok(user) => {
            let room_field = user
                .room_id
                .map(|room| room.to_string())
                .unwrap_or_default();
            AdminTenantEditTemplate {
                user,
                room_field,
                error: query.error,
                success: query.success,
            }
            .into_response()
        }
        Err(err) => redirect_with_error("/admin/tenants", &err.alert_text()).into_response(),
    }
}

/// Update a user.
pub async fn update(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    axum::Form(form): axum::Form<EditTenantForm>,
) -> Response {
    let Some(token) = session.bearer() else {
        return Redirect::to("/").into_response();
    };

    let edit_url = format!("/admin/tenants/{id}/edit");
    let Ok(role) = Role::from_str(&form.role) else {
        return redirect_with_error(&edit_url, "Role tidak dikenal").into_response();
    };
    let room_id = match parse_room_field(&form.room_id) {
        Ok(room_id) => room_id,
        Err(message) => return redirect_with_error(&edit_url, &message).into_response(),
    };

    let payload = UserPayload {
        username: form.username,
        email: form.email,
        phone: form.phone.and_then(none_if_empty),
        role: role.as_str().to_owned(),
        room_id,
        password: None,
    };

    match state.backend().update_user(token, UserId::new(id), &payload).await {
        Ok(user) => redirect_with_success(
            "/admin/tenants",
            &format!("Penghuni {} diperbarui", user.username),
        )
        .into_response(),
        Err(err) => redirect_with_error(&edit_url, &err.alert_text()).into_response(),
    }
}

/// Delete a user.
pub async fn delete(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Response {
    let Some(token) = session.bearer() else {
        return Redirect::to("/").into_response();
    };

    match state.backend().delete_user(token, UserId::new(id)).await {
        Ok(()) => redirect_with_success("/admin/tenants", "Penghuni dihapus").into_response(),
        Err(err) => redirect_with_error("/admin/tenants", &err.alert_text()).into_response(),
    }
}

/// Admin-initiated password reset.
///
/// The policy violations come back as one alert listing every broken rule.
pub async fn reset_password(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    axum::Form(form): axum::Form<ResetPasswordForm>,
) -> Response {
    let Some(token) = session.bearer() else {
        return Redirect::to("/").into_response();
    };

    let edit_url = format!("/admin/tenants/{id}/edit");
    let service = AuthService::new(state.backend());
    match service
        .reset_password(token, UserId::new(id), &form.password, &form.password_confirm)
        .await
    {
        Ok(_) => redirect_with_success(&edit_url, "Password diganti").into_response(),
        Err(err) => redirect_with_error(&edit_url, &err.alert_text()).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_room_field_means_unassigned() {
        assert_eq!(parse_room_field(""), Ok(None));
        assert_eq!(parse_room_field("  "), Ok(None));
    }

    #[test]
    fn numeric_room_field_parses() {
        assert_eq!(parse_room_field("12"), Ok(Some(12)));
    }

    #[test]
    fn garbage_room_field_is_rejected() {
        assert!(parse_room_field("A-01").is_err());
    }
}
