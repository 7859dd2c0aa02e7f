//! Tenant management commands.

use kostpanel_core::UserId;
use kostpanel_portal::backend::BackendClient;
use kostpanel_portal::services::auth::AuthService;

/// Reset a tenant's password through the backend.
///
/// The shared password policy runs first, so a weak password never reaches
/// the wire; every violated rule is reported at once.
pub async fn reset_password(
    backend: &BackendClient,
    token: &str,
    id: i64,
    password: &str,
    confirm: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let confirmation = confirm.unwrap_or(password);
    let service = AuthService::new(backend);
    let user = service
        .reset_password(token, UserId::new(id), password, confirmation)
        .await?;
    tracing::info!(username = %user.username, "password reset");
    Ok(())
}
