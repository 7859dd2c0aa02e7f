//! Authentication service.
//!
//! Login, logout, registration and admin-initiated password resets. The
//! actual credential check lives in the backend; this service orchestrates
//! the calls and owns every write to the session storage.

mod error;
pub mod reconciler;
pub mod store;

pub use error::AuthError;
pub use reconciler::{SessionMachine, SessionPhase};
pub use store::SessionStore;

use chrono::{SecondsFormat, Utc};

use kostpanel_core::{Role, User, UserId, validate_password};

use crate::backend::types::UserPayload;
use crate::backend::{BackendClient, BackendError};
use crate::models::session::cookie_keys;
use crate::models::{PersistedUser, VerifiedIdentity};

/// Authentication flows over the backend client and a session store.
pub struct AuthService<'a> {
    backend: &'a BackendClient,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(backend: &'a BackendClient) -> Self {
        Self { backend }
    }

    /// Log in against the backend.
    ///
    /// Returns the bearer token and the identity behind it. The caller
    /// persists them with [`persist_session`] (session writes are
    /// synchronous; backend calls are not, and the store must not be held
    /// across them).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the backend rejects the
    /// pair, or `AuthError::Backend` for transport-level failures.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(String, VerifiedIdentity), AuthError> {
        let token = self
            .backend
            .login(username, password)
            .await
            .map_err(|err| match err {
                BackendError::Status {
                    status: 400 | 401 | 403,
                    ..
                } => AuthError::InvalidCredentials,
                other => AuthError::Backend(other),
            })?;

        let identity = self.backend.user_info(&token).await?;
        Ok((token, identity))
    }

    /// Log out: drop the session cookies.
    ///
    /// The `userData` blob is deliberately left behind; only the cookies go.
    pub fn logout<S: SessionStore>(store: &mut S) {
        store.remove_cookie(cookie_keys::IS_LOGGED_IN);
        store.remove_cookie(cookie_keys::USER_ROLE);
        store.remove_cookie(cookie_keys::USER_ROOM_ID);
        store.remove_cookie(cookie_keys::AUTH_TOKEN);
    }

    /// Register a new tenant account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Policy` when the password violates the policy
    /// (every violated rule listed), or `AuthError::Backend` when the backend
    /// rejects the registration.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        phone: Option<&str>,
        password: &str,
        confirmation: &str,
    ) -> Result<User, AuthError> {
        validate_password(password, confirmation)?;

        let payload = UserPayload {
            username: username.to_owned(),
            email: email.to_owned(),
            phone: phone.map(str::to_owned),
            role: Role::Tenant.as_str().to_owned(),
            room_id: None,
            password: Some(password.to_owned()),
        };
        Ok(self.backend.register(&payload).await?)
    }

    /// Admin-initiated tenant password reset.
    ///
    /// Runs the shared password policy first, then replays the user record
    /// with the new password through the backend's update endpoint.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Policy` listing every violated rule, or
    /// `AuthError::Backend` on wire failures.
    pub async fn reset_password(
        &self,
        token: &str,
        user_id: UserId,
        password: &str,
        confirmation: &str,
    ) -> Result<User, AuthError> {
        validate_password(password, confirmation)?;

        let user = self.backend.get_user(token, user_id).await?;
        let payload = UserPayload {
            username: user.username,
            email: user.email,
            phone: user.phone,
            role: user.role.as_str().to_owned(),
            room_id: user.room_id.map(Into::into),
            password: Some(password.to_owned()),
        };
        Ok(self.backend.update_user(token, user_id, &payload).await?)
    }
}

/// Write the cookies and blob a fresh login produces, so the next
/// reconciliation takes the fast path.
pub fn persist_session<S: SessionStore>(store: &mut S, token: &str, identity: &VerifiedIdentity) {
    let room_id = identity.room_id.clone().unwrap_or_default();
    store.set_cookie(cookie_keys::IS_LOGGED_IN, "true");
    store.set_cookie(cookie_keys::USER_ROLE, identity.role.as_str());
    store.set_cookie(cookie_keys::USER_ROOM_ID, &room_id);
    store.set_cookie(cookie_keys::AUTH_TOKEN, token);

    let user = PersistedUser {
        username: identity.username.clone(),
        email: identity.email.clone(),
        role: identity.role.as_str().to_owned(),
        room_id: identity.room_id.clone(),
        login_time: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    };
    if let Ok(json) = serde_json::to_string(&user) {
        store.store_blob(&json);
    }
}

#[cfg(test)]
mod tests {
    use super::store::testing::InMemoryStore;
    use super::*;

    fn identity() -> VerifiedIdentity {
        VerifiedIdentity {
            username: "sari".to_owned(),
            email: "sari@example.com".to_owned(),
            role: Role::Tenant,
            room_id: Some("3".to_owned()),
            phone: None,
        }
    }

    #[test]
    fn persist_session_writes_all_four_cookies_and_the_blob() {
        let mut store = InMemoryStore::new();
        persist_session(&mut store, "tok-abc", &identity());

        assert_eq!(store.cookie(cookie_keys::IS_LOGGED_IN).as_deref(), Some("true"));
        assert_eq!(store.cookie(cookie_keys::USER_ROLE).as_deref(), Some("TENANT"));
        assert_eq!(store.cookie(cookie_keys::USER_ROOM_ID).as_deref(), Some("3"));
        assert_eq!(store.cookie(cookie_keys::AUTH_TOKEN).as_deref(), Some("tok-abc"));

        let blob: PersistedUser =
            serde_json::from_str(&store.load_blob().expect("blob")).expect("parse");
        assert_eq!(blob.username, "sari");
        assert_eq!(blob.room_id.as_deref(), Some("3"));
        assert!(!blob.login_time.is_empty());
    }

    #[test]
    fn logout_drops_cookies_but_keeps_the_blob() {
        let mut store = InMemoryStore::new();
        persist_session(&mut store, "tok-abc", &identity());

        AuthService::logout(&mut store);

        assert!(!store.has_cookie(cookie_keys::IS_LOGGED_IN));
        assert!(!store.has_cookie(cookie_keys::USER_ROLE));
        assert!(!store.has_cookie(cookie_keys::USER_ROOM_ID));
        assert!(!store.has_cookie(cookie_keys::AUTH_TOKEN));
        assert!(store.load_blob().is_some());
    }
}
