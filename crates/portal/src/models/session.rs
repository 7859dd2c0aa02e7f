//! Session-related types.
//!
//! The session is never stored as an entity of its own: it is reconstructed
//! on every request from cookies and the persisted blob, and these are the
//! shapes that reconstruction works with.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use kostpanel_core::Role;

/// Cookie names of the session storage contract.
pub mod cookie_keys {
    /// `"true"` when a login has happened; anything else means logged out.
    pub const IS_LOGGED_IN: &str = "isLoggedIn";

    /// Role string (`ADMIN`/`TENANT`).
    pub const USER_ROLE: &str = "userRole";

    /// Room id string; empty for admins and unassigned tenants.
    pub const USER_ROOM_ID: &str = "userRoomId";

    /// Opaque bearer token for backend calls.
    pub const AUTH_TOKEN: &str = "authToken";

    /// URL-encoded JSON blob, see [`super::PersistedUser`].
    pub const USER_DATA: &str = "userData";
}

/// The persisted user blob, stored URL-encoded in the `userData` cookie.
///
/// Field names are fixed by the storage contract. The `role` stays a plain
/// string here: the blob is one of the untrusted inputs the reconciler
/// inspects, and an unknown role must degrade to "not admin" rather than
/// fail parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedUser {
    pub username: String,
    pub email: String,
    pub role: String,
    #[serde(rename = "roomId")]
    pub room_id: Option<String>,
    #[serde(rename = "loginTime")]
    pub login_time: String,
}

/// The reconciliation result: the triplet route guarding consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub logged_in: bool,
    pub is_admin: bool,
    /// Room id as stored in the cookie; empty for admins and unassigned
    /// tenants.
    pub room_id: String,
}

impl AuthSnapshot {
    /// The logged-out default.
    #[must_use]
    pub const fn logged_out() -> Self {
        Self {
            logged_in: false,
            is_admin: false,
            room_id: String::new(),
        }
    }

    /// The assigned room, if any. Empty-string means unassigned.
    #[must_use]
    pub fn room(&self) -> Option<&str> {
        if self.room_id.is_empty() {
            None
        } else {
            Some(&self.room_id)
        }
    }
}

impl Default for AuthSnapshot {
    fn default() -> Self {
        Self::logged_out()
    }
}

/// Identity reported by the backend's who-am-I endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub username: String,
    pub email: String,
    pub role: Role,
    /// Stringified room id, `None` for admins and unassigned tenants.
    pub room_id: Option<String>,
    pub phone: Option<String>,
}

/// What the session middleware hands to route handlers.
#[derive(Clone)]
pub struct CurrentSession {
    pub snapshot: AuthSnapshot,
    token: Option<SecretString>,
}

impl CurrentSession {
    /// Create a session context from a snapshot and the raw auth token.
    #[must_use]
    pub fn new(snapshot: AuthSnapshot, token: Option<String>) -> Self {
        Self {
            snapshot,
            token: token.map(SecretString::from),
        }
    }

    /// The bearer token for backend calls, if the visitor has one.
    #[must_use]
    pub fn bearer(&self) -> Option<&str> {
        self.token.as_ref().map(ExposeSecret::expose_secret)
    }
}

impl std::fmt::Debug for CurrentSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrentSession")
            .field("snapshot", &self.snapshot)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_user_uses_storage_field_names() {
        let blob = r#"{"username":"sari","email":"sari@example.com","role":"TENANT","roomId":"3","loginTime":"2026-08-07T10:00:00Z"}"#;
        let user: PersistedUser = serde_json::from_str(blob).expect("parse");
        assert_eq!(user.room_id.as_deref(), Some("3"));
        assert_eq!(user.login_time, "2026-08-07T10:00:00Z");
    }

    #[test]
    fn empty_room_id_means_unassigned() {
        let snapshot = AuthSnapshot {
            logged_in: true,
            is_admin: false,
            room_id: String::new(),
        };
        assert_eq!(snapshot.room(), None);
    }

    #[test]
    fn debug_redacts_the_token() {
        let session = CurrentSession::new(AuthSnapshot::logged_out(), Some("tok-123".to_owned()));
        let debug = format!("{session:?}");
        assert!(!debug.contains("tok-123"));
        assert!(debug.contains("[REDACTED]"));
    }
}
