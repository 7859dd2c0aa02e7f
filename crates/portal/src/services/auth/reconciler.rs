//! Session reconciliation.
//!
//! The authenticated identity lives in three overlapping places: cookie
//! flags, the persisted `userData` blob, and the backend's own opinion. This
//! module resolves them into one [`AuthSnapshot`] with a fixed precedence
//! order, as an explicit two-phase state machine:
//!
//! ```text
//! Resolving ──resolve()──▶ Optimistic ──confirm(Ok)──▶ Confirmed
//!                              │
//!                              └──confirm(Err) keeps Optimistic
//! ```
//!
//! The trust model is asymmetric on purpose: resolution is optimistic so the
//! first paint never waits on the network, and the later backend confirmation
//! may only upgrade state in place. A failing or disagreeing backend never
//! logs the user out.

use kostpanel_core::Role;

use crate::models::session::cookie_keys;
use crate::models::{AuthSnapshot, PersistedUser, VerifiedIdentity};

use super::store::SessionStore;

/// Where the machine is in the two-phase flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// `resolve` has not run yet; guards must render nothing.
    Resolving,
    /// Resolved from local storage only.
    Optimistic,
    /// The backend has confirmed (and possibly upgraded) the identity.
    Confirmed,
}

/// The session reconciliation state machine.
#[derive(Debug, Clone)]
pub struct SessionMachine {
    phase: SessionPhase,
    snapshot: AuthSnapshot,
}

impl SessionMachine {
    /// A machine that has not resolved yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: SessionPhase::Resolving,
            snapshot: AuthSnapshot::logged_out(),
        }
    }

    /// True while the snapshot is not yet usable (guards hold rendering).
    #[must_use]
    pub fn auth_loading(&self) -> bool {
        self.phase == SessionPhase::Resolving
    }

    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub const fn snapshot(&self) -> &AuthSnapshot {
        &self.snapshot
    }

    /// Resolve the snapshot from local storage. Precedence, first match wins:
    ///
    /// 1. `isLoggedIn` cookie not exactly `"true"` → logged out. Stale
    ///    role/room cookies are cleared; the persisted blob is left as-is.
    /// 2. Both `userRole` and `userRoomId` cookies present → trusted
    ///    directly.
    /// 3. Persisted blob parses as JSON → derived from it, and whichever of
    ///    the two cookies is missing is rewritten so step 2 succeeds next
    ///    time.
    /// 4. Otherwise the state is inconsistent (logged-in flag with no
    ///    identity source): logged out, and the flag cookie is removed.
    ///
    /// Calling this again on unchanged storage yields the identical
    /// snapshot.
    pub fn resolve<S: SessionStore>(&mut self, store: &mut S) -> &AuthSnapshot {
        self.snapshot = Self::resolve_snapshot(store);
        self.phase = SessionPhase::Optimistic;
        &self.snapshot
    }

    fn resolve_snapshot<S: SessionStore>(store: &mut S) -> AuthSnapshot {
        if store.cookie(cookie_keys::IS_LOGGED_IN).as_deref() != Some("true") {
            store.remove_cookie(cookie_keys::USER_ROLE);
            store.remove_cookie(cookie_keys::USER_ROOM_ID);
            return AuthSnapshot::logged_out();
        }

        let role_cookie = store.cookie(cookie_keys::USER_ROLE);
        let room_cookie = store.cookie(cookie_keys::USER_ROOM_ID);
        if let (Some(role), Some(room_id)) = (role_cookie.clone(), room_cookie.clone()) {
            return AuthSnapshot {
                logged_in: true,
                is_admin: role == Role::Admin.as_str(),
                room_id,
            };
        }

        if let Some(user) = store
            .load_blob()
            .and_then(|blob| serde_json::from_str::<PersistedUser>(&blob).ok())
        {
            let room_id = user.room_id.clone().unwrap_or_default();
            if role_cookie.is_none() {
                store.set_cookie(cookie_keys::USER_ROLE, &user.role);
            }
            if room_cookie.is_none() {
                store.set_cookie(cookie_keys::USER_ROOM_ID, &room_id);
            }
            return AuthSnapshot {
                logged_in: true,
                is_admin: user.role == Role::Admin.as_str(),
                room_id,
            };
        }

        store.remove_cookie(cookie_keys::IS_LOGGED_IN);
        AuthSnapshot::logged_out()
    }

    /// Apply the backend's who-am-I verdict.
    ///
    /// On success the reported role/room replace the local values in place
    /// (cookies and blob included) and the machine reaches `Confirmed`. A
    /// confirmation never logs the user out; a failure is swallowed and the
    /// machine stays `Optimistic`.
    pub fn confirm<S, E>(&mut self, store: &mut S, outcome: Result<VerifiedIdentity, E>)
    where
        S: SessionStore,
        E: std::fmt::Display,
    {
        let identity = match outcome {
            Ok(identity) => identity,
            Err(err) => {
                tracing::debug!(error = %err, "session verification failed; keeping optimistic state");
                return;
            }
        };

        if self.snapshot.logged_in {
            let is_admin = identity.role == Role::Admin;
            let room_id = identity.room_id.clone().unwrap_or_default();
            if is_admin != self.snapshot.is_admin || room_id != self.snapshot.room_id {
                store.set_cookie(cookie_keys::USER_ROLE, identity.role.as_str());
                store.set_cookie(cookie_keys::USER_ROOM_ID, &room_id);
                Self::rewrite_blob(store, &identity);
                self.snapshot.is_admin = is_admin;
                self.snapshot.room_id = room_id;
            }
        }
        self.phase = SessionPhase::Confirmed;
    }

    /// Replace the blob's identity fields, keeping the recorded login time.
    fn rewrite_blob<S: SessionStore>(store: &mut S, identity: &VerifiedIdentity) {
        let login_time = store
            .load_blob()
            .and_then(|blob| serde_json::from_str::<PersistedUser>(&blob).ok())
            .map(|user| user.login_time)
            .unwrap_or_default();
        let user = PersistedUser {
            username: identity.username.clone(),
            email: identity.email.clone(),
            role: identity.role.as_str().to_owned(),
            room_id: identity.room_id.clone(),
            login_time,
        };
        if let Ok(json) = serde_json::to_string(&user) {
            store.store_blob(&json);
        }
    }
}

impl Default for SessionMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::store::testing::InMemoryStore;

    const TENANT_BLOB: &str = r#"{"username":"sari","email":"sari@example.com","role":"TENANT","roomId":"3","loginTime":"2026-08-01T08:00:00Z"}"#;
    const ADMIN_BLOB: &str = r#"{"username":"bu-tuti","email":"tuti@example.com","role":"ADMIN","roomId":null,"loginTime":"2026-08-01T08:00:00Z"}"#;

    fn resolve(store: &mut InMemoryStore) -> AuthSnapshot {
        let mut machine = SessionMachine::new();
        machine.resolve(store).clone()
    }

    fn tenant_identity(room_id: Option<&str>) -> VerifiedIdentity {
        VerifiedIdentity {
            username: "sari".to_owned(),
            email: "sari@example.com".to_owned(),
            role: kostpanel_core::Role::Tenant,
            room_id: room_id.map(str::to_owned),
            phone: None,
        }
    }

    // -- step 1 ---------------------------------------------------------------

    #[test]
    fn missing_login_cookie_resolves_logged_out() {
        let mut store = InMemoryStore::new()
            .with_cookie(cookie_keys::USER_ROLE, "TENANT")
            .with_cookie(cookie_keys::USER_ROOM_ID, "3")
            .with_blob(TENANT_BLOB);

        let snapshot = resolve(&mut store);

        assert_eq!(snapshot, AuthSnapshot::logged_out());
        // Stale role/room cookies are cleared...
        assert!(!store.has_cookie(cookie_keys::USER_ROLE));
        assert!(!store.has_cookie(cookie_keys::USER_ROOM_ID));
        // ...but the blob is deliberately left in place.
        assert_eq!(store.load_blob().as_deref(), Some(TENANT_BLOB));
    }

    #[test]
    fn login_cookie_must_be_exactly_true() {
        for value in ["TRUE", "1", "yes", ""] {
            let mut store = InMemoryStore::new()
                .with_cookie(cookie_keys::IS_LOGGED_IN, value)
                .with_cookie(cookie_keys::USER_ROLE, "ADMIN")
                .with_cookie(cookie_keys::USER_ROOM_ID, "");
            assert_eq!(resolve(&mut store), AuthSnapshot::logged_out(), "{value:?}");
        }
    }

    // -- step 2 ---------------------------------------------------------------

    #[test]
    fn both_cookies_present_is_the_fast_path() {
        let mut store = InMemoryStore::new()
            .with_cookie(cookie_keys::IS_LOGGED_IN, "true")
            .with_cookie(cookie_keys::USER_ROLE, "ADMIN")
            .with_cookie(cookie_keys::USER_ROOM_ID, "");

        let snapshot = resolve(&mut store);

        assert!(snapshot.logged_in);
        assert!(snapshot.is_admin);
        assert_eq!(snapshot.room(), None);
    }

    #[test]
    fn fast_path_ignores_the_blob() {
        // Cookies win even when the blob disagrees.
        let mut store = InMemoryStore::new()
            .with_cookie(cookie_keys::IS_LOGGED_IN, "true")
            .with_cookie(cookie_keys::USER_ROLE, "TENANT")
            .with_cookie(cookie_keys::USER_ROOM_ID, "7")
            .with_blob(ADMIN_BLOB);

        let snapshot = resolve(&mut store);

        assert!(!snapshot.is_admin);
        assert_eq!(snapshot.room(), Some("7"));
    }

    // -- step 3 ---------------------------------------------------------------

    #[test]
    fn blob_fills_in_and_rewrites_missing_cookies() {
        let mut store = InMemoryStore::new()
            .with_cookie(cookie_keys::IS_LOGGED_IN, "true")
            .with_blob(TENANT_BLOB);

        let snapshot = resolve(&mut store);

        assert!(snapshot.logged_in);
        assert!(!snapshot.is_admin);
        assert_eq!(snapshot.room(), Some("3"));
        // Cookies rewritten so the next resolution takes the fast path.
        assert_eq!(store.cookie(cookie_keys::USER_ROLE).as_deref(), Some("TENANT"));
        assert_eq!(store.cookie(cookie_keys::USER_ROOM_ID).as_deref(), Some("3"));
    }

    #[test]
    fn blob_rewrites_only_the_missing_cookie() {
        let mut store = InMemoryStore::new()
            .with_cookie(cookie_keys::IS_LOGGED_IN, "true")
            .with_cookie(cookie_keys::USER_ROLE, "TENANT")
            .with_blob(TENANT_BLOB);

        resolve(&mut store);

        assert_eq!(store.cookie(cookie_keys::USER_ROLE).as_deref(), Some("TENANT"));
        assert_eq!(store.cookie(cookie_keys::USER_ROOM_ID).as_deref(), Some("3"));
    }

    #[test]
    fn blob_without_room_id_means_unassigned() {
        let mut store = InMemoryStore::new()
            .with_cookie(cookie_keys::IS_LOGGED_IN, "true")
            .with_blob(ADMIN_BLOB);

        let snapshot = resolve(&mut store);

        assert!(snapshot.is_admin);
        assert_eq!(snapshot.room(), None);
        assert_eq!(store.cookie(cookie_keys::USER_ROOM_ID).as_deref(), Some(""));
    }

    // -- step 4 ---------------------------------------------------------------

    #[test]
    fn flag_without_any_identity_source_logs_out_and_drops_the_flag() {
        let mut store = InMemoryStore::new().with_cookie(cookie_keys::IS_LOGGED_IN, "true");

        let snapshot = resolve(&mut store);

        assert_eq!(snapshot, AuthSnapshot::logged_out());
        assert!(!store.has_cookie(cookie_keys::IS_LOGGED_IN));
    }

    #[test]
    fn unparseable_blob_counts_as_no_source() {
        let mut store = InMemoryStore::new()
            .with_cookie(cookie_keys::IS_LOGGED_IN, "true")
            .with_blob("{not json");

        let snapshot = resolve(&mut store);

        assert_eq!(snapshot, AuthSnapshot::logged_out());
        assert!(!store.has_cookie(cookie_keys::IS_LOGGED_IN));
    }

    // -- idempotence ----------------------------------------------------------

    #[test]
    fn resolving_twice_yields_the_identical_snapshot() {
        let combos = [
            InMemoryStore::new(),
            InMemoryStore::new()
                .with_cookie(cookie_keys::IS_LOGGED_IN, "true")
                .with_cookie(cookie_keys::USER_ROLE, "TENANT")
                .with_cookie(cookie_keys::USER_ROOM_ID, "3"),
            InMemoryStore::new()
                .with_cookie(cookie_keys::IS_LOGGED_IN, "true")
                .with_blob(TENANT_BLOB),
            InMemoryStore::new().with_cookie(cookie_keys::IS_LOGGED_IN, "true"),
        ];
        for mut store in combos {
            let first = resolve(&mut store);
            let second = resolve(&mut store);
            assert_eq!(first, second);
        }
    }

    // -- phases ---------------------------------------------------------------

    #[test]
    fn phases_advance_resolving_optimistic_confirmed() {
        let mut store = InMemoryStore::new()
            .with_cookie(cookie_keys::IS_LOGGED_IN, "true")
            .with_cookie(cookie_keys::USER_ROLE, "TENANT")
            .with_cookie(cookie_keys::USER_ROOM_ID, "3");

        let mut machine = SessionMachine::new();
        assert!(machine.auth_loading());
        assert_eq!(machine.phase(), SessionPhase::Resolving);

        machine.resolve(&mut store);
        assert!(!machine.auth_loading());
        assert_eq!(machine.phase(), SessionPhase::Optimistic);

        machine.confirm::<_, BoxedErr>(&mut store, Ok(tenant_identity(Some("3"))));
        assert_eq!(machine.phase(), SessionPhase::Confirmed);
    }

    type BoxedErr = Box<dyn std::error::Error>;

    // -- confirmation ---------------------------------------------------------

    #[test]
    fn confirm_failure_is_swallowed_and_stays_optimistic() {
        let mut store = InMemoryStore::new()
            .with_cookie(cookie_keys::IS_LOGGED_IN, "true")
            .with_cookie(cookie_keys::USER_ROLE, "TENANT")
            .with_cookie(cookie_keys::USER_ROOM_ID, "3");

        let mut machine = SessionMachine::new();
        let before = machine.resolve(&mut store).clone();
        let store_before = store.clone();

        machine.confirm::<_, BoxedErr>(&mut store, Err("connection refused".into()));

        assert_eq!(machine.snapshot(), &before);
        assert_eq!(machine.phase(), SessionPhase::Optimistic);
        assert_eq!(store, store_before);
    }

    #[test]
    fn confirm_upgrades_role_and_room_in_place() {
        let mut store = InMemoryStore::new()
            .with_cookie(cookie_keys::IS_LOGGED_IN, "true")
            .with_cookie(cookie_keys::USER_ROLE, "TENANT")
            .with_cookie(cookie_keys::USER_ROOM_ID, "3")
            .with_blob(TENANT_BLOB);

        let mut machine = SessionMachine::new();
        machine.resolve(&mut store);

        // Backend says the tenant has moved to room 5.
        machine.confirm::<_, BoxedErr>(&mut store, Ok(tenant_identity(Some("5"))));

        assert_eq!(machine.snapshot().room(), Some("5"));
        assert_eq!(store.cookie(cookie_keys::USER_ROOM_ID).as_deref(), Some("5"));
        let blob: crate::models::PersistedUser =
            serde_json::from_str(&store.load_blob().expect("blob")).expect("parse");
        assert_eq!(blob.room_id.as_deref(), Some("5"));
        // The recorded login time survives the rewrite.
        assert_eq!(blob.login_time, "2026-08-01T08:00:00Z");
    }

    #[test]
    fn confirm_never_logs_out() {
        // Disagreement on everything still leaves the user logged in.
        let mut store = InMemoryStore::new()
            .with_cookie(cookie_keys::IS_LOGGED_IN, "true")
            .with_cookie(cookie_keys::USER_ROLE, "ADMIN")
            .with_cookie(cookie_keys::USER_ROOM_ID, "");

        let mut machine = SessionMachine::new();
        machine.resolve(&mut store);
        machine.confirm::<_, BoxedErr>(&mut store, Ok(tenant_identity(None)));

        assert!(machine.snapshot().logged_in);
        assert!(!machine.snapshot().is_admin);
        assert_eq!(store.cookie(cookie_keys::IS_LOGGED_IN).as_deref(), Some("true"));
    }

    #[test]
    fn confirm_on_logged_out_snapshot_touches_nothing() {
        let mut store = InMemoryStore::new();
        let mut machine = SessionMachine::new();
        machine.resolve(&mut store);
        let store_before = store.clone();

        machine.confirm::<_, BoxedErr>(&mut store, Ok(tenant_identity(Some("3"))));

        assert!(!machine.snapshot().logged_in);
        assert_eq!(store, store_before);
    }

    #[test]
    fn agreeing_confirmation_writes_nothing() {
        let mut store = InMemoryStore::new()
            .with_cookie(cookie_keys::IS_LOGGED_IN, "true")
            .with_cookie(cookie_keys::USER_ROLE, "TENANT")
            .with_cookie(cookie_keys::USER_ROOM_ID, "3")
            .with_blob(TENANT_BLOB);

        let mut machine = SessionMachine::new();
        machine.resolve(&mut store);
        let store_before = store.clone();

        machine.confirm::<_, BoxedErr>(&mut store, Ok(tenant_identity(Some("3"))));

        assert_eq!(machine.phase(), SessionPhase::Confirmed);
        assert_eq!(store, store_before);
    }
}
