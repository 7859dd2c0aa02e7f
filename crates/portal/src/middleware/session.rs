//! Session middleware.
//!
//! Runs the session reconciliation on every request: builds a cookie-backed
//! [`SessionStore`], resolves the optimistic snapshot, applies any parked
//! backend confirmation, schedules the delayed background verification, and
//! merges cookie mutations into the response.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::{HeaderMap, StatusCode, request::Parts};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::backend::BackendError;
use crate::models::CurrentSession;
use crate::models::session::cookie_keys;
use crate::services::auth::{SessionMachine, SessionStore};
use crate::state::AppState;

/// Session cookie lifetime.
const COOKIE_MAX_AGE_DAYS: i64 = 7;

/// [`SessionStore`] adapter over the request's cookie jar.
///
/// This is the only place in the portal that touches cookie primitives.
/// Mutations accumulate in the jar and become `Set-Cookie` headers when the
/// jar is merged into the response.
pub struct CookieSessionStore {
    jar: CookieJar,
}

impl CookieSessionStore {
    /// Build the store from request headers.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            jar: CookieJar::from_headers(headers),
        }
    }

    /// Hand the jar (with any mutations) back for the response.
    #[must_use]
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }

    fn session_cookie(name: &str, value: &str) -> Cookie<'static> {
        let mut cookie = Cookie::new(name.to_owned(), value.to_owned());
        cookie.set_path("/");
        cookie.set_same_site(SameSite::Lax);
        cookie.set_max_age(time::Duration::days(COOKIE_MAX_AGE_DAYS));
        cookie
    }

    fn removal_cookie(name: &str) -> Cookie<'static> {
        let mut cookie = Cookie::new(name.to_owned(), "");
        cookie.set_path("/");
        cookie
    }
}

impl SessionStore for CookieSessionStore {
    fn cookie(&self, name: &str) -> Option<String> {
        self.jar.get(name).map(|cookie| cookie.value().to_owned())
    }

    fn set_cookie(&mut self, name: &str, value: &str) {
        self.jar = self.jar.clone().add(Self::session_cookie(name, value));
    }

    fn remove_cookie(&mut self, name: &str) {
        self.jar = self.jar.clone().remove(Self::removal_cookie(name));
    }

    fn load_blob(&self) -> Option<String> {
        let encoded = self.cookie(cookie_keys::USER_DATA)?;
        urlencoding::decode(&encoded).ok().map(Into::into)
    }

    fn store_blob(&mut self, json: &str) {
        let encoded = urlencoding::encode(json).into_owned();
        self.set_cookie(cookie_keys::USER_DATA, &encoded);
    }
}

/// The request's one [`CookieSessionStore`], shared between the middleware
/// and handlers.
///
/// The middleware owns the store's lifecycle; handlers that mutate the
/// session (login, logout) borrow it through [`SessionHandle::with`], and the
/// middleware flushes the accumulated cookie mutations into the response.
/// This keeps a single writer per request - there is no second jar whose
/// `Set-Cookie` headers could race the reconciler's.
#[derive(Clone)]
pub struct SessionHandle(Arc<Mutex<CookieSessionStore>>);

impl SessionHandle {
    fn new(store: CookieSessionStore) -> Self {
        Self(Arc::new(Mutex::new(store)))
    }

    /// Run a closure over the store. Synchronous on purpose: the store must
    /// never be held across an await.
    pub fn with<R>(&self, f: impl FnOnce(&mut CookieSessionStore) -> R) -> R {
        let mut store = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }

    /// Snapshot the jar with all mutations applied so far.
    fn jar(&self) -> CookieJar {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .jar
            .clone()
    }
}

impl<S> FromRequestParts<S> for SessionHandle
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Reconcile the session around a request.
///
/// The snapshot the handlers see is the optimistic one: the backend
/// verification runs afterwards (1 s delay, 3 s timeout) and its result is
/// parked in [`AppState`] to be applied by the next request's resolution.
pub async fn reconcile_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let mut store = CookieSessionStore::from_headers(request.headers());
    let mut machine = SessionMachine::new();
    machine.resolve(&mut store);

    let token = store.cookie(cookie_keys::AUTH_TOKEN);
    if machine.snapshot().logged_in {
        if let Some(token) = token.clone() {
            if let Some(identity) = state.take_verified(&token) {
                machine.confirm::<_, BackendError>(&mut store, Ok(identity));
            } else {
                spawn_verification(state.clone(), token);
            }
        }
    }

    let handle = SessionHandle::new(store);
    let session = CurrentSession::new(machine.snapshot().clone(), token);
    request.extensions_mut().insert(handle.clone());
    request.extensions_mut().insert(session);

    let response = next.run(request).await;
    (handle.jar(), response).into_response()
}

/// Schedule the delayed who-am-I verification.
///
/// Failures and timeouts are swallowed: the user is never logged out because
/// this call went wrong.
fn spawn_verification(state: AppState, token: String) {
    tokio::spawn(async move {
        let delay = Duration::from_millis(state.config().verify_delay_ms);
        let timeout = Duration::from_millis(state.config().verify_timeout_ms);
        tokio::time::sleep(delay).await;
        match tokio::time::timeout(timeout, state.backend().user_info(&token)).await {
            Ok(Ok(identity)) => state.record_verified(token, identity),
            Ok(Err(err)) => {
                tracing::debug!(error = %err, "background session verification failed");
            }
            Err(_) => tracing::debug!("background session verification timed out"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    fn store_from(cookie_header: &str) -> CookieSessionStore {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, cookie_header.parse().expect("header"));
        CookieSessionStore::from_headers(&headers)
    }

    #[test]
    fn reads_cookies_from_the_request_header() {
        let store = store_from("isLoggedIn=true; userRole=ADMIN");
        assert_eq!(store.cookie(cookie_keys::IS_LOGGED_IN).as_deref(), Some("true"));
        assert_eq!(store.cookie(cookie_keys::USER_ROLE).as_deref(), Some("ADMIN"));
        assert_eq!(store.cookie(cookie_keys::USER_ROOM_ID), None);
    }

    #[test]
    fn set_cookie_carries_the_session_attributes() {
        let mut store = store_from("");
        store.set_cookie(cookie_keys::USER_ROLE, "TENANT");

        let jar = store.into_jar();
        let cookie = jar.get(cookie_keys::USER_ROLE).expect("cookie");
        assert_eq!(cookie.value(), "TENANT");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(
            cookie.max_age(),
            Some(time::Duration::days(COOKIE_MAX_AGE_DAYS))
        );
    }

    #[test]
    fn blob_round_trips_through_url_encoding() {
        let json = r#"{"username":"sari","roomId":"3"}"#;
        let mut store = store_from("");
        store.store_blob(json);

        // The raw cookie value is URL-encoded...
        let encoded = store.cookie(cookie_keys::USER_DATA).expect("cookie");
        assert!(!encoded.contains('{'));
        // ...and decodes back to the original JSON.
        assert_eq!(store.load_blob().as_deref(), Some(json));
    }
}
