//! Route guarding.
//!
//! The guard contract is a pure decision over the reconciled snapshot:
//! render nothing while resolution is in flight, send logged-out visitors to
//! the login page at `/`, send non-admins away from admin-only pages to
//! `/home`, and let everything else through. The extractors apply that
//! decision to requests; the decision function itself stays testable without
//! any HTTP.

use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};
use axum::response::{IntoResponse, Redirect, Response};

use crate::models::{AuthSnapshot, CurrentSession};

/// Inputs of the guard decision.
#[derive(Debug, Clone, Copy)]
pub struct GuardInput {
    /// Still resolving the session.
    pub auth_loading: bool,
    pub logged_in: bool,
    pub is_admin: bool,
    /// The guarded subtree requires the admin role.
    pub admin_only: bool,
}

/// What the guard does with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Render nothing yet.
    Hold,
    /// Redirect to the login page at `/`.
    RedirectRoot,
    /// Redirect to the tenant home.
    RedirectHome,
    /// Render the guarded subtree.
    Allow,
}

/// Decide what happens to a guarded request.
#[must_use]
pub const fn decide(input: GuardInput) -> GuardOutcome {
    if input.auth_loading {
        return GuardOutcome::Hold;
    }
    if !input.logged_in {
        return GuardOutcome::RedirectRoot;
    }
    if input.admin_only && !input.is_admin {
        return GuardOutcome::RedirectHome;
    }
    GuardOutcome::Allow
}

/// Rejection produced when a guard does not allow the request.
pub enum GuardRejection {
    /// Redirect to the login page.
    RedirectRoot,
    /// Redirect to the tenant home.
    RedirectHome,
    /// Session middleware did not run; nothing sensible to render.
    Unavailable,
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectRoot => Redirect::to("/").into_response(),
            Self::RedirectHome => Redirect::to("/home").into_response(),
            Self::Unavailable => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

fn guard(parts: &Parts, admin_only: bool) -> Result<CurrentSession, GuardRejection> {
    // Set by the session middleware; by the time a handler runs, resolution
    // has completed, so auth_loading is false here.
    let session = parts
        .extensions
        .get::<CurrentSession>()
        .ok_or(GuardRejection::Unavailable)?;

    let outcome = decide(GuardInput {
        auth_loading: false,
        logged_in: session.snapshot.logged_in,
        is_admin: session.snapshot.is_admin,
        admin_only,
    });
    match outcome {
        GuardOutcome::Allow => Ok(session.clone()),
        GuardOutcome::RedirectHome => Err(GuardRejection::RedirectHome),
        GuardOutcome::RedirectRoot | GuardOutcome::Hold => Err(GuardRejection::RedirectRoot),
    }
}

/// Extractor that requires a logged-in session (tenant or admin).
///
/// # Example
///
/// ```rust,ignore
/// async fn my_room(RequireAuth(session): RequireAuth) -> impl IntoResponse {
///     format!("room {:?}", session.snapshot.room())
/// }
/// ```
pub struct RequireAuth(pub CurrentSession);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = GuardRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        guard(parts, false).map(Self)
    }
}

/// Extractor that requires a logged-in admin session.
pub struct RequireAdmin(pub CurrentSession);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = GuardRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        guard(parts, true).map(Self)
    }
}

/// Extractor that exposes the session without rejecting anyone.
pub struct OptionalAuth(pub AuthSnapshot);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let snapshot = parts
            .extensions
            .get::<CurrentSession>()
            .map_or_else(AuthSnapshot::logged_out, |session| session.snapshot.clone());
        Ok(Self(snapshot))
    }
}
