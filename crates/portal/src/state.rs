//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use crate::backend::BackendClient;
use crate::config::PortalConfig;
use crate::models::VerifiedIdentity;

/// How long a parked backend confirmation stays applicable.
const VERIFIED_TTL: Duration = Duration::from_secs(300);

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: PortalConfig,
    backend: BackendClient,
    /// Identities the background verification has confirmed, keyed by auth
    /// token. The next resolution for that token applies and removes the
    /// entry.
    verified: Cache<String, VerifiedIdentity>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: PortalConfig) -> Self {
        let backend = BackendClient::new(config.backend_url.clone());
        Self::with_backend(config, backend)
    }

    /// Create state over an existing backend client (used by tests).
    #[must_use]
    pub fn with_backend(config: PortalConfig, backend: BackendClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                verified: Cache::builder()
                    .max_capacity(10_000)
                    .time_to_live(VERIFIED_TTL)
                    .build(),
            }),
        }
    }

    /// Get a reference to the portal configuration.
    #[must_use]
    pub fn config(&self) -> &PortalConfig {
        &self.inner.config
    }

    /// Get a reference to the backend client.
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    /// Park a backend-confirmed identity for the next resolution.
    pub fn record_verified(&self, token: String, identity: VerifiedIdentity) {
        self.inner.verified.insert(token, identity);
    }

    /// Take (and drop) the parked confirmation for a token, if any.
    #[must_use]
    pub fn take_verified(&self, token: &str) -> Option<VerifiedIdentity> {
        let identity = self.inner.verified.get(token);
        if identity.is_some() {
            self.inner.verified.invalidate(token);
        }
        identity
    }
}
