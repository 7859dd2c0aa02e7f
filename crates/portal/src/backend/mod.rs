//! Client for the kost REST backend.
//!
//! # Architecture
//!
//! - The backend is the source of truth - NO local sync, direct API calls
//! - Wire DTOs mirror the backend JSON; [`conversions`] is the typed decode
//!   boundary
//! - Low-churn FAQ and rule lists are cached in-memory via `moka`
//!   (5 minute TTL, invalidated by their own mutations); everything else is
//!   fetched fresh so CRUD screens never show stale data
//! - Only the who-am-I verification call is bounded by a timeout, and that
//!   timeout lives with its caller; all other calls are unbounded
//!
//! # Example
//!
//! ```rust,ignore
//! use kostpanel_portal::backend::BackendClient;
//!
//! let backend = BackendClient::new(config.backend_url.clone());
//! let token = backend.login("admin", "Rahasia1").await?;
//! let rooms = backend.list_rooms(&token).await?;
//! ```

pub mod conversions;
pub mod types;

pub use conversions::DecodeError;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use kostpanel_core::{
    Announcement, AnnouncementId, CleaningAssignment, Faq, FaqId, Room, RoomId, Rule, RuleId,
    User, UserId,
};

use crate::models::VerifiedIdentity;
use conversions::{
    announcement_from_wire, cleaning_from_wire, faq_from_wire, identity_from_wire, room_from_wire,
    rule_from_wire, user_from_wire,
};
use types::{
    AnnouncementPayload, AnnouncementWire, CleaningWire, FaqPayload, FaqWire, LoginWire,
    RoomPayload, RoomWire, RulePayload, RuleWire, TokenWire, UserInfoWire, UserPayload, UserWire,
};

/// TTL for the FAQ and rule list caches.
const LIST_CACHE_TTL: Duration = Duration::from_secs(300);

/// Errors that can occur when talking to the kost backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed (transport or body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status and an error-text body.
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// A payload field failed the typed decode boundary.
    #[error("{0}")]
    Decode(#[from] DecodeError),

    /// A path could not be joined onto the base URL.
    #[error("invalid backend URL: {0}")]
    Url(#[from] url::ParseError),
}

impl BackendError {
    /// The message to surface in a page-level alert.
    ///
    /// Non-2xx bodies are arbitrary error text from the backend and are shown
    /// as-is; transport and decode problems get a generic message.
    #[must_use]
    pub fn alert_text(&self) -> String {
        match self {
            Self::Status { body, .. } if !body.is_empty() => body.clone(),
            Self::Status { status, .. } => format!("Permintaan gagal (HTTP {status})"),
            Self::Http(_) | Self::Url(_) => "Tidak dapat menghubungi server".to_owned(),
            Self::Decode(_) => "Data dari server tidak valid".to_owned(),
        }
    }
}

/// Client for the kost REST backend.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    http: reqwest::Client,
    base_url: Url,
    faq_cache: Cache<(), Arc<Vec<Faq>>>,
    rule_cache: Cache<(), Arc<Vec<Rule>>>,
}

impl BackendClient {
    /// Create a new backend client.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self::from_reqwest(base_url, reqwest::Client::new())
    }

    /// Create a client over an existing `reqwest::Client` (used by tests).
    #[must_use]
    pub fn from_reqwest(base_url: Url, http: reqwest::Client) -> Self {
        Self {
            inner: Arc::new(BackendClientInner {
                http,
                base_url,
                faq_cache: Cache::builder()
                    .max_capacity(1)
                    .time_to_live(LIST_CACHE_TTL)
                    .build(),
                rule_cache: Cache::builder()
                    .max_capacity(1)
                    .time_to_live(LIST_CACHE_TTL)
                    .build(),
            }),
        }
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// `BackendError::Status` carries the backend's error text on bad
    /// credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, BackendError> {
        let url = self.endpoint("/api/auth/login")?;
        let body = LoginWire { username, password };
        let token: TokenWire = self.send(self.inner.http.post(url).json(&body)).await?;
        Ok(token.token)
    }

    /// Fetch the identity behind a token ("who am I").
    ///
    /// Deliberately carries no timeout of its own: the background
    /// reconciliation driver wraps it in the configured timeout.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-2xx responses, or an unknown role.
    pub async fn user_info(&self, token: &str) -> Result<VerifiedIdentity, BackendError> {
        let url = self.endpoint("/api/auth/user-info")?;
        let wire: UserInfoWire = self
            .send(self.inner.http.get(url).bearer_auth(token))
            .await?;
        Ok(identity_from_wire(wire)?)
    }

    // =========================================================================
    // Rooms (/api/kamar)
    // =========================================================================

    /// List all rooms.
    ///
    /// # Errors
    ///
    /// Fails on transport, status, or decode errors.
    pub async fn list_rooms(&self, token: &str) -> Result<Vec<Room>, BackendError> {
        let url = self.endpoint("/api/kamar")?;
        let wires: Vec<RoomWire> = self.send(self.inner.http.get(url).bearer_auth(token)).await?;
        Ok(wires
            .into_iter()
            .map(room_from_wire)
            .collect::<Result<Vec<_>, _>>()?)
    }

    /// Fetch one room.
    ///
    /// # Errors
    ///
    /// Fails on transport, status, or decode errors.
    pub async fn get_room(&self, token: &str, id: RoomId) -> Result<Room, BackendError> {
        let url = self.endpoint(&format!("/api/kamar/{id}"))?;
        let wire: RoomWire = self.send(self.inner.http.get(url).bearer_auth(token)).await?;
        Ok(room_from_wire(wire)?)
    }

    /// Create a room.
    ///
    /// # Errors
    ///
    /// Fails on transport, status, or decode errors.
    pub async fn create_room(
        &self,
        token: &str,
        payload: &RoomPayload,
    ) -> Result<Room, BackendError> {
        let url = self.endpoint("/api/kamar")?;
        let wire: RoomWire = self
            .send(self.inner.http.post(url).bearer_auth(token).json(payload))
            .await?;
        Ok(room_from_wire(wire)?)
    }

    /// Update a room.
    ///
    /// # Errors
    ///
    /// Fails on transport, status, or decode errors.
    pub async fn update_room(
        &self,
        token: &str,
        id: RoomId,
        payload: &RoomPayload,
    ) -> Result<Room, BackendError> {
        let url = self.endpoint(&format!("/api/kamar/{id}"))?;
        let wire: RoomWire = self
            .send(self.inner.http.put(url).bearer_auth(token).json(payload))
            .await?;
        Ok(room_from_wire(wire)?)
    }

    /// Delete a room.
    ///
    /// # Errors
    ///
    /// Fails on transport or status errors.
    pub async fn delete_room(&self, token: &str, id: RoomId) -> Result<(), BackendError> {
        let url = self.endpoint(&format!("/api/kamar/{id}"))?;
        self.send_expect_empty(self.inner.http.delete(url).bearer_auth(token))
            .await
    }

    // =========================================================================
    // Users (/api/users)
    // =========================================================================

    /// List all users.
    ///
    /// # Errors
    ///
    /// Fails on transport, status, or decode errors.
    pub async fn list_users(&self, token: &str) -> Result<Vec<User>, BackendError> {
        let url = self.endpoint("/api/users")?;
        let wires: Vec<UserWire> = self.send(self.inner.http.get(url).bearer_auth(token)).await?;
        Ok(wires
            .into_iter()
            .map(user_from_wire)
            .collect::<Result<Vec<_>, _>>()?)
    }

    /// Fetch one user.
    ///
    /// # Errors
    ///
    /// Fails on transport, status, or decode errors.
    pub async fn get_user(&self, token: &str, id: UserId) -> Result<User, BackendError> {
        let url = self.endpoint(&format!("/api/users/{id}"))?;
        let wire: UserWire = self.send(self.inner.http.get(url).bearer_auth(token)).await?;
        Ok(user_from_wire(wire)?)
    }

    /// Register a new account. Unauthenticated: this is the public
    /// registration flow.
    ///
    /// # Errors
    ///
    /// Fails on transport, status, or decode errors.
    pub async fn register(&self, payload: &UserPayload) -> Result<User, BackendError> {
        let url = self.endpoint("/api/users")?;
        let wire: UserWire = self.send(self.inner.http.post(url).json(payload)).await?;
        Ok(user_from_wire(wire)?)
    }

    /// Create a user on behalf of an admin.
    ///
    /// # Errors
    ///
    /// Fails on transport, status, or decode errors.
    pub async fn create_user(
        &self,
        token: &str,
        payload: &UserPayload,
    ) -> Result<User, BackendError> {
        let url = self.endpoint("/api/users")?;
        let wire: UserWire = self
            .send(self.inner.http.post(url).bearer_auth(token).json(payload))
            .await?;
        Ok(user_from_wire(wire)?)
    }

    /// Update a user.
    ///
    /// # Errors
    ///
    /// Fails on transport, status, or decode errors.
    pub async fn update_user(
        &self,
        token: &str,
        id: UserId,
        payload: &UserPayload,
    ) -> Result<User, BackendError> {
        let url = self.endpoint(&format!("/api/users/{id}"))?;
        let wire: UserWire = self
            .send(self.inner.http.put(url).bearer_auth(token).json(payload))
            .await?;
        Ok(user_from_wire(wire)?)
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Fails on transport or status errors.
    pub async fn delete_user(&self, token: &str, id: UserId) -> Result<(), BackendError> {
        let url = self.endpoint(&format!("/api/users/{id}"))?;
        self.send_expect_empty(self.inner.http.delete(url).bearer_auth(token))
            .await
    }

    // =========================================================================
    // FAQs (/api/faqs), cached
    // =========================================================================

    /// List all FAQs (cached).
    ///
    /// # Errors
    ///
    /// Fails on transport or status errors.
    pub async fn list_faqs(&self, token: &str) -> Result<Vec<Faq>, BackendError> {
        if let Some(faqs) = self.inner.faq_cache.get(&()).await {
            return Ok((*faqs).clone());
        }
        let url = self.endpoint("/api/faqs")?;
        let wires: Vec<FaqWire> = self.send(self.inner.http.get(url).bearer_auth(token)).await?;
        let faqs: Vec<Faq> = wires.into_iter().map(faq_from_wire).collect();
        self.inner.faq_cache.insert((), Arc::new(faqs.clone())).await;
        Ok(faqs)
    }

    /// Create a FAQ.
    ///
    /// # Errors
    ///
    /// Fails on transport or status errors.
    pub async fn create_faq(&self, token: &str, payload: &FaqPayload) -> Result<Faq, BackendError> {
        let url = self.endpoint("/api/faqs")?;
        let wire: FaqWire = self
            .send(self.inner.http.post(url).bearer_auth(token).json(payload))
            .await?;
        self.inner.faq_cache.invalidate(&()).await;
        Ok(faq_from_wire(wire))
    }

    /// Update a FAQ.
    ///
    /// # Errors
    ///
    /// Fails on transport or status errors.
    pub async fn update_faq(
        &self,
        token: &str,
        id: FaqId,
        payload: &FaqPayload,
    ) -> Result<Faq, BackendError> {
        let url = self.endpoint(&format!("/api/faqs/{id}"))?;
        let wire: FaqWire = self
            .send(self.inner.http.put(url).bearer_auth(token).json(payload))
            .await?;
        self.inner.faq_cache.invalidate(&()).await;
        Ok(faq_from_wire(wire))
    }

    /// Delete a FAQ.
    ///
    /// # Errors
    ///
    /// Fails on transport or status errors.
    pub async fn delete_faq(&self, token: &str, id: FaqId) -> Result<(), BackendError> {
        let url = self.endpoint(&format!("/api/faqs/{id}"))?;
        self.send_expect_empty(self.inner.http.delete(url).bearer_auth(token))
            .await?;
        self.inner.faq_cache.invalidate(&()).await;
        Ok(())
    }

    // =========================================================================
    // House rules (/api/peraturan), cached
    // =========================================================================

    /// List all house rules (cached).
    ///
    /// # Errors
    ///
    /// Fails on transport or status errors.
    pub async fn list_rules(&self, token: &str) -> Result<Vec<Rule>, BackendError> {
        if let Some(rules) = self.inner.rule_cache.get(&()).await {
            return Ok((*rules).clone());
        }
        let url = self.endpoint("/api/peraturan")?;
        let wires: Vec<RuleWire> = self.send(self.inner.http.get(url).bearer_auth(token)).await?;
        let rules: Vec<Rule> = wires.into_iter().map(rule_from_wire).collect();
        self.inner
            .rule_cache
            .insert((), Arc::new(rules.clone()))
            .await;
        Ok(rules)
    }

    /// Create a house rule.
    ///
    /// # Errors
    ///
    /// Fails on transport or status errors.
    pub async fn create_rule(
        &self,
        token: &str,
        payload: &RulePayload,
    ) -> Result<Rule, BackendError> {
        let url = self.endpoint("/api/peraturan")?;
        let wire: RuleWire = self
            .send(self.inner.http.post(url).bearer_auth(token).json(payload))
            .await?;
        self.inner.rule_cache.invalidate(&()).await;
        Ok(rule_from_wire(wire))
    }

    /// Update a house rule.
    ///
    /// # Errors
    ///
    /// Fails on transport or status errors.
    pub async fn update_rule(
        &self,
        token: &str,
        id: RuleId,
        payload: &RulePayload,
    ) -> Result<Rule, BackendError> {
        let url = self.endpoint(&format!("/api/peraturan/{id}"))?;
        let wire: RuleWire = self
            .send(self.inner.http.put(url).bearer_auth(token).json(payload))
            .await?;
        self.inner.rule_cache.invalidate(&()).await;
        Ok(rule_from_wire(wire))
    }

    /// Delete a house rule.
    ///
    /// # Errors
    ///
    /// Fails on transport or status errors.
    pub async fn delete_rule(&self, token: &str, id: RuleId) -> Result<(), BackendError> {
        let url = self.endpoint(&format!("/api/peraturan/{id}"))?;
        self.send_expect_empty(self.inner.http.delete(url).bearer_auth(token))
            .await?;
        self.inner.rule_cache.invalidate(&()).await;
        Ok(())
    }

    // =========================================================================
    // Announcements (/api/pengumuman)
    // =========================================================================

    /// List all announcements.
    ///
    /// # Errors
    ///
    /// Fails on transport, status, or decode errors.
    pub async fn list_announcements(&self, token: &str) -> Result<Vec<Announcement>, BackendError> {
        let url = self.endpoint("/api/pengumuman")?;
        let wires: Vec<AnnouncementWire> =
            self.send(self.inner.http.get(url).bearer_auth(token)).await?;
        Ok(wires
            .into_iter()
            .map(announcement_from_wire)
            .collect::<Result<Vec<_>, _>>()?)
    }

    /// Create an announcement.
    ///
    /// # Errors
    ///
    /// Fails on transport, status, or decode errors.
    pub async fn create_announcement(
        &self,
        token: &str,
        payload: &AnnouncementPayload,
    ) -> Result<Announcement, BackendError> {
        let url = self.endpoint("/api/pengumuman")?;
        let wire: AnnouncementWire = self
            .send(self.inner.http.post(url).bearer_auth(token).json(payload))
            .await?;
        Ok(announcement_from_wire(wire)?)
    }

    /// Update an announcement.
    ///
    /// # Errors
    ///
    /// Fails on transport, status, or decode errors.
    pub async fn update_announcement(
        &self,
        token: &str,
        id: AnnouncementId,
        payload: &AnnouncementPayload,
    ) -> Result<Announcement, BackendError> {
        let url = self.endpoint(&format!("/api/pengumuman/{id}"))?;
        let wire: AnnouncementWire = self
            .send(self.inner.http.put(url).bearer_auth(token).json(payload))
            .await?;
        Ok(announcement_from_wire(wire)?)
    }

    // =========================================================================
    // Cleaning assignments (/api/kebersihan)
    // =========================================================================

    /// List all cleaning assignments.
    ///
    /// # Errors
    ///
    /// Fails on transport, status, or decode errors.
    pub async fn list_cleanings(
        &self,
        token: &str,
    ) -> Result<Vec<CleaningAssignment>, BackendError> {
        let url = self.endpoint("/api/kebersihan")?;
        let wires: Vec<CleaningWire> =
            self.send(self.inner.http.get(url).bearer_auth(token)).await?;
        Ok(wires
            .into_iter()
            .map(cleaning_from_wire)
            .collect::<Result<Vec<_>, _>>()?)
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Send a request and decode a JSON response.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "backend request failed");
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }

    /// Send a request whose successful response body is irrelevant.
    async fn send_expect_empty(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(), BackendError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "backend request failed");
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
