//! Admin announcement editor.
//!
//! Single-record-at-a-time: the screen edits the first existing announcement
//! or creates one; there is no list management here.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use chrono::NaiveDate;
use serde::Deserialize;

use kostpanel_core::{Announcement, AnnouncementId};

use crate::backend::types::AnnouncementPayload;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

use super::super::{MessageQuery, redirect_with_error, redirect_with_success};

// =============================================================================
// Form Types
// =============================================================================

/// Announcement form data. `id` is empty when creating.
#[derive(Debug, Deserialize)]
pub struct AnnouncementForm {
    pub id: String,
    pub title: String,
    pub body: String,
    /// `YYYY-MM-DD` from the date input.
    pub effective_date: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Announcement editor template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/announcement.html")]
pub struct AdminAnnouncementTemplate {
    /// Existing record, if there is one to edit.
    pub current: Option<Announcement>,
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Show the editor, prefilled with the first existing announcement.
pub async fn edit_page(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> AdminAnnouncementTemplate {
    let (current, fetch_error) = match session.bearer() {
        Some(token) => match state.backend().list_announcements(token).await {
            Ok(list) => (list.into_iter().min_by_key(|a| a.id), None),
            Err(err) => (None, Some(err.alert_text())),
        },
        None => (None, None),
    };

    AdminAnnouncementTemplate {
        current,
        error: query.error.or(fetch_error),
        success: query.success,
    }
}

/// Save the announcement: update when the form carries an id, create
/// otherwise.
pub async fn save(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    axum::Form(form): axum::Form<AnnouncementForm>,
) -> Response {
    let Some(token) = session.bearer() else {
        return Redirect::to("/").into_response();
    };

    // Round-trip through NaiveDate so a malformed date is caught here, not
    // by the backend.
    let Ok(date) = NaiveDate::parse_from_str(form.effective_date.trim(), "%Y-%m-%d") else {
        return redirect_with_error("/admin/announcement", "Tanggal tidak valid (YYYY-MM-DD)")
            .into_response();
    };
    let payload = AnnouncementPayload {
        judul: form.title,
        isi: form.body,
        tanggal: date.format("%Y-%m-%d").to_string(),
    };

    let result = match form.id.trim().parse::<i64>() {
        Ok(id) => {
            state
                .backend()
                .update_announcement(token, AnnouncementId::new(id), &payload)
                .await
        }
        Err(_) => state.backend().create_announcement(token, &payload).await,
    };

    match result {
        Ok(_) => {
            redirect_with_success("/admin/announcement", "Pengumuman disimpan").into_response()
        }
        Err(err) => redirect_with_error("/admin/announcement", &err.alert_text()).into_response(),
    }
}
