//! Admin FAQ CRUD.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use kostpanel_core::{Faq, FaqId};

use crate::backend::types::FaqPayload;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

use super::super::{MessageQuery, redirect_with_error, redirect_with_success};

/// FAQ create/edit form data.
#[derive(Debug, Deserialize)]
pub struct FaqForm {
    pub question: String,
    pub answer: String,
}

impl From<FaqForm> for FaqPayload {
    fn from(form: FaqForm) -> Self {
        Self {
            pertanyaan: form.question,
            jawaban: form.answer,
        }
    }
}

/// FAQ list + create form.
#[derive(Template, WebTemplate)]
#[template(path = "admin/faqs.html")]
pub struct AdminFaqsTemplate {
    pub faqs: Vec<Faq>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// FAQ edit form.
#[derive(Template, WebTemplate)]
#[template(path = "admin/faq_edit.html")]
pub struct AdminFaqEditTemplate {
    pub faq: Faq,
    pub error: Option<String>,
}

/// List FAQs with the create form.
pub async fn index(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> AdminFaqsTemplate {
    let (faqs, fetch_error) = match session.bearer() {
        Some(token) => match state.backend().list_faqs(token).await {
            Ok(faqs) => (faqs, None),
            Err(err) => (Vec::new(), Some(err.alert_text())),
        },
        None => (Vec::new(), None),
    };

    AdminFaqsTemplate {
        faqs,
        error: query.error.or(fetch_error),
        success: query.success,
    }
}

/// Create a FAQ.
pub async fn create(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    axum::Form(form): axum::Form<FaqForm>,
) -> Response {
    let Some(token) = session.bearer() else {
        return Redirect::to("/").into_response();
    };

    match state.backend().create_faq(token, &form.into()).await {
        Ok(_) => redirect_with_success("/admin/faqs", "FAQ ditambahkan").into_response(),
        Err(err) => redirect_with_error("/admin/faqs", &err.alert_text()).into_response(),
    }
}

/// Show the edit form for one FAQ.
pub async fn edit_page(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<MessageQuery>,
) -> Response {
    let Some(token) = session.bearer() else {
        return Redirect::to("/").into_response();
    };

    match state.backend().list_faqs(token).await {
        Ok(faqs) => match faqs.into_iter().find(|faq| faq.id == FaqId::new(id)) {
            Some(faq) => AdminFaqEditTemplate {
                faq,
                error: query.error,
            }
            .into_response(),
            None => redirect_with_error("/admin/faqs", "FAQ tidak ditemukan").into_response(),
        },
        Err(err) => redirect_with_error("/admin/faqs", &err.alert_text()).into_response(),
    }
}

/// Update a FAQ.
pub async fn update(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    axum::Form(form): axum::Form<FaqForm>,
) -> Response {
    let Some(token) = session.bearer() else {
        return Redirect::to("/").into_response();
    };

    match state
        .backend()
        .update_faq(token, FaqId::new(id), &form.into())
        .await
    {
        Ok(_) => redirect_with_success("/admin/faqs", "FAQ diperbarui").into_response(),
        Err(err) => {
            redirect_with_error(&format!("/admin/faqs/{id}/edit"), &err.alert_text())
                .into_response()
        }
    }
}

/// Delete a FAQ.
pub async fn delete(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Response {
    let Some(token) = session.bearer() else {
        return Redirect::to("/").into_response();
    };

    match state.backend().delete_faq(token, FaqId::new(id)).await {
        Ok(()) => redirect_with_success("/admin/faqs", "FAQ dihapus").into_response(),
        Err(err) => redirect_with_error("/admin/faqs", &err.alert_text()).into_response(),
    }
}
