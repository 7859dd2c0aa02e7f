//! Admin house-rule CRUD.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use kostpanel_core::{Rule, RuleId};

use crate::backend::types::RulePayload;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

use super::super::{MessageQuery, redirect_with_error, redirect_with_success};

/// Rule create/edit form data.
#[derive(Debug, Deserialize)]
pub struct RuleForm {
    pub title: String,
    pub description: String,
}

impl From<RuleForm> for RulePayload {
    fn from(form: RuleForm) -> Self {
        Self {
            judul: form.title,
            deskripsi: form.description,
        }
    }
}

/// Rule list + create form.
#[derive(Template, WebTemplate)]
#[template(path = "admin/rules.html")]
pub struct AdminRulesTemplate {
    pub rules: Vec<Rule>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Rule edit form.
#[derive(Template, WebTemplate)]
#[template(path = "admin/rule_edit.html")]
pub struct AdminRuleEditTemplate {
    pub rule: Rule,
    pub error: Option<String>,
}

/// List rules with the create form.
pub async fn index(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> AdminRulesTemplate {
    let (rules, fetch_error) = match session.bearer() {
        Some(token) => match state.backend().list_rules(token).await {
            Ok(rules) => (rules, None),
            Err(err) => (Vec::new(), Some(err.alert_text())),
        },
        None => (Vec::new(), None),
    };

    AdminRulesTemplate {
        rules,
        error: query.error.or(fetch_error),
        success: query.success,
    }
}

/// Create a rule.
pub async fn create(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    axum::Form(form): axum::Form<RuleForm>,
) -> Response {
    let Some(token) = session.bearer() else {
        return Redirect::to("/").into_response();
    };

    match state.backend().create_rule(token, &form.into()).await {
        Ok(_) => redirect_with_success("/admin/rules", "Peraturan ditambahkan").into_response(),
        Err(err) => redirect_with_error("/admin/rules", &err.alert_text()).into_response(),
    }
}

/// Show the edit form for one rule.
pub async fn edit_page(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<MessageQuery>,
) -> Response {
    let Some(token) = session.bearer() else {
        return Redirect::to("/").into_response();
    };

    // The backend has no single-rule GET worth an extra round trip; the
    // cached list serves the lookup.
    match state.backend().list_rules(token).await {
        Ok(rules) => match rules.into_iter().find(|rule| rule.id == RuleId::new(id)) {
            Some(rule) => AdminRuleEditTemplate {
                rule,
                error: query.error,
            }
            .into_response(),
            None => redirect_with_error("/admin/rules", "Peraturan tidak ditemukan")
                .into_response(),
        },
        Err(err) => redirect_with_error("/admin/rules", &err.alert_text()).into_response(),
    }
}

/// Update a rule.
pub async fn update(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    axum::Form(form): axum::Form<RuleForm>,
) -> Response {
    let Some(token) = session.bearer() else {
        return Redirect::to("/").into_response();
    };

    match state
        .backend()
        .update_rule(token, RuleId::new(id), &form.into())
        .await
    {
        Ok(_) => redirect_with_success("/admin/rules", "Peraturan diperbarui").into_response(),
        Err(err) => {
            redirect_with_error(&format!("/admin/rules/{id}/edit"), &err.alert_text())
                .into_response()
        }
    }
}

/// Delete a rule.
pub async fn delete(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Response {
    let Some(token) = session.bearer() else {
        return Redirect::to("/").into_response();
    };

    match state.backend().delete_rule(token, RuleId::new(id)).await {
        Ok(()) => redirect_with_success("/admin/rules", "Peraturan dihapus").into_response(),
        Err(err) => redirect_with_error("/admin/rules", &err.alert_text()).into_response(),
    }
}
