//! Tenant house-rules view.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use kostpanel_core::Rule;

use crate::middleware::RequireAuth;
use crate::state::AppState;

/// House-rules template.
#[derive(Template, WebTemplate)]
#[template(path = "rules.html")]
pub struct RulesTemplate {
    pub rules: Vec<Rule>,
    pub error: Option<String>,
}

/// Show the house rules.
pub async fn index(
    RequireAuth(session): RequireAuth,
    State(state): State<AppState>,
) -> RulesTemplate {
    let (rules, error) = match session.bearer() {
        Some(token) => match state.backend().list_rules(token).await {
            Ok(rules) => (rules, None),
            Err(err) => (Vec::new(), Some(err.alert_text())),
        },
        None => (Vec::new(), None),
    };

    RulesTemplate { rules, error }
}
