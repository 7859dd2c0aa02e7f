//! Tenant FAQ view.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use kostpanel_core::Faq;

use crate::middleware::RequireAuth;
use crate::state::AppState;

/// FAQ list template.
#[derive(Template, WebTemplate)]
#[template(path = "faq.html")]
pub struct FaqTemplate {
    pub faqs: Vec<Faq>,
    pub error: Option<String>,
}

/// Show the FAQ list.
pub async fn index(RequireAuth(session): RequireAuth, State(state): State<AppState>) -> FaqTemplate {
    let (faqs, error) = match session.bearer() {
        Some(token) => match state.backend().list_faqs(token).await {
            Ok(faqs) => (faqs, None),
            Err(err) => (Vec::new(), Some(err.alert_text())),
        },
        None => (Vec::new(), None),
    };

    FaqTemplate { faqs, error }
}
