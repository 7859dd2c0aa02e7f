//! Tenant payment view.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use kostpanel_core::{Room, RoomId};

use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Tenant payment template. Reads straight off the room: the nominal amount
/// is the monthly price and the status is the room's payment status.
#[derive(Template, WebTemplate)]
#[template(path = "payments.html")]
pub struct PaymentsTemplate {
    pub room: Option<Room>,
    pub error: Option<String>,
}

/// Show the payment status of the tenant's room.
pub async fn my_payments(
    RequireAuth(session): RequireAuth,
    State(state): State<AppState>,
) -> PaymentsTemplate {
    let room_id = session
        .snapshot
        .room()
        .and_then(|raw| raw.parse::<i64>().ok())
        .map(RoomId::new);

    let (room, error) = match (room_id, session.bearer()) {
        (Some(id), Some(token)) => match state.backend().get_room(token, id).await {
            Ok(room) => (Some(room), None),
            Err(err) => (None, Some(err.alert_text())),
        },
        _ => (None, None),
    };

    PaymentsTemplate { room, error }
}
