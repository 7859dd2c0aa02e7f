//! Tenant room view.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use kostpanel_core::{Room, RoomId};

use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Tenant room template. `room` is `None` for unassigned tenants, which is
/// an empty state and not an error.
#[derive(Template, WebTemplate)]
#[template(path = "room.html")]
pub struct RoomTemplate {
    pub room: Option<Room>,
    pub error: Option<String>,
}

/// Show the tenant's own room.
pub async fn my_room(
    RequireAuth(session): RequireAuth,
    State(state): State<AppState>,
) -> RoomTemplate {
    // An unassigned tenant (or an unparseable room cookie) gets the empty
    // state rather than an error page.
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

    RoomTemplate { room, error }
}
