//! Admin payments view and the payment confirmation action.
//!
//! Payments are derived, not stored: each row joins a room with whichever
//! user occupies it. A room with no occupant shows "N/A". Confirming a
//! payment writes the room back with its payment status set to `Lunas`;
//! nothing else about the room changes.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};

use kostpanel_core::{PaymentRecord, PaymentStatus, Room, RoomId, User};

use crate::backend::types::RoomPayload;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

use super::super::{MessageQuery, redirect_with_error, redirect_with_success};

/// One table row: the derived record plus the room id the actions need.
#[derive(Debug, Clone)]
pub struct PaymentRow {
    pub room_id: RoomId,
    pub record: PaymentRecord,
}

impl PaymentRow {
    /// Whether the confirm action should be offered.
    #[must_use]
    pub fn is_confirmable(&self) -> bool {
        self.record.status.is_outstanding()
    }
}

/// Payments table template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/payments.html")]
pub struct AdminPaymentsTemplate {
    pub rows: Vec<PaymentRow>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Join rooms with their occupants.
fn join_rows(rooms: &[Room], users: &[User]) -> Vec<PaymentRow> {
    rooms
        .iter()
        .map(|room| {
            let occupant = users.iter().find(|user| user.room_id == Some(room.id));
            PaymentRow {
                room_id: room.id,
                record: PaymentRecord::from_room(room, occupant),
            }
        })
        .collect()
}

/// Show payment records for all rooms.
pub async fn index(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> AdminPaymentsTemplate {
    let Some(token) = session.bearer() else {
        return AdminPaymentsTemplate {
            rows: Vec::new(),
            error: None,
            success: query.success,
        };
    };

    let (rooms, users) = tokio::join!(
        state.backend().list_rooms(token),
        state.backend().list_users(token),
    );

    match (rooms, users) {
        (Ok(rooms), Ok(users)) => AdminPaymentsTemplate {
            rows: join_rows(&rooms, &users),
            error: query.error,
            success: query.success,
        },
        (Err(err), _) | (_, Err(err)) => AdminPaymentsTemplate {
            rows: Vec::new(),
            error: Some(err.alert_text()),
            success: query.success,
        },
    }
}

/// Confirm a room's payment: mark it `Lunas`, leaving occupancy untouched.
pub async fn confirm(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Response {
    let Some(token) = session.bearer() else {
        return Redirect::to("/").into_response();
    };

    let room = match state.backend().get_room(token, RoomId::new(id)).await {
        Ok(room) => room,
        Err(err) => {
            return redirect_with_error("/admin/payments", &err.alert_text()).into_response();
        }
    };

    let payload = RoomPayload {
        nomor_kamar: room.number.clone(),
        status: room.status.to_string(),
        harga_bulanan: room.monthly_price.amount(),
        fasilitas: room.facilities.to_wire(),
        judul: room.title,
        deskripsi: room.description,
        status_pembayaran: PaymentStatus::Lunas.to_string(),
    };

    match state.backend().update_room(token, room.id, &payload).await {
        Ok(updated) => redirect_with_success(
            "/admin/payments",
            &format!("Pembayaran kamar {} dikonfirmasi", updated.number),
        )
        .into_response(),
        Err(err) => redirect_with_error("/admin/payments", &err.alert_text()).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kostpanel_core::{
        FacilityList, Role, RoomStatus, Rupiah, UNOCCUPIED_TENANT, UserId,
    };

    fn room(id: i64) -> Room {
        Room {
            id: RoomId::new(id),
            number: format!("A-{id:02}"),
            status: RoomStatus::Terisi,
            monthly_price: Rupiah::new(1_000_000),
            facilities: FacilityList::new(),
            title: None,
            description: None,
            payment_status: PaymentStatus::BelumBayar,
        }
    }

    fn tenant(id: i64, room: Option<i64>) -> User {
        User {
            id: UserId::new(id),
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            phone: None,
            role: Role::Tenant,
            room_id: room.map(RoomId::new),
        }
    }

    #[test]
    fn join_maps_occupants_and_falls_back_to_na() {
        let rooms = vec![room(1), room(2)];
        let users = vec![tenant(10, Some(1)), tenant(11, None)];

        let rows = join_rows(&rooms, &users);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].record.tenant, "user10");
        assert_eq!(rows[1].record.tenant, UNOCCUPIED_TENANT);
    }

    #[test]
    fn only_outstanding_rows_are_confirmable() {
        let mut paid = room(1);
        paid.payment_status = PaymentStatus::Lunas;
        let rows = join_rows(&[paid, room(2)], &[]);

        assert!(!rows[0].is_confirmable());
        assert!(rows[1].is_confirmable());
    }
}
