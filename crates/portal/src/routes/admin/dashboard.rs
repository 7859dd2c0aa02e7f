//! Admin dashboard.
//!
//! Issues four independent list fetches (rooms, announcements, FAQs, rules).
//! They are not ordered or atomic; if ANY of them fails, the complete
//! hardcoded fallback dataset is shown instead, so the dashboard never
//! renders an error state.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use kostpanel_core::{Announcement, Room, Rupiah};

use crate::filters;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

use super::cleaning;

/// The dashboard numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_rooms: usize,
    pub occupied_rooms: usize,
    /// Whole percent, 0 when there are no rooms.
    pub occupancy_rate: u32,
    pub pending_cleanings: usize,
    pub total_announcements: usize,
    pub active_announcements: usize,
    /// Sum of monthly prices across all rooms.
    pub total_payments: Rupiah,
    /// Sum of monthly prices of rooms not yet paid in full.
    pub pending_payments: Rupiah,
    pub total_faqs: usize,
    pub total_rules: usize,
}

/// The dataset shown whenever any dashboard fetch fails.
#[must_use]
pub const fn fallback_summary() -> DashboardSummary {
    DashboardSummary {
        total_rooms: 4,
        occupied_rooms: 0,
        occupancy_rate: 0,
        pending_cleanings: 1,
        total_announcements: 1,
        active_announcements: 1,
        total_payments: Rupiah::new(10_000_000),
        pending_payments: Rupiah::new(2_600_000),
        total_faqs: 10,
        total_rules: 8,
    }
}

/// Compute the summary from freshly fetched data.
fn summarize(
    rooms: &[Room],
    announcements: &[Announcement],
    total_faqs: usize,
    total_rules: usize,
) -> DashboardSummary {
    let total_rooms = rooms.len();
    let occupied_rooms = rooms.iter().filter(|room| room.is_occupied()).count();
    let occupancy_rate = if total_rooms == 0 {
        0
    } else {
        u32::try_from(occupied_rooms * 100 / total_rooms).unwrap_or(0)
    };
    let today = chrono::Utc::now().date_naive();

    DashboardSummary {
        total_rooms,
        occupied_rooms,
        occupancy_rate,
        pending_cleanings: cleaning::pending_count(),
        total_announcements: announcements.len(),
        active_announcements: announcements.iter().filter(|a| a.is_active(today)).count(),
        total_payments: rooms.iter().map(|room| room.monthly_price).sum(),
        pending_payments: rooms
            .iter()
            .filter(|room| room.payment_status.is_outstanding())
            .map(|room| room.monthly_price)
            .sum(),
        total_faqs,
        total_rules,
    }
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub summary: DashboardSummary,
}

/// Dashboard page handler.
#[instrument(skip(session, state))]
pub async fn dashboard(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
) -> DashboardTemplate {
    let Some(token) = session.bearer() else {
        return DashboardTemplate {
            summary: fallback_summary(),
        };
    };

    // Four independent fetches; no ordering, no rollback on partial failure.
    let (rooms, announcements, faqs, rules) = tokio::join!(
        state.backend().list_rooms(token),
        state.backend().list_announcements(token),
        state.backend().list_faqs(token),
        state.backend().list_rules(token),
    );

    let summary = match (rooms, announcements, faqs, rules) {
        (Ok(rooms), Ok(announcements), Ok(faqs), Ok(rules)) => {
            summarize(&rooms, &announcements, faqs.len(), rules.len())
        }
        _ => {
            // Always show something: substitute the complete fallback
            // dataset instead of an error state.
            tracing::warn!("dashboard fetch failed; showing fallback dataset");
            fallback_summary()
        }
    };

    DashboardTemplate { summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kostpanel_core::{FacilityList, PaymentStatus, RoomId, RoomStatus};

    fn room(id: i64, status: RoomStatus, payment: PaymentStatus, price: i64) -> Room {
        Room {
            id: RoomId::new(id),
            number: format!("A-{id:02}"),
            status,
            monthly_price: Rupiah::new(price),
            facilities: FacilityList::new(),
            title: None,
            description: None,
            payment_status: payment,
        }
    }

    #[test]
    fn summarize_counts_occupancy_and_outstanding_payments() {
        let rooms = vec![
            room(1, RoomStatus::Terisi, PaymentStatus::Lunas, 1_500_000),
            room(2, RoomStatus::Terisi, PaymentStatus::BelumBayar, 2_000_000),
            room(3, RoomStatus::Kosong, PaymentStatus::BelumBayar, 1_000_000),
            room(4, RoomStatus::Pending, PaymentStatus::Menunggu, 1_200_000),
        ];
        let summary = summarize(&rooms, &[], 10, 8);

        assert_eq!(summary.total_rooms, 4);
        assert_eq!(summary.occupied_rooms, 2);
        assert_eq!(summary.occupancy_rate, 50);
        assert_eq!(summary.total_payments, Rupiah::new(5_700_000));
        assert_eq!(summary.pending_payments, Rupiah::new(4_200_000));
        assert_eq!(summary.total_faqs, 10);
        assert_eq!(summary.total_rules, 8);
    }

    #[test]
    fn empty_room_list_has_zero_rate() {
        let summary = summarize(&[], &[], 0, 0);
        assert_eq!(summary.occupancy_rate, 0);
        assert_eq!(summary.total_payments, Rupiah::new(0));
    }

    #[test]
    fn fallback_matches_the_fixed_dataset() {
        let fallback = fallback_summary();
        assert_eq!(fallback.total_rooms, 4);
        assert_eq!(fallback.pending_cleanings, 1);
        assert_eq!(fallback.total_payments, Rupiah::new(10_000_000));
        assert_eq!(fallback.pending_payments, Rupiah::new(2_600_000));
        assert_eq!(fallback.total_faqs, 10);
        assert_eq!(fallback.total_rules, 8);
    }
}
