//! Room entity.

use serde::{Deserialize, Serialize};

use super::facility::FacilityList;
use super::id::RoomId;
use super::price::Rupiah;
use super::status::{PaymentStatus, RoomStatus};

/// A rentable room in the kost.
///
/// `status` and `payment_status` are independent axes: occupancy says nothing
/// about whether the month is paid, and neither is derived from the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    /// Display number, e.g. `"A-01"`. Kept as a string; numbering schemes
    /// vary per kost.
    pub number: String,
    pub status: RoomStatus,
    pub monthly_price: Rupiah,
    pub facilities: FacilityList,
    pub title: Option<String>,
    pub description: Option<String>,
    pub payment_status: PaymentStatus,
}

impl Room {
    /// Whether the room currently has an occupant.
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        matches!(self.status, RoomStatus::Terisi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupancy_is_independent_of_payment() {
        let room = Room {
            id: RoomId::new(1),
            number: "A-01".to_owned(),
            status: RoomStatus::Terisi,
            monthly_price: Rupiah::new(2_500_000),
            facilities: FacilityList::from_wire("AC,TV"),
            title: None,
            description: None,
            payment_status: PaymentStatus::BelumBayar,
        };
        // Occupied and unpaid at the same time is a legal state.
        assert!(room.is_occupied());
        assert!(room.payment_status.is_outstanding());
    }
}
