//! Derived payment records.
//!
//! Payments are not a first-class entity anywhere in the system: a record is
//! the join of a room and whichever user occupies it, read from the room's
//! monthly price and payment status.

use serde::{Deserialize, Serialize};

use super::price::Rupiah;
use super::room::Room;
use super::status::PaymentStatus;
use super::user::User;

/// Tenant column value when no user maps to the room.
pub const UNOCCUPIED_TENANT: &str = "N/A";

/// One row of the payments view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub room_number: String,
    /// Occupant username, or [`UNOCCUPIED_TENANT`] when the room has none.
    pub tenant: String,
    pub amount: Rupiah,
    pub status: PaymentStatus,
}

impl PaymentRecord {
    /// Build the record for a room and its (possibly absent) occupant.
    #[must_use]
    pub fn from_room(room: &Room, occupant: Option<&User>) -> Self {
        Self {
            room_number: room.number.clone(),
            tenant: occupant.map_or_else(|| UNOCCUPIED_TENANT.to_owned(), |u| u.username.clone()),
            amount: room.monthly_price,
            status: room.payment_status,
        }
    }
}
