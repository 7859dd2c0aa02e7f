//! User entity (tenants and administrators).

use serde::{Deserialize, Serialize};

use super::id::{RoomId, UserId};
use super::status::Role;

/// An account in the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    /// The occupied room, for tenants. A tenant without a room is
    /// "unassigned"; views show empty states for them instead of erroring.
    pub room_id: Option<RoomId>,
}

impl User {
    /// Whether this account is an administrator.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Whether this tenant is assigned to a room.
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.room_id.is_some()
    }
}
