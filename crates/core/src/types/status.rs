//! Status enums shared by the tenant and admin surfaces.

use serde::{Deserialize, Serialize};

/// Occupancy status of a room.
///
/// Matches the backend's wire values (`kosong`/`terisi`/`pending`). This axis
/// is independent of [`PaymentStatus`]: a room can be occupied and unpaid at
/// the same time, and admin edits may move between any two statuses with no
/// guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    /// Vacant and available.
    #[default]
    Kosong,
    /// Occupied by a tenant.
    Terisi,
    /// Reserved, move-in not completed.
    Pending,
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kosong => write!(f, "kosong"),
            Self::Terisi => write!(f, "terisi"),
            Self::Pending => write!(f, "pending"),
        }
    }
}

impl std::str::FromStr for RoomStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kosong" => Ok(Self::Kosong),
            "terisi" => Ok(Self::Terisi),
            "pending" => Ok(Self::Pending),
            _ => Err(format!("invalid room status: {s}")),
        }
    }
}

/// Monthly payment status of a room.
///
/// Wire values keep the backend's Indonesian labels, including the space in
/// `Belum Bayar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    /// Not paid yet.
    #[default]
    #[serde(rename = "Belum Bayar")]
    BelumBayar,
    /// Payment submitted, waiting for admin confirmation.
    Menunggu,
    /// Paid in full.
    Lunas,
}

impl PaymentStatus {
    /// Whether this status still counts toward the outstanding total.
    #[must_use]
    pub const fn is_outstanding(&self) -> bool {
        !matches!(self, Self::Lunas)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BelumBayar => write!(f, "Belum Bayar"),
            Self::Menunggu => write!(f, "Menunggu"),
            Self::Lunas => write!(f, "Lunas"),
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Belum Bayar" => Ok(Self::BelumBayar),
            "Menunggu" => Ok(Self::Menunggu),
            "Lunas" => Ok(Self::Lunas),
            _ => Err(format!("invalid payment status: {s}")),
        }
    }
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full access to the admin surface.
    Admin,
    /// Regular occupant; sees only the tenant views.
    Tenant,
}

impl Role {
    /// The wire string for this role (`ADMIN`/`TENANT`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Tenant => "TENANT",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "TENANT" => Ok(Self::Tenant),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Time of day a cleaning assignment is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CleaningTime {
    /// Morning slot.
    #[default]
    Pagi,
    /// Midday slot.
    Siang,
    /// Afternoon slot.
    Sore,
}

impl std::fmt::Display for CleaningTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pagi => write!(f, "Pagi"),
            Self::Siang => write!(f, "Siang"),
            Self::Sore => write!(f, "Sore"),
        }
    }
}

impl std::str::FromStr for CleaningTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pagi" => Ok(Self::Pagi),
            "Siang" => Ok(Self::Siang),
            "Sore" => Ok(Self::Sore),
            _ => Err(format!("invalid cleaning time: {s}")),
        }
    }
}
