//! Cleaning assignments for common areas.

use serde::{Deserialize, Serialize};

use super::status::CleaningTime;

/// The four common areas a cleaning assignment can cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CleaningAreas {
    pub parking: bool,
    pub terrace: bool,
    pub corridor: bool,
    pub garden: bool,
}

impl CleaningAreas {
    /// Display labels for the areas that are set, in a fixed order.
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.parking {
            labels.push("Parkiran");
        }
        if self.terrace {
            labels.push("Teras");
        }
        if self.corridor {
            labels.push("Koridor");
        }
        if self.garden {
            labels.push("Taman");
        }
        labels
    }

    /// Whether no area is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.parking || self.terrace || self.corridor || self.garden)
    }
}

/// A room's cleaning duty. Read-only from the tenant's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningAssignment {
    pub room_number: String,
    pub areas: CleaningAreas,
    pub notes: String,
    pub time: CleaningTime,
}
