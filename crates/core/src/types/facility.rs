//! Facility lists and their comma-joined wire encoding.

use serde::{Deserialize, Serialize};

/// An ordered list of room facilities (e.g. `AC`, `TV`, `Wifi`).
///
/// On the wire the backend stores facilities as a single comma-joined string.
/// The split/join is unescaped: a facility name that itself contains a comma
/// does not survive a round trip. This matches the backend contract and is
/// deliberately not "fixed" here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct FacilityList(Vec<String>);

impl FacilityList {
    /// An empty facility list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Parse the comma-joined wire form. Entries are trimmed and empty
    /// entries are dropped.
    #[must_use]
    pub fn from_wire(wire: &str) -> Self {
        Self(
            wire.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    /// Encode to the comma-joined wire form.
    #[must_use]
    pub fn to_wire(&self) -> String {
        self.0.join(",")
    }

    /// Borrow the facilities as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the facility names.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl From<Vec<String>> for FacilityList {
    fn from(facilities: Vec<String>) -> Self {
        Self(facilities)
    }
}

impl<'a> IntoIterator for &'a FacilityList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(names: &[&str]) -> FacilityList {
        FacilityList::from(names.iter().map(|s| (*s).to_owned()).collect::<Vec<_>>())
    }

    #[test]
    fn wire_round_trip() {
        let original = list(&["AC", "TV", "Wifi"]);
        let wire = original.to_wire();
        assert_eq!(wire, "AC,TV,Wifi");
        assert_eq!(FacilityList::from_wire(&wire), original);
    }

    #[test]
    fn from_wire_trims_and_drops_empty_entries() {
        let parsed = FacilityList::from_wire(" AC , TV ,,Wifi ");
        assert_eq!(parsed, list(&["AC", "TV", "Wifi"]));
    }

    // The known lossy case: an unescaped comma inside a name splits it.
    #[test]
    fn comma_in_a_name_does_not_round_trip() {
        let original = list(&["AC", "Meja, Kursi"]);
        let round_tripped = FacilityList::from_wire(&original.to_wire());
        assert_ne!(round_tripped, original);
        assert_eq!(round_tripped, list(&["AC", "Meja", "Kursi"]));
    }
}
