//! Status enum for bikes.

use serde::{Deserialize, Serialize};

/// The rental status of a bike.
///
/// The only legal transitions are `Available → Rented` (on rent) and
/// `Rented → Available` (on surrender).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BikeStatus {
    /// Parked and rentable.
    #[default]
    Available,
    /// Currently out with a rider.
    Rented,
}

impl BikeStatus {
    /// Whether the bike can be rented right now.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// Whether the bike is out with a rider.
    pub fn is_rented(&self) -> bool {
        matches!(self, Self::Rented)
    }
}
