//! Per-bike state.

use pedal_types::{AccountId, BikeStatus, Timestamp};
use serde::{Deserialize, Serialize};

/// State of a single bike.
///
/// Bikes are created implicitly on first reference (ids are external and may
/// be sparse) and never deleted. While `status` is `Rented`, `last_rider` is
/// the current occupant and `held_deposit` is non-zero.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Bike {
    pub status: BikeStatus,
    /// The current occupant while rented; the most recent rider afterwards.
    pub last_rider: Option<AccountId>,
    /// Condition reported on the most recent surrender.
    pub last_condition_good: bool,
    /// When the current (or most recent) rental started.
    pub rental_start: Timestamp,
    /// Deposit escrowed for the current rental (0 while available).
    pub held_deposit: u128,
}

impl Default for Bike {
    fn default() -> Self {
        Self {
            status: BikeStatus::Available,
            last_rider: None,
            // A bike never yet surrendered counts as being in good shape.
            last_condition_good: true,
            rental_start: Timestamp::EPOCH,
            held_deposit: 0,
        }
    }
}

/// Read-only view of a bike, as returned to the UI layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BikeView {
    pub last_rider: Option<AccountId>,
    pub last_condition_good: bool,
    pub in_use: bool,
    pub status: BikeStatus,
}

impl From<&Bike> for BikeView {
    fn from(bike: &Bike) -> Self {
        Self {
            last_rider: bike.last_rider.clone(),
            last_condition_good: bike.last_condition_good,
            in_use: bike.status.is_rented(),
            status: bike.status,
        }
    }
}
