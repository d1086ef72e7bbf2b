//! Per-client state.

use serde::{Deserialize, Serialize};

/// State of a single client.
///
/// A client holds at most one active rental at any time; while `in_ride` is
/// true, `current_bike` names the bike whose `last_rider` is this client.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Client {
    /// Set on first rental, never cleared.
    pub enrolled: bool,
    pub in_ride: bool,
    pub current_bike: Option<u64>,
    pub total_rides: u64,
    pub good_rides: u64,
}
