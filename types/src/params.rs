//! Economy parameters — every tunable constant of the bike-share economy.
//!
//! The engines never hard-code a monetary value; everything flows through
//! this struct so an operator (or a test) can configure the economy.

use crate::amount::{COIN, MILLI};
use serde::{Deserialize, Serialize};

/// All parameters of the bike-share economy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomyParams {
    /// Deposit (raw) a rider must escrow to take a bike out.
    pub bike_deposit: u128,

    /// Replacement value (raw) of a bike, reported to the UI layer.
    pub bike_value: u128,

    /// Metered usage fee in raw units per second of ride time.
    /// The fee is capped at `bike_deposit`; see [`EconomyParams::usage_fee`].
    pub fee_rate_per_sec: u128,

    /// Premium (raw) charged to underwrite a policy, and accrued as a
    /// pending due once per completed insured ride.
    pub premium_rate: u128,

    /// Fixed payback (raw) the pool releases to an insured rider who
    /// forfeits a deposit on a bad-condition return.
    pub retention_amount: u128,

    /// Reward tokens that must be burned to erase one claim.
    pub claim_token_ratio: u64,
}

impl EconomyParams {
    /// Pedal defaults — the intended configuration for a live deployment.
    ///
    /// A 30-minute ride costs a quarter of the deposit; the fee reaches the
    /// deposit cap after two hours.
    pub fn pedal_defaults() -> Self {
        Self {
            bike_deposit: COIN,
            bike_value: COIN,
            fee_rate_per_sec: COIN / 7200,
            premium_rate: 10 * MILLI,
            retention_amount: 100 * MILLI,
            claim_token_ratio: 5,
        }
    }

    /// Compute the usage fee for a ride of `elapsed_secs` seconds.
    ///
    /// Monotonically non-decreasing in elapsed time, capped so the fee can
    /// never exceed the deposit.
    pub fn usage_fee(&self, elapsed_secs: u64) -> u128 {
        let metered = self.fee_rate_per_sec.saturating_mul(elapsed_secs as u128);
        metered.min(self.bike_deposit)
    }
}

/// Default is the Pedal configuration.
impl Default for EconomyParams {
    fn default() -> Self {
        Self::pedal_defaults()
    }
}
