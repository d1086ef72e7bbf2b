//! Monetary units.
//!
//! All amounts are fixed-point integers (u128) in the smallest indivisible
//! unit, called a raw. There are no fractional amounts anywhere in the core.

/// One coin — the headline unit of value (10^18 raw).
pub const COIN: u128 = 1_000_000_000_000_000_000;

/// One thousandth of a coin (10^15 raw). Premiums and retention paybacks
/// are denominated in millis.
pub const MILLI: u128 = COIN / 1000;

/// Format a raw amount as a human-readable coin value, e.g. `1.250 coin`.
pub fn format_coin(raw: u128) -> String {
    let whole = raw / COIN;
    let millis = (raw % COIN) / MILLI;
    format!("{whole}.{millis:03} coin")
}
