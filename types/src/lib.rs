//! Fundamental types for the Pedal economy.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: account identities, amounts, timestamps, bike status, and the
//! economy parameters.

pub mod account;
pub mod amount;
pub mod params;
pub mod state;
pub mod time;

pub use account::AccountId;
pub use amount::{COIN, MILLI};
pub use params::EconomyParams;
pub use state::BikeStatus;
pub use time::Timestamp;
