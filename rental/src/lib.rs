//! Bike rental ledger — the root of control flow for a rental.
//!
//! A rider escrows a deposit to take a bike out; on surrender the ledger
//! meters a usage fee against the elapsed time and settles the deposit:
//! good-condition returns refund the deposit minus the fee, bad-condition
//! returns forfeit the whole deposit to the ledger.

pub mod bike;
pub mod client;
pub mod error;
pub mod ledger;

pub use bike::{Bike, BikeView};
pub use client::Client;
pub use error::RentalError;
pub use ledger::{BikeRentalLedger, RideReceipt};
