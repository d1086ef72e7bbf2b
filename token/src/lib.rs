//! Reward token — a minimal fungible-balance ledger.
//!
//! Good-condition insured rides mint one token; redeeming tokens against
//! claim counts burns them. Only the ledger owner (the insurance pool) may
//! mint or burn. Every supply change emits a transfer-style event with the
//! void identity as the mint source / burn destination, so observers can
//! audit supply without reading balances.

pub mod error;
pub mod event;
pub mod ledger;

pub use error::TokenError;
pub use event::TransferEvent;
pub use ledger::RewardToken;
