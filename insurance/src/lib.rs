//! Insurance pool — premium/claims bookkeeping for insured riders.
//!
//! Riders underwrite a policy for a fixed premium. Each completed insured
//! ride accrues one premium increment as a pending due; good-condition
//! returns mint a reward token, bad-condition returns record a claim and
//! release a fixed retention payback from pool funds. Tokens can be burned
//! to offset claims at a fixed ratio.

pub mod account;
pub mod error;
pub mod pool;

pub use account::{InsuranceAccount, PolicySnapshot};
pub use error::InsuranceError;
pub use pool::InsurancePool;
