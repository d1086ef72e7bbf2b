//! Per-rider insurance state.

use serde::{Deserialize, Serialize};

/// Insurance state for a single rider.
///
/// Exists only once the rider has underwritten a policy. `claims_count` is
/// net of redemptions; `pending_premium_due` accrues one premium per
/// completed insured ride and is zeroed only by a full regularization.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InsuranceAccount {
    /// Whether the policy is active.
    pub insured: bool,

    /// Total premiums ever paid (underwriting plus regularizations).
    pub cumulative_premium_paid: u128,

    /// Premiums accrued from rides but not yet paid.
    pub pending_premium_due: u128,

    /// Completed rides while insured.
    pub total_insured_rides: u64,

    /// Bad-condition returns, net of token redemptions. Never negative.
    pub claims_count: u64,

    /// Reward tokens currently owned (mirrors the token ledger balance).
    pub tokens_owned: u64,

    /// Retention paybacks released to this rider.
    pub paybacks_issued: u64,
}

/// Read-only snapshot of an insurance account, as returned to the UI layer.
///
/// A never-insured account snapshots as all zeroes with `insured = false`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySnapshot {
    pub insured: bool,
    pub cumulative_premium_paid: u128,
    pub pending_premium_due: u128,
    pub total_insured_rides: u64,
    pub claims_count: u64,
    pub tokens_owned: u64,
    pub paybacks_issued: u64,
}

impl From<&InsuranceAccount> for PolicySnapshot {
    fn from(acct: &InsuranceAccount) -> Self {
        Self {
            insured: acct.insured,
            cumulative_premium_paid: acct.cumulative_premium_paid,
            pending_premium_due: acct.pending_premium_due,
            total_insured_rides: acct.total_insured_rides,
            claims_count: acct.claims_count,
            tokens_owned: acct.tokens_owned,
            paybacks_issued: acct.paybacks_issued,
        }
    }
}
