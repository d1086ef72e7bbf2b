//! The insurance pool engine.

use std::collections::HashMap;

use crate::account::{InsuranceAccount, PolicySnapshot};
use crate::error::InsuranceError;
use pedal_token::RewardToken;
use pedal_types::{AccountId, EconomyParams};
use serde::{Deserialize, Serialize};

/// The insurance pool — manages policies, premium dues, claims, and
/// reward-token redemption.
///
/// The pool is the owner of the reward-token ledger: minting and burning go
/// through its `identity`. Pool funds come from premiums; retention paybacks
/// are drawn from them, and running dry on a payback is a fatal invariant
/// breach, never a silent skip.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InsurancePool {
    /// The pool's own account, used as the token-ledger owner caller.
    identity: AccountId,
    params: EconomyParams,
    accounts: HashMap<AccountId, InsuranceAccount>,
    insured_count: u64,
    /// Premiums held by the pool (raw).
    pool_funds: u128,
}

impl InsurancePool {
    pub fn new(identity: AccountId, params: EconomyParams) -> Self {
        Self {
            identity,
            params,
            accounts: HashMap::new(),
            insured_count: 0,
            pool_funds: 0,
        }
    }

    /// The identity the pool uses to mint and burn reward tokens.
    pub fn identity(&self) -> &AccountId {
        &self.identity
    }

    /// Underwrite a policy for `caller` against an exact premium payment.
    pub fn underwrite(&mut self, caller: &AccountId, premium_paid: u128) -> Result<(), InsuranceError> {
        let expected = self.params.premium_rate;
        if premium_paid != expected {
            return Err(InsuranceError::IncorrectPremium {
                expected,
                paid: premium_paid,
            });
        }
        let existing = self.accounts.get(caller);
        if existing.map(|a| a.insured).unwrap_or(false) {
            return Err(InsuranceError::AlreadyInsured);
        }
        let new_cumulative = existing
            .map(|a| a.cumulative_premium_paid)
            .unwrap_or(0)
            .checked_add(premium_paid)
            .ok_or(InsuranceError::Overflow)?;
        let new_pool = self
            .pool_funds
            .checked_add(premium_paid)
            .ok_or(InsuranceError::Overflow)?;

        let acct = self.accounts.entry(caller.clone()).or_default();
        acct.insured = true;
        acct.cumulative_premium_paid = new_cumulative;
        self.pool_funds = new_pool;
        self.insured_count += 1;
        Ok(())
    }

    /// Record a completed ride for `account`. Invoked from the settlement
    /// path, never by end users. No-op for uninsured accounts.
    ///
    /// Good rides mint one reward token; bad rides record a claim and
    /// release the retention payback from pool funds. Returns the payback
    /// amount released (0 for good rides and uninsured riders) so the
    /// caller can settle the value transfer.
    pub fn on_ride_completed(
        &mut self,
        account: &AccountId,
        condition_good: bool,
        token: &mut RewardToken,
    ) -> Result<u128, InsuranceError> {
        let premium = self.params.premium_rate;
        let retention = self.params.retention_amount;

        let Some(acct) = self.accounts.get_mut(account) else {
            return Ok(0);
        };
        if !acct.insured {
            return Ok(0);
        }
        // Validate everything before mutating: a failed call must leave no
        // partial state.
        if !condition_good && self.pool_funds < retention {
            return Err(InsuranceError::PoolUnderfunded {
                needed: retention,
                available: self.pool_funds,
            });
        }
        let new_due = acct
            .pending_premium_due
            .checked_add(premium)
            .ok_or(InsuranceError::Overflow)?;

        if condition_good {
            token.mint(&self.identity, account, 1)?;
            acct.pending_premium_due = new_due;
            acct.total_insured_rides += 1;
            acct.tokens_owned += 1;
            Ok(0)
        } else {
            acct.pending_premium_due = new_due;
            acct.total_insured_rides += 1;
            acct.claims_count += 1;
            acct.paybacks_issued += 1;
            self.pool_funds -= retention;
            Ok(retention)
        }
    }

    /// Pending premium due for `account` (0 for unknown accounts).
    pub fn pending_premia(&self, account: &AccountId) -> u128 {
        self.accounts
            .get(account)
            .map(|a| a.pending_premium_due)
            .unwrap_or(0)
    }

    /// Pay off the full pending premium due. The payment must match the due
    /// exactly; it moves into the cumulative total and the pool's funds.
    pub fn regularize_payments(
        &mut self,
        caller: &AccountId,
        paid_amount: u128,
    ) -> Result<(), InsuranceError> {
        let Some(acct) = self.accounts.get_mut(caller) else {
            if paid_amount == 0 {
                return Ok(());
            }
            return Err(InsuranceError::IncorrectAmount {
                expected: 0,
                paid: paid_amount,
            });
        };
        let due = acct.pending_premium_due;
        if paid_amount != due {
            return Err(InsuranceError::IncorrectAmount {
                expected: due,
                paid: paid_amount,
            });
        }
        acct.cumulative_premium_paid = acct
            .cumulative_premium_paid
            .checked_add(due)
            .ok_or(InsuranceError::Overflow)?;
        acct.pending_premium_due = 0;
        self.pool_funds = self
            .pool_funds
            .checked_add(due)
            .ok_or(InsuranceError::Overflow)?;
        Ok(())
    }

    /// Snapshot every field of an account's insurance state.
    pub fn view_status(&self, account: &AccountId) -> PolicySnapshot {
        self.accounts
            .get(account)
            .map(PolicySnapshot::from)
            .unwrap_or_default()
    }

    /// Pure redemption arithmetic: `(claims_reduced, tokens_consumed)` for
    /// redeeming `tokens` tokens. Claim reduction rounds down; the full
    /// requested token amount is consumed.
    pub fn token_accounting(&self, tokens: u64) -> (u64, u64) {
        let ratio = self.params.claim_token_ratio;
        if ratio == 0 {
            return (0, tokens);
        }
        (tokens / ratio, tokens)
    }

    /// Burn `tokens` reward tokens from `caller` to reduce their claim
    /// count by `tokens / ratio`, clamped at zero.
    pub fn token_claim_reducer(
        &mut self,
        caller: &AccountId,
        tokens: u64,
        token: &mut RewardToken,
    ) -> Result<(), InsuranceError> {
        let ratio = self.params.claim_token_ratio;
        if ratio == 0 {
            return Err(InsuranceError::InvalidRedemption(
                "redemption is disabled (zero ratio)".to_string(),
            ));
        }
        let Some(acct) = self.accounts.get_mut(caller) else {
            return Err(InsuranceError::InvalidRedemption(format!(
                "redeeming {tokens} tokens but none owned"
            )));
        };
        if tokens > acct.tokens_owned {
            return Err(InsuranceError::InvalidRedemption(format!(
                "redeeming {tokens} tokens but only {} owned",
                acct.tokens_owned
            )));
        }
        if tokens < ratio {
            return Err(InsuranceError::InvalidRedemption(format!(
                "redeeming {tokens} tokens, below the ratio of {ratio}"
            )));
        }
        if acct.claims_count == 0 {
            return Err(InsuranceError::InvalidRedemption(
                "no claims to reduce".to_string(),
            ));
        }

        token.burn(&self.identity, caller, tokens as u128)?;
        acct.claims_count = acct.claims_count.saturating_sub(tokens / ratio);
        acct.tokens_owned -= tokens;
        Ok(())
    }

    /// Whether `account` currently holds an active policy.
    pub fn is_insured(&self, account: &AccountId) -> bool {
        self.accounts.get(account).map(|a| a.insured).unwrap_or(false)
    }

    /// Number of accounts that ever underwrote a policy.
    pub fn insured_clients_count(&self) -> u64 {
        self.insured_count
    }

    /// The fixed premium rate.
    pub fn premium_rate(&self) -> u128 {
        self.params.premium_rate
    }

    /// Tokens required per claim removed.
    pub fn claim_token_ratio(&self) -> u64 {
        self.params.claim_token_ratio
    }

    /// Premium funds currently held by the pool.
    pub fn pool_funds(&self) -> u128 {
        self.pool_funds
    }
}
