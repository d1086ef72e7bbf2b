//! The reward-token ledger.

use std::collections::HashMap;

use crate::error::TokenError;
use crate::event::TransferEvent;
use pedal_types::AccountId;
use serde::{Deserialize, Serialize};

/// Owner-gated fungible-balance ledger.
///
/// Invariant: `total_supply == Σ balances` after every operation. Balances
/// are only ever mutated through [`RewardToken::mint`] and
/// [`RewardToken::burn`]; both validate fully before committing, so a failed
/// call leaves no partial state behind.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RewardToken {
    owner: AccountId,
    total_supply: u128,
    balances: HashMap<AccountId, u128>,
    events: Vec<TransferEvent>,
}

impl RewardToken {
    /// Create an empty ledger gated to `owner`.
    pub fn new(owner: AccountId) -> Self {
        Self {
            owner,
            total_supply: 0,
            balances: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// The account allowed to mint and burn.
    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    /// Mint `amount` new tokens to `account`. Owner only.
    pub fn mint(
        &mut self,
        caller: &AccountId,
        account: &AccountId,
        amount: u128,
    ) -> Result<(), TokenError> {
        if caller != &self.owner {
            return Err(TokenError::Unauthorized);
        }
        if amount == 0 {
            return Err(TokenError::ZeroAmount);
        }
        let balance = self.balances.get(account).copied().unwrap_or(0);
        let new_balance = balance.checked_add(amount).ok_or(TokenError::Overflow)?;
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        self.balances.insert(account.clone(), new_balance);
        self.total_supply = new_supply;
        self.events.push(TransferEvent::mint(account, amount));
        Ok(())
    }

    /// Burn `amount` tokens from `account`. Owner only.
    pub fn burn(
        &mut self,
        caller: &AccountId,
        account: &AccountId,
        amount: u128,
    ) -> Result<(), TokenError> {
        if caller != &self.owner {
            return Err(TokenError::Unauthorized);
        }
        if amount == 0 {
            return Err(TokenError::ZeroAmount);
        }
        let balance = self.balances.get(account).copied().unwrap_or(0);
        if balance < amount {
            return Err(TokenError::InsufficientBalance {
                needed: amount,
                available: balance,
            });
        }

        self.balances.insert(account.clone(), balance - amount);
        self.total_supply -= amount;
        self.events.push(TransferEvent::burn(account, amount));
        Ok(())
    }

    /// Current balance of `account` (0 for unknown accounts).
    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Total tokens in circulation.
    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// The full transfer-event log, oldest first.
    pub fn events(&self) -> &[TransferEvent] {
        &self.events
    }

    /// Sum all balances. Used by tests to check the supply invariant.
    pub fn sum_of_balances(&self) -> u128 {
        self.balances.values().sum()
    }
}
