//! Transfer-style events emitted on every supply change.

use pedal_types::AccountId;
use serde::{Deserialize, Serialize};

/// A transfer notification.
///
/// Mints carry the void identity as `from`; burns carry it as `to`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEvent {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: u128,
}

impl TransferEvent {
    /// Event for minting `amount` to `account`.
    pub fn mint(account: &AccountId, amount: u128) -> Self {
        Self {
            from: AccountId::void(),
            to: account.clone(),
            amount,
        }
    }

    /// Event for burning `amount` from `account`.
    pub fn burn(account: &AccountId, amount: u128) -> Self {
        Self {
            from: account.clone(),
            to: AccountId::void(),
            amount,
        }
    }

    /// Whether this event records a mint.
    pub fn is_mint(&self) -> bool {
        self.from.is_void()
    }

    /// Whether this event records a burn.
    pub fn is_burn(&self) -> bool {
        self.to.is_void()
    }
}
