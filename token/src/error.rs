//! Token-specific errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("caller is not the token owner")]
    Unauthorized,

    #[error("insufficient token balance: need {needed}, available {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("arithmetic overflow in token supply")]
    Overflow,
}
