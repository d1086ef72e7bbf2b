//! Insurance-specific errors.

use pedal_token::TokenError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InsuranceError {
    #[error("account already holds an active policy")]
    AlreadyInsured,

    #[error("incorrect premium: expected {expected}, paid {paid}")]
    IncorrectPremium { expected: u128, paid: u128 },

    #[error("incorrect regularization amount: expected {expected}, paid {paid}")]
    IncorrectAmount { expected: u128, paid: u128 },

    #[error("invalid redemption: {0}")]
    InvalidRedemption(String),

    /// Fatal: the pool cannot honor a retention payback. Indicates the
    /// premium pool was mis-funded relative to payback obligations.
    #[error("pool underfunded: retention payback needs {needed}, pool holds {available}")]
    PoolUnderfunded { needed: u128, available: u128 },

    #[error("arithmetic overflow in premium accounting")]
    Overflow,

    #[error(transparent)]
    Token(#[from] TokenError),
}
