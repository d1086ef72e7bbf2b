//! Service-level error type aggregating the component errors.

use pedal_insurance::InsuranceError;
use pedal_rental::RentalError;
use pedal_token::TokenError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EconomyError {
    #[error(transparent)]
    Rental(#[from] RentalError),

    #[error(transparent)]
    Insurance(#[from] InsuranceError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("config error: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl EconomyError {
    /// Whether this error is a fatal invariant breach rather than an
    /// ordinary rejected call.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            EconomyError::Insurance(InsuranceError::PoolUnderfunded { .. })
        )
    }
}
