//! Rental-specific errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RentalError {
    #[error("bike {0} is already rented")]
    AlreadyRented(u64),

    #[error("rider already has an active rental on bike {0}")]
    RiderAlreadyActive(u64),

    #[error("insufficient deposit: need {needed}, provided {provided}")]
    InsufficientDeposit { needed: u128, provided: u128 },

    #[error("caller is not the active renter of bike {0}")]
    NotRenter(u64),

    #[error("arithmetic overflow in escrow accounting")]
    Overflow,
}
