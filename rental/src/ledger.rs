//! The bike rental ledger engine.

use std::collections::HashMap;

use crate::bike::{Bike, BikeView};
use crate::client::Client;
use crate::error::RentalError;
use pedal_types::{AccountId, EconomyParams, Timestamp};
use serde::{Deserialize, Serialize};

/// Outcome of a surrender, returned so the caller can forward the ride
/// result to the insurance pool within the same atomic operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RideReceipt {
    pub bike_id: u64,
    pub elapsed_secs: u64,
    /// Usage fee retained by the ledger (0 economic meaning on bad returns,
    /// where the whole deposit is forfeited instead).
    pub fee: u128,
    /// Amount refunded to the rider.
    pub refunded: u128,
    pub condition_good: bool,
}

/// The bike rental ledger — exclusively owns all bike and client records.
///
/// Every operation validates fully before mutating; a failed call leaves
/// bikes, clients, and escrowed funds untouched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BikeRentalLedger {
    params: EconomyParams,
    bikes: HashMap<u64, Bike>,
    clients: HashMap<AccountId, Client>,
    /// Distinct enrolled clients, bumped once per address.
    client_count: u64,
    /// Total value held by the ledger: escrowed deposits plus retained fees
    /// and forfeited deposits.
    held_funds: u128,
    /// Amount refunded on each account's most recent surrender.
    last_returned: HashMap<AccountId, u128>,
}

impl BikeRentalLedger {
    pub fn new(params: EconomyParams) -> Self {
        Self {
            params,
            bikes: HashMap::new(),
            clients: HashMap::new(),
            client_count: 0,
            held_funds: 0,
            last_returned: HashMap::new(),
        }
    }

    /// Rent bike `bike_id` for `caller`, escrowing `deposit`.
    pub fn rent_bike(
        &mut self,
        caller: &AccountId,
        bike_id: u64,
        deposit: u128,
        now: Timestamp,
    ) -> Result<(), RentalError> {
        if let Some(bike) = self.bikes.get(&bike_id) {
            if bike.status.is_rented() {
                return Err(RentalError::AlreadyRented(bike_id));
            }
        }
        if let Some(client) = self.clients.get(caller) {
            if client.in_ride {
                return Err(RentalError::RiderAlreadyActive(
                    client.current_bike.unwrap_or(bike_id),
                ));
            }
        }
        if deposit < self.params.bike_deposit {
            return Err(RentalError::InsufficientDeposit {
                needed: self.params.bike_deposit,
                provided: deposit,
            });
        }
        let new_held = self
            .held_funds
            .checked_add(deposit)
            .ok_or(RentalError::Overflow)?;

        let bike = self.bikes.entry(bike_id).or_default();
        bike.status = pedal_types::BikeStatus::Rented;
        bike.last_rider = Some(caller.clone());
        bike.rental_start = now;
        bike.held_deposit = deposit;

        let client = self.clients.entry(caller.clone()).or_default();
        if !client.enrolled {
            client.enrolled = true;
            self.client_count += 1;
        }
        client.in_ride = true;
        client.current_bike = Some(bike_id);

        self.held_funds = new_held;
        Ok(())
    }

    /// Surrender bike `bike_id`, settling the deposit against the metered
    /// usage fee. Good returns refund `deposit − fee`; bad returns forfeit
    /// the whole deposit to the ledger.
    pub fn surrender_bike(
        &mut self,
        caller: &AccountId,
        bike_id: u64,
        condition_good: bool,
        now: Timestamp,
    ) -> Result<RideReceipt, RentalError> {
        let Some(bike) = self.bikes.get_mut(&bike_id) else {
            return Err(RentalError::NotRenter(bike_id));
        };
        let Some(client) = self.clients.get_mut(caller) else {
            return Err(RentalError::NotRenter(bike_id));
        };
        let is_renter = bike.status.is_rented()
            && bike.last_rider.as_ref() == Some(caller)
            && client.in_ride
            && client.current_bike == Some(bike_id);
        if !is_renter {
            return Err(RentalError::NotRenter(bike_id));
        }

        let elapsed_secs = bike.rental_start.elapsed_since(now);
        let fee = self.params.usage_fee(elapsed_secs);
        let refunded = if condition_good {
            bike.held_deposit.saturating_sub(fee)
        } else {
            0
        };
        let new_held = self
            .held_funds
            .checked_sub(refunded)
            .ok_or(RentalError::Overflow)?;

        bike.status = pedal_types::BikeStatus::Available;
        bike.last_condition_good = condition_good;
        bike.held_deposit = 0;

        client.in_ride = false;
        client.current_bike = None;
        client.total_rides += 1;
        if condition_good {
            client.good_rides += 1;
        }

        self.held_funds = new_held;
        self.last_returned.insert(caller.clone(), refunded);

        Ok(RideReceipt {
            bike_id,
            elapsed_secs,
            fee,
            refunded,
            condition_good,
        })
    }

    /// Usage fee for a ride of `elapsed_secs` seconds (pure).
    pub fn calculate_fee(&self, elapsed_secs: u64) -> u128 {
        self.params.usage_fee(elapsed_secs)
    }

    /// Replacement value of a bike.
    pub fn bike_value(&self) -> u128 {
        self.params.bike_value
    }

    /// Amount refunded on the account's most recent surrender.
    pub fn returned_to(&self, account: &AccountId) -> u128 {
        self.last_returned.get(account).copied().unwrap_or(0)
    }

    /// Whether the account has ever rented a bike.
    pub fn is_client(&self, account: &AccountId) -> bool {
        self.clients.get(account).map(|c| c.enrolled).unwrap_or(false)
    }

    pub fn total_rides(&self, account: &AccountId) -> u64 {
        self.clients.get(account).map(|c| c.total_rides).unwrap_or(0)
    }

    pub fn good_rides(&self, account: &AccountId) -> u64 {
        self.clients.get(account).map(|c| c.good_rides).unwrap_or(0)
    }

    /// Number of distinct clients ever enrolled.
    pub fn client_count(&self) -> u64 {
        self.client_count
    }

    /// Whether the bike is currently out with a rider.
    pub fn bike_in_use(&self, bike_id: u64) -> bool {
        self.bikes
            .get(&bike_id)
            .map(|b| b.status.is_rented())
            .unwrap_or(false)
    }

    /// Full read-only view of a bike (a default view for unknown ids).
    pub fn check_bike(&self, bike_id: u64) -> BikeView {
        self.bikes
            .get(&bike_id)
            .map(BikeView::from)
            .unwrap_or_else(|| BikeView::from(&Bike::default()))
    }

    /// Total value currently held by the ledger.
    pub fn held_funds(&self) -> u128 {
        self.held_funds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pedal_types::BikeStatus;

    fn rider(n: u8) -> AccountId {
        AccountId::new(format!("pdl_rider_{n}"))
    }

    fn t(secs: u64) -> Timestamp {
        Timestamp::new(secs)
    }

    fn ledger() -> BikeRentalLedger {
        BikeRentalLedger::new(EconomyParams::default())
    }

    fn deposit() -> u128 {
        EconomyParams::default().bike_deposit
    }

    #[test]
    fn rent_marks_bike_and_client() {
        let mut l = ledger();
        l.rent_bike(&rider(1), 0, deposit(), t(100)).unwrap();

        assert!(l.bike_in_use(0));
        assert!(l.is_client(&rider(1)));
        assert_eq!(l.client_count(), 1);
        assert_eq!(l.held_funds(), deposit());

        let view = l.check_bike(0);
        assert_eq!(view.status, BikeStatus::Rented);
        assert_eq!(view.last_rider, Some(rider(1)));
    }

    #[test]
    fn rented_bike_cannot_be_rented_again() {
        let mut l = ledger();
        l.rent_bike(&rider(1), 0, deposit(), t(100)).unwrap();

        let result = l.rent_bike(&rider(2), 0, deposit(), t(200));
        assert!(matches!(result, Err(RentalError::AlreadyRented(0))));
        assert_eq!(l.held_funds(), deposit());
    }

    #[test]
    fn active_rider_cannot_rent_second_bike() {
        let mut l = ledger();
        l.rent_bike(&rider(1), 0, deposit(), t(100)).unwrap();

        let result = l.rent_bike(&rider(1), 1, deposit(), t(200));
        assert!(matches!(result, Err(RentalError::RiderAlreadyActive(0))));
        assert!(!l.bike_in_use(1));
    }

    #[test]
    fn deposit_below_minimum_is_rejected() {
        let mut l = ledger();
        let result = l.rent_bike(&rider(1), 0, deposit() - 1, t(100));
        match result.unwrap_err() {
            RentalError::InsufficientDeposit { needed, provided } => {
                assert_eq!(needed, deposit());
                assert_eq!(provided, deposit() - 1);
            }
            other => panic!("expected InsufficientDeposit, got {other:?}"),
        }
        assert!(!l.is_client(&rider(1)));
        assert_eq!(l.held_funds(), 0);
    }

    #[test]
    fn good_surrender_refunds_deposit_minus_fee() {
        let mut l = ledger();
        l.rent_bike(&rider(1), 0, deposit(), t(1000)).unwrap();

        let receipt = l.surrender_bike(&rider(1), 0, true, t(2800)).unwrap();
        assert_eq!(receipt.elapsed_secs, 1800);
        assert_eq!(receipt.fee, l.calculate_fee(1800));
        assert_eq!(receipt.refunded, deposit() - receipt.fee);
        assert_eq!(l.returned_to(&rider(1)), receipt.refunded);

        assert!(!l.bike_in_use(0));
        assert_eq!(l.good_rides(&rider(1)), 1);
        assert_eq!(l.total_rides(&rider(1)), 1);
        assert_eq!(l.held_funds(), receipt.fee);

        let view = l.check_bike(0);
        assert!(view.last_condition_good);
        assert_eq!(view.last_rider, Some(rider(1)));
    }

    #[test]
    fn bad_surrender_forfeits_whole_deposit() {
        let mut l = ledger();
        l.rent_bike(&rider(1), 0, deposit(), t(1000)).unwrap();

        let receipt = l.surrender_bike(&rider(1), 0, false, t(2800)).unwrap();
        assert_eq!(receipt.refunded, 0);
        assert_eq!(l.returned_to(&rider(1)), 0);
        assert_eq!(l.held_funds(), deposit());

        assert_eq!(l.good_rides(&rider(1)), 0);
        assert_eq!(l.total_rides(&rider(1)), 1);
        assert!(!l.check_bike(0).last_condition_good);
    }

    #[test]
    fn only_the_renter_can_surrender() {
        let mut l = ledger();
        l.rent_bike(&rider(1), 0, deposit(), t(1000)).unwrap();

        let result = l.surrender_bike(&rider(2), 0, true, t(2000));
        assert!(matches!(result, Err(RentalError::NotRenter(0))));

        // Unknown bike also reads as not-renter.
        let result = l.surrender_bike(&rider(1), 99, true, t(2000));
        assert!(matches!(result, Err(RentalError::NotRenter(99))));

        assert!(l.bike_in_use(0));
    }

    #[test]
    fn surrender_twice_fails() {
        let mut l = ledger();
        l.rent_bike(&rider(1), 0, deposit(), t(1000)).unwrap();
        l.surrender_bike(&rider(1), 0, true, t(2000)).unwrap();

        let result = l.surrender_bike(&rider(1), 0, true, t(3000));
        assert!(matches!(result, Err(RentalError::NotRenter(0))));
        assert_eq!(l.total_rides(&rider(1)), 1);
    }

    #[test]
    fn client_can_ride_again_after_surrender() {
        let mut l = ledger();
        l.rent_bike(&rider(1), 0, deposit(), t(1000)).unwrap();
        l.surrender_bike(&rider(1), 0, true, t(2000)).unwrap();
        l.rent_bike(&rider(1), 1, deposit(), t(3000)).unwrap();

        assert!(l.bike_in_use(1));
        assert_eq!(l.client_count(), 1); // enrolled once, not twice
    }

    #[test]
    fn long_ride_fee_caps_at_deposit() {
        let mut l = ledger();
        l.rent_bike(&rider(1), 0, deposit(), t(0)).unwrap();

        // A week-long ride: fee caps at the deposit, refund is zero even
        // on a good return.
        let receipt = l
            .surrender_bike(&rider(1), 0, true, t(7 * 24 * 3600))
            .unwrap();
        assert_eq!(receipt.fee, deposit());
        assert_eq!(receipt.refunded, 0);
        assert_eq!(l.good_rides(&rider(1)), 1);
    }

    #[test]
    fn excess_deposit_is_escrowed_and_refunded() {
        let mut l = ledger();
        let generous = deposit() + 5;
        l.rent_bike(&rider(1), 0, generous, t(0)).unwrap();
        assert_eq!(l.held_funds(), generous);

        let receipt = l.surrender_bike(&rider(1), 0, true, t(60)).unwrap();
        assert_eq!(receipt.refunded, generous - receipt.fee);
    }

    #[test]
    fn sparse_bike_ids_are_created_on_first_reference() {
        let mut l = ledger();
        l.rent_bike(&rider(1), 1_000_003, deposit(), t(0)).unwrap();
        assert!(l.bike_in_use(1_000_003));
        assert!(!l.bike_in_use(0));
    }

    #[test]
    fn two_riders_two_bikes() {
        let mut l = ledger();
        l.rent_bike(&rider(1), 1, deposit(), t(0)).unwrap();
        l.rent_bike(&rider(2), 2, deposit(), t(0)).unwrap();

        assert_eq!(l.client_count(), 2);
        assert_eq!(l.held_funds(), 2 * deposit());
    }
}
