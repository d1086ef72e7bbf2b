//! End-to-end scenarios driven through the economy facade.

use std::sync::Arc;
use std::thread;

use pedal_insurance::InsuranceError;
use pedal_rental::RentalError;
use pedal_service::{Clock, Economy, EconomyError};
use pedal_types::{AccountId, BikeStatus, EconomyParams};

fn rider(n: u8) -> AccountId {
    AccountId::new(format!("pdl_rider_{n}"))
}

fn economy() -> Economy {
    Economy::with_params_and_clock(EconomyParams::default(), Clock::manual(1_000_000))
}

fn deposit() -> u128 {
    EconomyParams::default().bike_deposit
}

#[test]
fn half_hour_good_ride_refunds_deposit_minus_fee() {
    let eco = economy();
    let alice = rider(1);

    eco.rent_bike(&alice, 0, deposit()).unwrap();
    eco.clock().advance(1800);
    let receipt = eco.surrender_bike(&alice, 0, true).unwrap();

    assert_eq!(receipt.refunded, deposit() - eco.calculate_fee(1800));
    assert_eq!(eco.get_returned(&alice), receipt.refunded);
    assert_eq!(eco.check_bike(0).status, BikeStatus::Available);
    assert_eq!(eco.get_good_rides(&alice), 1);
}

#[test]
fn two_riders_rent_concurrently() {
    let eco = Arc::new(economy());

    let handles: Vec<_> = [1u8, 2]
        .into_iter()
        .map(|n| {
            let eco = Arc::clone(&eco);
            thread::spawn(move || eco.rent_bike(&rider(n), n as u64, deposit()))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    assert_eq!(eco.get_client_count(), 2);
    assert_eq!(eco.rental_held_funds(), 2 * deposit());
    assert!(eco.check_bike_status(1));
    assert!(eco.check_bike_status(2));
}

#[test]
fn underwriting_requires_the_exact_premium() {
    let eco = economy();
    let alice = rider(1);
    let premium = eco.get_premium_rate();

    let result = eco.underwrite_insurance(&alice, premium - 1);
    assert!(matches!(
        result,
        Err(EconomyError::Insurance(InsuranceError::IncorrectPremium { .. }))
    ));
    assert!(!eco.is_insured(&alice));

    eco.underwrite_insurance(&alice, premium).unwrap();
    assert!(eco.is_insured(&alice));
    assert_eq!(eco.insured_clients_count(), 1);
}

#[test]
fn five_good_rides_mint_five_tokens_but_need_claims_to_redeem() {
    let eco = economy();
    let alice = rider(1);
    let premium = eco.get_premium_rate();
    eco.underwrite_insurance(&alice, premium).unwrap();

    for ride in 0..5u64 {
        eco.rent_bike(&alice, ride, deposit()).unwrap();
        eco.clock().advance(600);
        eco.surrender_bike(&alice, ride, true).unwrap();
    }

    let status = eco.view_insurance_status(&alice);
    assert_eq!(status.tokens_owned, 5);
    assert_eq!(status.total_insured_rides, 5);
    assert_eq!(eco.balance_of(&alice), 5);
    assert_eq!(eco.get_claim_token_ratio(), 5);

    // No claims on record: redemption must be rejected.
    let result = eco.token_claim_reducer(&alice, 5);
    assert!(matches!(
        result,
        Err(EconomyError::Insurance(InsuranceError::InvalidRedemption(_)))
    ));
    assert_eq!(eco.balance_of(&alice), 5);
}

#[test]
fn insured_bad_return_records_claim_and_pays_retention() {
    let eco = economy();
    let alice = rider(1);
    let premium = eco.get_premium_rate();
    eco.underwrite_insurance(&alice, premium).unwrap();
    // Ten more underwriters so the pool can cover one retention payback.
    for n in 10..20u8 {
        eco.underwrite_insurance(&rider(n), premium).unwrap();
    }
    let pool_before = eco.pool_funds();

    eco.rent_bike(&alice, 3, deposit()).unwrap();
    eco.clock().advance(900);
    let receipt = eco.surrender_bike(&alice, 3, false).unwrap();
    assert_eq!(receipt.refunded, 0);

    let status = eco.view_insurance_status(&alice);
    assert_eq!(status.claims_count, 1);
    assert_eq!(status.paybacks_issued, 1);
    assert_eq!(status.pending_premium_due, premium);

    let retention = EconomyParams::default().retention_amount;
    assert_eq!(eco.pool_funds(), pool_before - retention);
}

#[test]
fn full_insured_lifecycle_with_regularization_and_redemption() {
    let eco = economy();
    let alice = rider(1);
    let premium = eco.get_premium_rate();
    eco.underwrite_insurance(&alice, premium).unwrap();
    for n in 10..20u8 {
        eco.underwrite_insurance(&rider(n), premium).unwrap();
    }

    // One bad ride, then five good rides.
    eco.rent_bike(&alice, 0, deposit()).unwrap();
    eco.clock().advance(300);
    eco.surrender_bike(&alice, 0, false).unwrap();
    for _ in 0..5 {
        eco.rent_bike(&alice, 0, deposit()).unwrap();
        eco.clock().advance(300);
        eco.surrender_bike(&alice, 0, true).unwrap();
    }

    // Six rides accrued six premium increments.
    let due = eco.get_pending_premia(&alice);
    assert_eq!(due, 6 * premium);
    let wrong = eco.regularize_payments(&alice, due - 1);
    assert!(matches!(
        wrong,
        Err(EconomyError::Insurance(InsuranceError::IncorrectAmount { .. }))
    ));
    eco.regularize_payments(&alice, due).unwrap();
    assert_eq!(eco.get_pending_premia(&alice), 0);

    let status = eco.view_insurance_status(&alice);
    assert_eq!(status.cumulative_premium_paid, 7 * premium);
    assert_eq!(status.claims_count, 1);
    assert_eq!(status.tokens_owned, 5);

    assert_eq!(eco.token_accounting(5), (1, 5));
    eco.token_claim_reducer(&alice, 5).unwrap();
    let status = eco.view_insurance_status(&alice);
    assert_eq!(status.claims_count, 0);
    assert_eq!(status.tokens_owned, 0);
    assert_eq!(eco.balance_of(&alice), 0);
    assert_eq!(eco.total_supply(), 0);
}

#[test]
fn value_is_conserved_across_every_operation() {
    let eco = economy();
    let alice = rider(1);
    let bob = rider(2);
    let premium = eco.get_premium_rate();

    // Net transfers from callers into the core, minus refunds/paybacks out.
    let mut net_in: i128 = 0;

    eco.underwrite_insurance(&alice, premium).unwrap();
    net_in += premium as i128;
    for n in 10..20u8 {
        eco.underwrite_insurance(&rider(n), premium).unwrap();
        net_in += premium as i128;
    }

    eco.rent_bike(&alice, 0, deposit()).unwrap();
    net_in += deposit() as i128;
    eco.rent_bike(&bob, 1, deposit()).unwrap();
    net_in += deposit() as i128;

    eco.clock().advance(1800);
    let r = eco.surrender_bike(&alice, 0, true).unwrap();
    net_in -= r.refunded as i128;
    let r = eco.surrender_bike(&bob, 1, false).unwrap();
    net_in -= r.refunded as i128;
    // Alice is insured but returned in good condition — no payback.
    // Bob is uninsured — no payback either.

    let due = eco.get_pending_premia(&alice);
    eco.regularize_payments(&alice, due).unwrap();
    net_in += due as i128;

    eco.rent_bike(&alice, 2, deposit()).unwrap();
    net_in += deposit() as i128;
    eco.clock().advance(60);
    eco.surrender_bike(&alice, 2, false).unwrap();
    // Bad insured return: retention flows back out of the pool.
    net_in -= EconomyParams::default().retention_amount as i128;

    let held = eco.rental_held_funds() as i128 + eco.pool_funds() as i128;
    assert_eq!(held, net_in);
}

#[test]
fn token_supply_matches_event_log() {
    let eco = economy();
    let alice = rider(1);
    let premium = eco.get_premium_rate();
    eco.underwrite_insurance(&alice, premium).unwrap();
    for n in 10..20u8 {
        eco.underwrite_insurance(&rider(n), premium).unwrap();
    }

    // Six good rides, one bad, then redeem five tokens.
    for _ in 0..6 {
        eco.rent_bike(&alice, 0, deposit()).unwrap();
        eco.clock().advance(120);
        eco.surrender_bike(&alice, 0, true).unwrap();
    }
    eco.rent_bike(&alice, 0, deposit()).unwrap();
    eco.clock().advance(120);
    eco.surrender_bike(&alice, 0, false).unwrap();
    eco.token_claim_reducer(&alice, 5).unwrap();

    let events = eco.transfer_events();
    let minted: u128 = events.iter().filter(|e| e.is_mint()).map(|e| e.amount).sum();
    let burned: u128 = events.iter().filter(|e| e.is_burn()).map(|e| e.amount).sum();
    assert_eq!(minted, 6);
    assert_eq!(burned, 5);
    assert_eq!(eco.total_supply(), minted - burned);
    assert_eq!(eco.balance_of(&alice), 1);
}

#[test]
fn direct_mint_requires_the_pool_identity() {
    let eco = economy();
    let alice = rider(1);

    let result = eco.mint(&alice, &alice, 5);
    assert!(matches!(result, Err(EconomyError::Token(_))));

    let pool_identity = AccountId::new(Economy::POOL_IDENTITY);
    eco.mint(&pool_identity, &alice, 5).unwrap();
    assert_eq!(eco.balance_of(&alice), 5);
    eco.burn(&pool_identity, &alice, 2).unwrap();
    assert_eq!(eco.total_supply(), 3);
}

#[test]
fn surrender_by_non_renter_is_rejected_atomically() {
    let eco = economy();
    let alice = rider(1);
    let mallory = rider(2);

    eco.rent_bike(&alice, 0, deposit()).unwrap();
    let held_before = eco.rental_held_funds();

    let result = eco.surrender_bike(&mallory, 0, true);
    assert!(matches!(
        result,
        Err(EconomyError::Rental(RentalError::NotRenter(0)))
    ));
    assert!(eco.check_bike_status(0));
    assert_eq!(eco.rental_held_funds(), held_before);
}
