//! The economy facade — one call, one atomic operation.

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use pedal_insurance::{InsurancePool, PolicySnapshot};
use pedal_rental::{BikeRentalLedger, BikeView, RideReceipt};
use pedal_token::{RewardToken, TransferEvent};
use pedal_types::{AccountId, EconomyParams};
use pedal_utils::format_duration;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::config::EconomyConfig;
use crate::error::EconomyError;

/// The composed ledger state, guarded by the facade's lock.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct EconomyState {
    pub(crate) params: EconomyParams,
    pub(crate) rental: BikeRentalLedger,
    pub(crate) pool: InsurancePool,
    pub(crate) token: RewardToken,
}

impl EconomyState {
    fn new(params: EconomyParams) -> Self {
        let pool_identity = AccountId::new(Economy::POOL_IDENTITY);
        Self {
            rental: BikeRentalLedger::new(params.clone()),
            pool: InsurancePool::new(pool_identity.clone(), params.clone()),
            token: RewardToken::new(pool_identity),
            params,
        }
    }
}

/// The bike-share economy core.
///
/// Each public operation executes under a single lock, so all reads and
/// writes across bike, client, insurance, and token state commit together
/// or not at all. Callers pass their authenticated identity explicitly;
/// the facade never guesses who is calling.
pub struct Economy {
    state: Mutex<EconomyState>,
    clock: Clock,
    /// Where [`Economy::persist_snapshot`] writes, from the config.
    data_dir: PathBuf,
}

impl Economy {
    /// The account identity the insurance pool operates under; it owns the
    /// reward-token ledger.
    pub const POOL_IDENTITY: &'static str = "pdl_insurance_pool";

    /// Snapshot file name within the data directory.
    const SNAPSHOT_FILE: &'static str = "economy.snap";

    pub fn new(config: EconomyConfig) -> Self {
        config.init_logging();
        Self {
            state: Mutex::new(EconomyState::new(config.params)),
            clock: Clock::System,
            data_dir: config.data_dir,
        }
    }

    /// Open an economy from `config`: restore the snapshot in its data
    /// directory if one exists, otherwise start fresh.
    pub fn open(config: EconomyConfig, clock: Clock) -> Result<Self, EconomyError> {
        config.init_logging();
        let path = config.data_dir.join(Self::SNAPSHOT_FILE);
        let state = if path.exists() {
            crate::snapshot::EconomySnapshot::load_from_file(&path)?.into_state()?
        } else {
            EconomyState::new(config.params)
        };
        Ok(Self {
            state: Mutex::new(state),
            clock,
            data_dir: config.data_dir,
        })
    }

    pub fn with_params_and_clock(params: EconomyParams, clock: Clock) -> Self {
        Self {
            state: Mutex::new(EconomyState::new(params)),
            clock,
            data_dir: crate::config::default_data_dir(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, EconomyState> {
        // A panic mid-operation poisons the lock; the state itself is
        // always consistent because operations validate before mutating.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    // ── Rental operations ──────────────────────────────────────────────

    /// Rent a bike, escrowing `deposit` supplied with the call.
    pub fn rent_bike(
        &self,
        caller: &AccountId,
        bike_id: u64,
        deposit: u128,
    ) -> Result<(), EconomyError> {
        let now = self.clock.now();
        let mut state = self.lock();
        state.rental.rent_bike(caller, bike_id, deposit, now)?;
        tracing::info!(rider = %caller, bike_id, "bike rented");
        Ok(())
    }

    /// Surrender a bike, settling the deposit and forwarding the ride
    /// outcome to the insurance pool within the same critical section.
    pub fn surrender_bike(
        &self,
        caller: &AccountId,
        bike_id: u64,
        condition_good: bool,
    ) -> Result<RideReceipt, EconomyError> {
        let now = self.clock.now();
        let mut state = self.lock();
        let receipt = state
            .rental
            .surrender_bike(caller, bike_id, condition_good, now)?;
        tracing::info!(
            rider = %caller,
            bike_id,
            condition_good,
            elapsed = %format_duration(receipt.elapsed_secs),
            fee = receipt.fee,
            refunded = receipt.refunded,
            "bike surrendered"
        );

        // Bike and deposit settlement is committed above; the pool's
        // bookkeeping cannot block it.
        let EconomyState { pool, token, .. } = &mut *state;
        match pool.on_ride_completed(caller, condition_good, token) {
            Ok(payback) => {
                if payback > 0 {
                    tracing::info!(rider = %caller, payback, "retention payback released");
                }
            }
            Err(e) => {
                let error = EconomyError::from(e);
                if error.is_fatal() {
                    tracing::error!(rider = %caller, %error, "insurance pool invariant breach");
                }
                return Err(error);
            }
        }
        Ok(receipt)
    }

    /// Amount refunded on the account's most recent surrender.
    pub fn get_returned(&self, account: &AccountId) -> u128 {
        self.lock().rental.returned_to(account)
    }

    /// Usage fee for `elapsed_secs` seconds of ride time (pure).
    pub fn calculate_fee(&self, elapsed_secs: u64) -> u128 {
        self.lock().rental.calculate_fee(elapsed_secs)
    }

    pub fn get_bike_value(&self) -> u128 {
        self.lock().rental.bike_value()
    }

    pub fn is_client(&self, account: &AccountId) -> bool {
        self.lock().rental.is_client(account)
    }

    pub fn get_total_rides(&self, account: &AccountId) -> u64 {
        self.lock().rental.total_rides(account)
    }

    pub fn get_good_rides(&self, account: &AccountId) -> u64 {
        self.lock().rental.good_rides(account)
    }

    pub fn get_client_count(&self) -> u64 {
        self.lock().rental.client_count()
    }

    /// Whether the bike is currently out with a rider.
    pub fn check_bike_status(&self, bike_id: u64) -> bool {
        self.lock().rental.bike_in_use(bike_id)
    }

    /// Full read-only view of a bike.
    pub fn check_bike(&self, bike_id: u64) -> BikeView {
        self.lock().rental.check_bike(bike_id)
    }

    /// Total value currently escrowed or retained by the rental ledger.
    pub fn rental_held_funds(&self) -> u128 {
        self.lock().rental.held_funds()
    }

    // ── Insurance operations ───────────────────────────────────────────

    /// Underwrite a policy, paying the premium supplied with the call.
    pub fn underwrite_insurance(
        &self,
        caller: &AccountId,
        premium_paid: u128,
    ) -> Result<(), EconomyError> {
        let mut state = self.lock();
        state.pool.underwrite(caller, premium_paid)?;
        tracing::info!(rider = %caller, "insurance policy underwritten");
        Ok(())
    }

    pub fn is_insured(&self, account: &AccountId) -> bool {
        self.lock().pool.is_insured(account)
    }

    pub fn get_premium_rate(&self) -> u128 {
        self.lock().pool.premium_rate()
    }

    pub fn get_claim_token_ratio(&self) -> u64 {
        self.lock().pool.claim_token_ratio()
    }

    pub fn get_pending_premia(&self, account: &AccountId) -> u128 {
        self.lock().pool.pending_premia(account)
    }

    /// Pay off the pending premium due, supplied with the call.
    pub fn regularize_payments(
        &self,
        caller: &AccountId,
        paid_amount: u128,
    ) -> Result<(), EconomyError> {
        let mut state = self.lock();
        state.pool.regularize_payments(caller, paid_amount)?;
        tracing::info!(rider = %caller, paid = paid_amount, "premiums regularized");
        Ok(())
    }

    pub fn view_insurance_status(&self, account: &AccountId) -> PolicySnapshot {
        self.lock().pool.view_status(account)
    }

    /// Pure redemption arithmetic: `(claims_reduced, tokens_consumed)`.
    pub fn token_accounting(&self, tokens_to_redeem: u64) -> (u64, u64) {
        self.lock().pool.token_accounting(tokens_to_redeem)
    }

    /// Redeem reward tokens against the caller's claim count.
    pub fn token_claim_reducer(
        &self,
        caller: &AccountId,
        tokens_to_redeem: u64,
    ) -> Result<(), EconomyError> {
        let mut state = self.lock();
        let EconomyState { pool, token, .. } = &mut *state;
        pool.token_claim_reducer(caller, tokens_to_redeem, token)?;
        tracing::info!(rider = %caller, tokens = tokens_to_redeem, "tokens redeemed against claims");
        Ok(())
    }

    pub fn insured_clients_count(&self) -> u64 {
        self.lock().pool.insured_clients_count()
    }

    /// Premium funds currently held by the insurance pool.
    pub fn pool_funds(&self) -> u128 {
        self.lock().pool.pool_funds()
    }

    // ── Token operations ───────────────────────────────────────────────

    /// Mint reward tokens. Owner only (the pool identity).
    pub fn mint(
        &self,
        caller: &AccountId,
        account: &AccountId,
        amount: u128,
    ) -> Result<(), EconomyError> {
        let mut state = self.lock();
        state.token.mint(caller, account, amount)?;
        Ok(())
    }

    /// Burn reward tokens. Owner only (the pool identity).
    pub fn burn(
        &self,
        caller: &AccountId,
        account: &AccountId,
        amount: u128,
    ) -> Result<(), EconomyError> {
        let mut state = self.lock();
        state.token.burn(caller, account, amount)?;
        Ok(())
    }

    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.lock().token.balance_of(account)
    }

    pub fn total_supply(&self) -> u128 {
        self.lock().token.total_supply()
    }

    /// The token transfer-event log, oldest first.
    pub fn transfer_events(&self) -> Vec<TransferEvent> {
        self.lock().token.events().to_vec()
    }

    // ── Snapshot ───────────────────────────────────────────────────────

    /// Capture the full economy state.
    pub fn snapshot(&self) -> crate::snapshot::EconomySnapshot {
        crate::snapshot::EconomySnapshot::capture(&self.lock(), self.clock.now())
    }

    /// Path the economy persists its snapshot to.
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(Self::SNAPSHOT_FILE)
    }

    /// Capture a snapshot and write it to the data directory, creating the
    /// directory if needed. Returns the path written.
    pub fn persist_snapshot(&self) -> Result<PathBuf, EconomyError> {
        std::fs::create_dir_all(&self.data_dir)
            .map_err(|e| EconomyError::Snapshot(e.to_string()))?;
        let path = self.snapshot_path();
        self.snapshot().save_to_file(&path)?;
        Ok(path)
    }

    /// Restore an economy from a snapshot, verifying its integrity hash.
    pub fn restore(
        snapshot: crate::snapshot::EconomySnapshot,
        clock: Clock,
    ) -> Result<Self, EconomyError> {
        let state = snapshot.into_state()?;
        Ok(Self {
            state: Mutex::new(state),
            clock,
            data_dir: crate::config::default_data_dir(),
        })
    }
}
