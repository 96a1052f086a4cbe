//! Ledger storage traits.
//!
//! These traits abstract over the backing store so a persistent
//! implementation can replace the in-memory one without touching the
//! engine logic.

use vesta_core::{
    Address, CurrentRewards, DecCoins, DelegatorStartingInfo, PeriodRecord, SettlementEvent,
    SlashEvent,
};

/// Read access to the distribution ledger.
///
/// Methods take `&mut self` to allow implementations to lazily load data
/// from persistent storage into an internal cache on first access.
pub trait LedgerReader {
    // === Period Ledger ===

    /// Get the archived record for a closed period.
    fn get_period_record(&mut self, validator: &Address, period: u64) -> Option<&PeriodRecord>;

    /// Get the validator's open-period accrual, if the validator has
    /// been initialized.
    fn get_current_rewards(&mut self, validator: &Address) -> Option<&CurrentRewards>;

    // === Delegation Tracking ===

    /// Get the starting snapshot for a delegation.
    fn get_starting_info(
        &mut self,
        validator: &Address,
        delegator: &Address,
    ) -> Option<&DelegatorStartingInfo>;

    /// Check whether a delegation has a starting snapshot.
    fn has_starting_info(&mut self, validator: &Address, delegator: &Address) -> bool {
        self.get_starting_info(validator, delegator).is_some()
    }

    // === Slash Events ===

    /// Slash events recorded for the validator with height in
    /// `[from_height, to_height]`, ascending by height.
    fn slash_events_between(
        &mut self,
        validator: &Address,
        from_height: u64,
        to_height: u64,
    ) -> Vec<SlashEvent>;

    // === Pools ===

    /// The validator's outstanding (not yet settled) decimal rewards.
    /// Empty if nothing has been allocated.
    fn get_outstanding(&mut self, validator: &Address) -> DecCoins;

    /// The community pool of truncation remainders.
    fn community_pool(&mut self) -> DecCoins;

    /// The validator's accumulated, not yet withdrawn commission.
    fn get_accumulated_commission(&mut self, validator: &Address) -> DecCoins;

    // === Withdraw Addresses ===

    /// The account payouts for `delegator` are sent to. Defaults to the
    /// delegator's own address when none is registered.
    fn withdraw_address(&mut self, delegator: &Address) -> Address;
}

/// Mutable access to the distribution ledger.
pub trait LedgerWriter: LedgerReader {
    // === Period Ledger ===

    /// Insert or replace a period record.
    fn set_period_record(&mut self, validator: &Address, period: u64, record: PeriodRecord);

    /// Increment a period record's reference count.
    ///
    /// The record must exist; a missing record is an engine invariant
    /// breach and panics.
    fn increment_reference_count(&mut self, validator: &Address, period: u64);

    /// Decrement a period record's reference count, purging the record
    /// when it reaches zero.
    ///
    /// A missing record or a count already at zero is an engine
    /// invariant breach and panics.
    fn decrement_reference_count(&mut self, validator: &Address, period: u64);

    /// Replace the validator's open-period accrual.
    fn set_current_rewards(&mut self, validator: &Address, current: CurrentRewards);

    /// Update the validator's open-period accrual in place. The
    /// validator must already be initialized.
    fn update_current_rewards<F>(&mut self, validator: &Address, f: F)
    where
        F: FnOnce(&mut CurrentRewards);

    // === Delegation Tracking ===

    /// Record a delegation's starting snapshot.
    fn set_starting_info(
        &mut self,
        validator: &Address,
        delegator: &Address,
        info: DelegatorStartingInfo,
    );

    /// Remove a delegation's starting snapshot.
    fn delete_starting_info(&mut self, validator: &Address, delegator: &Address);

    // === Slash Events ===

    /// Append a slash event at the given height.
    fn insert_slash_event(&mut self, validator: &Address, height: u64, event: SlashEvent);

    // === Pools ===

    /// Replace the validator's outstanding rewards.
    fn set_outstanding(&mut self, validator: &Address, rewards: DecCoins);

    /// Add to the validator's outstanding rewards.
    fn add_to_outstanding(&mut self, validator: &Address, rewards: &DecCoins);

    /// Add truncation remainders to the community pool.
    fn add_to_community_pool(&mut self, rewards: &DecCoins);

    /// Replace the validator's accumulated commission.
    fn set_accumulated_commission(&mut self, validator: &Address, commission: DecCoins);

    // === Withdraw Addresses ===

    /// Register the account payouts for `delegator` are sent to.
    fn set_withdraw_address(&mut self, delegator: &Address, addr: Address);

    // === Events ===

    /// Record a settlement notification.
    fn record_settlement(&mut self, event: SettlementEvent);
}

/// Combined trait for full ledger access.
///
/// Any type implementing both `LedgerReader` and `LedgerWriter`
/// automatically implements `LedgerStore`.
pub trait LedgerStore: LedgerReader + LedgerWriter {}

// Blanket implementation
impl<T: LedgerReader + LedgerWriter> LedgerStore for T {}
