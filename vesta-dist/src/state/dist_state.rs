//! In-memory ledger state.
//!
//! HashMap-backed implementation of the ledger traits, used for tests
//! and development. Slash events are kept in a per-validator `BTreeMap`
//! keyed by (height, period) so range scans come back in height order.

use std::collections::{BTreeMap, HashMap};

use vesta_core::{
    Address, CurrentRewards, DecCoins, DelegatorStartingInfo, PeriodRecord, SettlementEvent,
    SlashEvent,
};

use crate::error::hex;

use super::store::{LedgerReader, LedgerWriter};

/// In-memory distribution ledger.
#[derive(Clone, Debug, Default)]
pub struct DistState {
    periods: HashMap<(Address, u64), PeriodRecord>,
    current: HashMap<Address, CurrentRewards>,
    starting: HashMap<(Address, Address), DelegatorStartingInfo>,
    slash_events: HashMap<Address, BTreeMap<(u64, u64), SlashEvent>>,
    outstanding: HashMap<Address, DecCoins>,
    community_pool: DecCoins,
    commission: HashMap<Address, DecCoins>,
    withdraw_addrs: HashMap<Address, Address>,
    settlements: Vec<SettlementEvent>,
}

impl DistState {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Settlement notifications recorded so far, oldest first.
    pub fn settlements(&self) -> &[SettlementEvent] {
        &self.settlements
    }

    /// Whether a record is archived for the given period.
    pub fn has_period_record(&self, validator: &Address, period: u64) -> bool {
        self.periods.contains_key(&(*validator, period))
    }
}

impl LedgerReader for DistState {
    fn get_period_record(&mut self, validator: &Address, period: u64) -> Option<&PeriodRecord> {
        self.periods.get(&(*validator, period))
    }

    fn get_current_rewards(&mut self, validator: &Address) -> Option<&CurrentRewards> {
        self.current.get(validator)
    }

    fn get_starting_info(
        &mut self,
        validator: &Address,
        delegator: &Address,
    ) -> Option<&DelegatorStartingInfo> {
        self.starting.get(&(*validator, *delegator))
    }

    fn slash_events_between(
        &mut self,
        validator: &Address,
        from_height: u64,
        to_height: u64,
    ) -> Vec<SlashEvent> {
        if from_height > to_height {
            return Vec::new();
        }
        match self.slash_events.get(validator) {
            Some(events) => events
                .range((from_height, 0)..=(to_height, u64::MAX))
                .map(|(_, event)| event.clone())
                .collect(),
            None => Vec::new(),
        }
    }

    fn get_outstanding(&mut self, validator: &Address) -> DecCoins {
        self.outstanding.get(validator).cloned().unwrap_or_default()
    }

    fn community_pool(&mut self) -> DecCoins {
        self.community_pool.clone()
    }

    fn get_accumulated_commission(&mut self, validator: &Address) -> DecCoins {
        self.commission.get(validator).cloned().unwrap_or_default()
    }

    fn withdraw_address(&mut self, delegator: &Address) -> Address {
        *self.withdraw_addrs.get(delegator).unwrap_or(delegator)
    }
}

impl LedgerWriter for DistState {
    fn set_period_record(&mut self, validator: &Address, period: u64, record: PeriodRecord) {
        self.periods.insert((*validator, period), record);
    }

    fn increment_reference_count(&mut self, validator: &Address, period: u64) {
        match self.periods.get_mut(&(*validator, period)) {
            Some(record) => record.reference_count += 1,
            None => panic!(
                "period record {} missing for validator {}",
                period,
                hex(validator)
            ),
        }
    }

    fn decrement_reference_count(&mut self, validator: &Address, period: u64) {
        let record = match self.periods.get_mut(&(*validator, period)) {
            Some(record) => record,
            None => panic!(
                "period record {} missing for validator {}",
                period,
                hex(validator)
            ),
        };
        if record.reference_count == 0 {
            panic!(
                "reference count for period {} of validator {} already zero",
                period,
                hex(validator)
            );
        }
        record.reference_count -= 1;
        if record.reference_count == 0 {
            self.periods.remove(&(*validator, period));
        }
    }

    fn set_current_rewards(&mut self, validator: &Address, current: CurrentRewards) {
        self.current.insert(*validator, current);
    }

    fn update_current_rewards<F>(&mut self, validator: &Address, f: F)
    where
        F: FnOnce(&mut CurrentRewards),
    {
        match self.current.get_mut(validator) {
            Some(current) => f(current),
            None => panic!("current rewards missing for validator {}", hex(validator)),
        }
    }

    fn set_starting_info(
        &mut self,
        validator: &Address,
        delegator: &Address,
        info: DelegatorStartingInfo,
    ) {
        self.starting.insert((*validator, *delegator), info);
    }

    fn delete_starting_info(&mut self, validator: &Address, delegator: &Address) {
        self.starting.remove(&(*validator, *delegator));
    }

    fn insert_slash_event(&mut self, validator: &Address, height: u64, event: SlashEvent) {
        self.slash_events
            .entry(*validator)
            .or_default()
            .insert((height, event.validator_period), event);
    }

    fn set_outstanding(&mut self, validator: &Address, rewards: DecCoins) {
        self.outstanding.insert(*validator, rewards);
    }

    fn add_to_outstanding(&mut self, validator: &Address, rewards: &DecCoins) {
        let entry = self.outstanding.entry(*validator).or_default();
        *entry = entry.add(rewards);
    }

    fn add_to_community_pool(&mut self, rewards: &DecCoins) {
        self.community_pool = self.community_pool.add(rewards);
    }

    fn set_accumulated_commission(&mut self, validator: &Address, commission: DecCoins) {
        self.commission.insert(*validator, commission);
    }

    fn set_withdraw_address(&mut self, delegator: &Address, addr: Address) {
        self.withdraw_addrs.insert(*delegator, addr);
    }

    fn record_settlement(&mut self, event: SettlementEvent) {
        self.settlements.push(event);
    }
}
