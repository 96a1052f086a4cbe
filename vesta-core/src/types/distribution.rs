//! Persistent records of the period reward ledger.
//!
//! Each validator's reward history is divided into numbered periods. A
//! period closes whenever the set of delegations changes shape or a
//! delegator settles; the closed period's cumulative reward-per-token
//! ratio is archived as a [`PeriodRecord`] and referenced by the
//! delegations that still need it to compute a difference.

use serde::{Deserialize, Serialize};

use crate::dec::Dec;
use crate::types::coins::{Coins, DecCoins};
use crate::types::staking::Address;

/// Archived snapshot of a validator's cumulative reward ratio at the
/// close of a period.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// Cumulative rewards-per-token since period zero, monotonically
    /// non-decreasing per denomination across consecutive periods.
    pub cumulative_reward_ratio: DecCoins,
    /// Number of outstanding references from starting infos and slash
    /// events. The record is deleted when this reaches zero.
    pub reference_count: u32,
}

/// Rewards accrued to a validator during the still-open period.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentRewards {
    /// Decimal rewards accrued so far this period.
    pub rewards: DecCoins,
    /// Number of the open period.
    pub period: u64,
}

/// Snapshot taken when a delegation is created or re-anchored.
///
/// Pins the period the delegation starts accruing from, the stake it
/// accrues with, and the height the snapshot was taken at. Slash events
/// strictly after `height` apply to the stake during accrual.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegatorStartingInfo {
    /// Last period settled before this delegation began accruing.
    pub previous_period: u64,
    /// Token-denominated stake at snapshot time, truncated from shares.
    pub stake: Dec,
    /// Block height the snapshot was taken at.
    pub height: u64,
}

/// Record of a slash applied to a validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlashEvent {
    /// Period closed immediately before the slash took effect.
    pub validator_period: u64,
    /// Fraction of stake destroyed, in [0, 1].
    pub fraction: Dec,
}

/// Emitted when a delegator's rewards are settled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementEvent {
    /// Validator the rewards accrued against.
    pub validator: Address,
    /// Delegator the payout went to.
    pub delegator: Address,
    /// Whole units paid out. A zero coin of the base denomination when
    /// nothing was payable.
    pub amount: Coins,
}
