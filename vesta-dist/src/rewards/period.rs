//! Period ledger maintenance.
//!
//! A validator's reward history is a sequence of periods. Rewards
//! accrue into the open period; ending it folds the accrued amount,
//! divided by the validator's bonded tokens, into the cumulative
//! reward-per-token ratio and archives the result. Delegations later
//! integrate differences of these ratios.

use vesta_core::{Address, CurrentRewards, DecCoins, PeriodRecord, Validator};

use crate::error::hex;
use crate::state::LedgerWriter;

/// Set up the period ledger for a validator on first contact.
///
/// Archives an all-zero ratio as period 0 (referenced once by the open
/// period) and opens period 1.
pub fn ensure_validator_initialized<S: LedgerWriter>(state: &mut S, validator: &Address) {
    if state.get_current_rewards(validator).is_some() {
        return;
    }
    state.set_period_record(
        validator,
        0,
        PeriodRecord {
            cumulative_reward_ratio: DecCoins::new(),
            reference_count: 1,
        },
    );
    state.set_current_rewards(
        validator,
        CurrentRewards {
            rewards: DecCoins::new(),
            period: 1,
        },
    );
}

/// Close the validator's open period and archive its cumulative ratio.
///
/// The accrued rewards are divided by the validator's bonded tokens
/// (truncating per denomination; a tokenless validator contributes
/// nothing, the accrued amount stays in the outstanding pool until
/// settlement clips it away). The archived record starts with reference
/// count 1, held by the new open period. Returns the ended period's
/// number.
pub fn end_current_period<S: LedgerWriter>(state: &mut S, validator: &Validator) -> u64 {
    ensure_validator_initialized(state, &validator.operator);

    let current = match state.get_current_rewards(&validator.operator) {
        Some(current) => current.clone(),
        None => panic!(
            "current rewards missing for validator {}",
            hex(&validator.operator)
        ),
    };

    let ratio_delta = if validator.tokens.is_zero() {
        DecCoins::new()
    } else {
        current.rewards.quo_int_truncate(validator.tokens)
    };

    let previous = match state.get_period_record(&validator.operator, current.period - 1) {
        Some(record) => record.cumulative_reward_ratio.clone(),
        None => panic!(
            "period record {} missing for validator {}",
            current.period - 1,
            hex(&validator.operator)
        ),
    };
    let cumulative = previous.add(&ratio_delta);

    // The new open period takes over the reference the old one held.
    state.decrement_reference_count(&validator.operator, current.period - 1);
    state.set_period_record(
        &validator.operator,
        current.period,
        PeriodRecord {
            cumulative_reward_ratio: cumulative,
            reference_count: 1,
        },
    );
    state.set_current_rewards(
        &validator.operator,
        CurrentRewards {
            rewards: DecCoins::new(),
            period: current.period + 1,
        },
    );

    current.period
}

/// Credit an external reward inflow to a validator.
///
/// Commission (`amount × commission_rate`, truncated) goes to the
/// validator's accumulated commission; the remainder accrues into the
/// open period. The full amount is added to the validator's outstanding
/// pool, which later settlement draws down.
pub fn allocate_rewards<S: LedgerWriter>(state: &mut S, validator: &Validator, amount: &DecCoins) {
    ensure_validator_initialized(state, &validator.operator);

    let commission = amount.mul_dec_truncate(&validator.commission_rate);
    let shared = match amount.checked_sub(&commission) {
        Some(shared) => shared,
        None => panic!(
            "commission {} exceeds allocated amount {} for validator {}",
            commission,
            amount,
            hex(&validator.operator)
        ),
    };

    if !commission.is_zero() {
        let accumulated = state.get_accumulated_commission(&validator.operator);
        state.set_accumulated_commission(&validator.operator, accumulated.add(&commission));
    }
    state.update_current_rewards(&validator.operator, |current| {
        current.rewards = current.rewards.add(&shared);
    });
    state.add_to_outstanding(&validator.operator, amount);
}
