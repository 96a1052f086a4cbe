//! Reward calculation over the period ledger.

use vesta_core::{Address, Dec, DecCoins, Delegation, U256, Validator};

use crate::context::BlockContext;
use crate::error::hex;
use crate::state::LedgerReader;

/// Rewards accrued by `stake` tokens between two closed periods.
///
/// `(ending ratio − starting ratio) × stake`, truncated per
/// denomination. Pure over the stored ledger.
///
/// # Panics
///
/// Periods out of order, a missing record, or a cumulative ratio that
/// decreased between the two periods all indicate ledger corruption and
/// panic.
pub fn calculate_rewards_between<S: LedgerReader>(
    state: &mut S,
    validator: &Address,
    starting_period: u64,
    ending_period: u64,
    stake: &Dec,
) -> DecCoins {
    if starting_period > ending_period {
        panic!(
            "starting period {} after ending period {} for validator {}",
            starting_period,
            ending_period,
            hex(validator)
        );
    }

    let starting = ratio_at(state, validator, starting_period);
    let ending = ratio_at(state, validator, ending_period);
    let difference = match ending.checked_sub(&starting) {
        Some(difference) => difference,
        None => panic!(
            "cumulative reward ratio decreased between periods {} and {} for validator {}",
            starting_period,
            ending_period,
            hex(validator)
        ),
    };

    difference.mul_dec_truncate(stake)
}

fn ratio_at<S: LedgerReader>(state: &mut S, validator: &Address, period: u64) -> DecCoins {
    match state.get_period_record(validator, period) {
        Some(record) => record.cumulative_reward_ratio.clone(),
        None => panic!(
            "period record {} missing for validator {}",
            period,
            hex(validator)
        ),
    }
}

/// Total rewards a delegation has accrued up to `ending_period`.
///
/// Starts from the delegation's snapshot and walks the validator's
/// slash events with height in `(snapshot height, current height]` in
/// ascending order: each event closes a slice at the event's period and
/// shrinks the running stake by the slashed fraction (truncating).
/// Events whose period does not exceed the running period are skipped.
/// The final slice runs to `ending_period` with the surviving stake.
///
/// A delegation snapshotted at the current height has accrued nothing
/// yet and yields zero.
///
/// The surviving stake may exceed the delegation's live stake by a few
/// smallest-decimal units when a slash truncated against the delegator
/// inside the staking module; drift up to 3 such units is clamped to
/// the live stake, anything larger panics.
pub fn calculate_delegation_rewards<S: LedgerReader>(
    state: &mut S,
    ctx: &BlockContext,
    validator: &Validator,
    delegation: &Delegation,
    ending_period: u64,
) -> DecCoins {
    let info = match state.get_starting_info(&validator.operator, &delegation.delegator) {
        Some(info) => info.clone(),
        None => panic!(
            "starting info missing for delegator {} with validator {}",
            hex(&delegation.delegator),
            hex(&validator.operator)
        ),
    };

    if info.height == ctx.height {
        return DecCoins::new();
    }

    let mut rewards = DecCoins::new();
    let mut period = info.previous_period;
    let mut stake = info.stake;

    if ctx.height > info.height {
        let events =
            state.slash_events_between(&validator.operator, info.height + 1, ctx.height);
        for event in events {
            if event.validator_period > period {
                rewards = rewards.add(&calculate_rewards_between(
                    state,
                    &validator.operator,
                    period,
                    event.validator_period,
                    &stake,
                ));
                let retained = match Dec::one().checked_sub(&event.fraction) {
                    Some(retained) => retained,
                    None => panic!(
                        "slash fraction {} above one for validator {}",
                        event.fraction,
                        hex(&validator.operator)
                    ),
                };
                stake = stake.mul_truncate(&retained);
                period = event.validator_period;
            }
        }
    }

    // The snapshot stake ran through truncating slash math on both the
    // staking side and here; tolerate the few smallest units they can
    // disagree by, anything more means the ledger lost track.
    let current_stake = validator.tokens_from_shares(&delegation.shares);
    if stake > current_stake {
        let margin = Dec::smallest().mul_int(U256::from(3u64));
        if stake <= current_stake.add(&margin) {
            stake = current_stake;
        } else {
            panic!(
                "calculated stake {} exceeds current stake {} for delegator {} with validator {}",
                stake,
                current_stake,
                hex(&delegation.delegator),
                hex(&validator.operator)
            );
        }
    }

    rewards.add(&calculate_rewards_between(
        state,
        &validator.operator,
        period,
        ending_period,
        &stake,
    ))
}
