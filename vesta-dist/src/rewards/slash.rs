//! Slashing hook.

use vesta_core::{Dec, SlashEvent, Validator};

use crate::context::BlockContext;
use crate::error::hex;
use crate::state::LedgerWriter;

use super::period::end_current_period;

/// Record a slash against a validator.
///
/// Called with the validator's pre-slash token balance. Ends the open
/// period so the reward ratio up to the slash is archived, then stores
/// a [`SlashEvent`] at the current height referencing that period;
/// settlement walks these events to shrink the stake of delegations
/// that lived through them. The referenced record's count is
/// incremented so it outlives the delegations anchored before it.
///
/// # Panics
///
/// A fraction above one would destroy more than the whole stake and
/// panics.
pub fn record_validator_slash<S: LedgerWriter>(
    state: &mut S,
    ctx: &BlockContext,
    validator: &Validator,
    fraction: Dec,
) {
    if fraction > Dec::one() {
        panic!(
            "slash fraction {} above one for validator {}",
            fraction,
            hex(&validator.operator)
        );
    }

    let period = end_current_period(state, validator);
    state.increment_reference_count(&validator.operator, period);
    state.insert_slash_event(
        &validator.operator,
        ctx.height,
        SlashEvent {
            validator_period: period,
            fraction,
        },
    );
}
