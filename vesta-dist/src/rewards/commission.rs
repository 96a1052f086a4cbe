//! Validator commission withdrawal.

use vesta_core::{Address, Coins};

use crate::bank::Bank;
use crate::error::{hex, DistError, DistResult};
use crate::state::LedgerWriter;

/// Pay out a validator's accumulated commission.
///
/// Truncates the accumulated decimal commission to whole units and pays
/// them to the validator's withdraw address; the fractional remainder
/// stays accumulated for a later withdrawal. The paid amount is
/// deducted from the validator's outstanding pool.
pub fn withdraw_validator_commission<S, B>(
    state: &mut S,
    bank: &mut B,
    validator: &Address,
) -> DistResult<Coins>
where
    S: LedgerWriter,
    B: Bank,
{
    let accumulated = state.get_accumulated_commission(validator);
    if accumulated.is_zero() {
        return Err(DistError::NoAccumulatedCommission {
            validator: *validator,
        });
    }

    let (coins, remainder) = accumulated.truncate_decimal();
    if !coins.is_zero() {
        let to = state.withdraw_address(validator);
        bank.pay_from_rewards_pool(&to, &coins)?;
    }

    state.set_accumulated_commission(validator, remainder);

    let outstanding = state.get_outstanding(validator);
    let paid = coins.to_dec_coins();
    let new_outstanding = match outstanding.checked_sub(&paid) {
        Some(new_outstanding) => new_outstanding,
        None => panic!(
            "outstanding pool {} cannot cover commission {} for validator {}",
            outstanding,
            paid,
            hex(validator)
        ),
    };
    state.set_outstanding(validator, new_outstanding);

    Ok(coins)
}
