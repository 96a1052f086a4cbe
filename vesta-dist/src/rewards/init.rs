//! Delegation starting snapshots.

use vesta_core::{Delegation, DelegatorStartingInfo, Validator};

use crate::context::BlockContext;
use crate::state::LedgerWriter;

use super::period::end_current_period;

/// Anchor a delegation in the period ledger.
///
/// Ends the validator's open period and pins the delegation to it: the
/// snapshot holds the ended period, the delegation's stake in tokens
/// (truncated from shares, so settlement can never credit more stake
/// than the shares represent), and the current height. The anchored
/// period's reference count is incremented to keep its record alive
/// until this delegation settles.
pub fn initialize_delegation<S: LedgerWriter>(
    state: &mut S,
    ctx: &BlockContext,
    validator: &Validator,
    delegation: &Delegation,
) {
    let previous_period = end_current_period(state, validator);
    state.increment_reference_count(&validator.operator, previous_period);

    let stake = validator.tokens_from_shares_truncated(&delegation.shares);
    state.set_starting_info(
        &validator.operator,
        &delegation.delegator,
        DelegatorStartingInfo {
            previous_period,
            stake,
            height: ctx.height,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewards::period::allocate_rewards;
    use crate::state::{DistState, LedgerReader};
    use vesta_core::types::denomination::common::STAKE;
    use vesta_core::{Address, Dec, DecCoin, DecCoins, U256};

    const VAL: Address = [1u8; 20];
    const DEL: Address = [2u8; 20];

    fn dec(s: &str) -> Dec {
        s.parse().unwrap()
    }

    fn validator(tokens: u64, shares: &str) -> Validator {
        Validator {
            operator: VAL,
            tokens: U256::from(tokens),
            delegator_shares: dec(shares),
            commission_rate: Dec::zero(),
        }
    }

    fn delegation(shares: &str) -> Delegation {
        Delegation {
            delegator: DEL,
            validator: VAL,
            shares: dec(shares),
        }
    }

    #[test]
    fn test_initialize_anchors_ended_period() {
        let mut state = DistState::new();
        let ctx = BlockContext::new(10);
        let val = validator(100, "100");

        initialize_delegation(&mut state, &ctx, &val, &delegation("100"));

        let info = state.get_starting_info(&VAL, &DEL).unwrap();
        assert_eq!(info.previous_period, 1);
        assert_eq!(info.stake, dec("100"));
        assert_eq!(info.height, 10);

        // held by the open period and by the delegation
        assert_eq!(state.get_period_record(&VAL, 1).unwrap().reference_count, 2);
        assert_eq!(state.get_current_rewards(&VAL).unwrap().period, 2);
    }

    #[test]
    fn test_initialize_truncates_stake() {
        let mut state = DistState::new();
        let ctx = BlockContext::test_context();
        // 100 tokens over 3 shares
        let val = validator(100, "3");

        initialize_delegation(&mut state, &ctx, &val, &delegation("2"));

        let info = state.get_starting_info(&VAL, &DEL).unwrap();
        assert_eq!(info.stake, dec("66.666666666666666666"));
    }

    #[test]
    fn test_initialize_after_accrual_folds_open_period() {
        let mut state = DistState::new();
        let ctx = BlockContext::test_context();
        let val = validator(100, "100");

        allocate_rewards(
            &mut state,
            &val,
            &DecCoins::from_coins(vec![DecCoin::new(STAKE, dec("50"))]),
        );
        initialize_delegation(&mut state, &ctx, &val, &delegation("100"));

        // the accrued 50 over 100 tokens was archived before anchoring
        let previous_period = state.get_starting_info(&VAL, &DEL).unwrap().previous_period;
        let record = state.get_period_record(&VAL, previous_period).unwrap();
        assert_eq!(record.cumulative_reward_ratio.amount_of(&STAKE), dec("0.5"));
    }
}
