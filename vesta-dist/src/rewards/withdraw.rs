//! Delegation reward settlement.

use tracing::info;

use vesta_core::types::denomination::common;
use vesta_core::{Coins, DecCoins, Delegation, SettlementEvent, Validator};

use crate::bank::Bank;
use crate::context::BlockContext;
use crate::error::{hex, DistError, DistResult};
use crate::state::LedgerWriter;

use super::calculate::calculate_delegation_rewards;
use super::init::initialize_delegation;
use super::period::end_current_period;

/// Settle a delegation's accrued rewards and re-anchor it.
///
/// Computes everything accrued since the delegation's snapshot, clips
/// it to the validator's outstanding pool, applies the caller's `cap`
/// (per denomination; denominations absent from a supplied cap claim
/// zero, `None` claims everything), and pays the truncated whole units
/// to the delegator's withdraw address. The fractional remainder goes
/// to the community pool; value capped out by the caller stays in the
/// outstanding pool. The delegation is then re-anchored at the period
/// this settlement ended, so a second withdrawal in the same block pays
/// zero.
///
/// Returns the whole units paid. With no starting snapshot the call
/// fails with [`DistError::NoPendingRewards`]; a failed bank transfer
/// surfaces as-is and leaves the ledger unchanged apart from the period
/// that was already ended.
pub fn withdraw_delegation_rewards<S, B>(
    state: &mut S,
    bank: &mut B,
    ctx: &BlockContext,
    validator: &Validator,
    delegation: &Delegation,
    cap: Option<&DecCoins>,
) -> DistResult<Coins>
where
    S: LedgerWriter,
    B: Bank,
{
    let paid = settle_delegation_rewards(state, bank, ctx, validator, delegation, cap)?;
    initialize_delegation(state, ctx, validator, delegation);
    Ok(paid)
}

fn settle_delegation_rewards<S, B>(
    state: &mut S,
    bank: &mut B,
    ctx: &BlockContext,
    validator: &Validator,
    delegation: &Delegation,
    cap: Option<&DecCoins>,
) -> DistResult<Coins>
where
    S: LedgerWriter,
    B: Bank,
{
    if !state.has_starting_info(&validator.operator, &delegation.delegator) {
        return Err(DistError::NoPendingRewards {
            validator: validator.operator,
            delegator: delegation.delegator,
        });
    }

    let ending_period = end_current_period(state, validator);
    let calculated =
        calculate_delegation_rewards(state, ctx, validator, delegation, ending_period);

    let outstanding = state.get_outstanding(&validator.operator);
    let rewards = calculated.intersect(&outstanding);
    if rewards != calculated {
        // Truncation drift: the pool ran a hair behind the calculation.
        info!(
            validator = %hex(&validator.operator),
            delegator = %hex(&delegation.delegator),
            calculated = %calculated,
            outstanding = %outstanding,
            "clipping delegation rewards to outstanding pool"
        );
    }

    let claimed = match cap {
        Some(cap) => rewards.intersect(cap),
        None => rewards,
    };
    let (coins, remainder) = claimed.truncate_decimal();

    if !coins.is_zero() {
        let to = state.withdraw_address(&delegation.delegator);
        bank.pay_from_rewards_pool(&to, &coins)?;
    }

    let new_outstanding = match outstanding.checked_sub(&claimed) {
        Some(new_outstanding) => new_outstanding,
        None => panic!(
            "outstanding pool {} cannot cover claim {} for validator {}",
            outstanding,
            claimed,
            hex(&validator.operator)
        ),
    };
    state.set_outstanding(&validator.operator, new_outstanding);
    state.add_to_community_pool(&remainder);

    let info = match state.get_starting_info(&validator.operator, &delegation.delegator) {
        Some(info) => info.clone(),
        None => panic!(
            "starting info vanished for delegator {} with validator {}",
            hex(&delegation.delegator),
            hex(&validator.operator)
        ),
    };
    state.decrement_reference_count(&validator.operator, info.previous_period);
    state.delete_starting_info(&validator.operator, &delegation.delegator);

    let amount = if coins.is_empty() {
        Coins::zero_placeholder(common::STAKE)
    } else {
        coins.clone()
    };
    state.record_settlement(SettlementEvent {
        validator: validator.operator,
        delegator: delegation.delegator,
        amount,
    });

    Ok(coins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::ModuleBank;
    use crate::rewards::period::allocate_rewards;
    use crate::state::{DistState, LedgerReader};
    use vesta_core::types::denomination::common::STAKE;
    use vesta_core::{Address, Coin, Dec, DecCoin, U256};

    const VAL: Address = [1u8; 20];
    const DEL: Address = [2u8; 20];
    const OTHER: Address = [3u8; 20];

    fn dec(s: &str) -> Dec {
        s.parse().unwrap()
    }

    fn stake_coins(s: &str) -> DecCoins {
        DecCoins::from_coins(vec![DecCoin::new(STAKE, dec(s))])
    }

    fn validator(tokens: u64) -> Validator {
        Validator {
            operator: VAL,
            tokens: U256::from(tokens),
            delegator_shares: Dec::from_u64(tokens),
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

    fn funded_bank(amount: u64) -> ModuleBank {
        let mut bank = ModuleBank::new();
        bank.fund_pool(&Coins::from_coins(vec![Coin::new(
            STAKE,
            U256::from(amount),
        )]));
        bank
    }

    fn setup(state: &mut DistState, val: &Validator, accrued: &str) {
        initialize_delegation(state, &BlockContext::new(0), val, &delegation("100"));
        allocate_rewards(state, val, &stake_coins(accrued));
    }

    #[test]
    fn test_withdraw_pays_full_accrual() {
        let mut state = DistState::new();
        let mut bank = funded_bank(300);
        let val = validator(100);
        setup(&mut state, &val, "300");

        let paid = withdraw_delegation_rewards(
            &mut state,
            &mut bank,
            &BlockContext::new(1),
            &val,
            &delegation("100"),
            None,
        )
        .unwrap();

        assert_eq!(paid.amount_of(&STAKE), U256::from(300u64));
        assert_eq!(bank.balance_of(&DEL).amount_of(&STAKE), U256::from(300u64));
        assert!(state.get_outstanding(&VAL).is_empty());
        assert!(state.community_pool().is_empty());
    }

    #[test]
    fn test_withdraw_re_anchors_delegation() {
        let mut state = DistState::new();
        let mut bank = funded_bank(300);
        let val = validator(100);
        setup(&mut state, &val, "300");

        withdraw_delegation_rewards(
            &mut state,
            &mut bank,
            &BlockContext::new(1),
            &val,
            &delegation("100"),
            None,
        )
        .unwrap();

        // anchored at the period the settlement ended, taken at height 1
        let info = state.get_starting_info(&VAL, &DEL).unwrap().clone();
        assert_eq!(info.height, 1);
        let record = state.get_period_record(&VAL, info.previous_period).unwrap();
        assert!(record.reference_count >= 1);
    }

    #[test]
    fn test_second_withdrawal_pays_zero() {
        let mut state = DistState::new();
        let mut bank = funded_bank(300);
        let val = validator(100);
        setup(&mut state, &val, "300");

        let ctx = BlockContext::new(1);
        let del = delegation("100");
        let first =
            withdraw_delegation_rewards(&mut state, &mut bank, &ctx, &val, &del, None).unwrap();
        let second =
            withdraw_delegation_rewards(&mut state, &mut bank, &ctx, &val, &del, None).unwrap();

        assert_eq!(first.amount_of(&STAKE), U256::from(300u64));
        assert!(second.is_empty());

        // the empty payout still produced a well-formed notification
        let events = state.settlements();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].amount.amount_of(&STAKE), U256::from(0u64));
        assert!(!events[1].amount.is_empty());
    }

    #[test]
    fn test_withdraw_without_delegation_fails() {
        let mut state = DistState::new();
        let mut bank = funded_bank(0);
        let val = validator(100);

        let result = withdraw_delegation_rewards(
            &mut state,
            &mut bank,
            &BlockContext::new(1),
            &val,
            &delegation("100"),
            None,
        );
        assert!(matches!(result, Err(DistError::NoPendingRewards { .. })));
    }

    #[test]
    fn test_fractional_remainder_goes_to_community_pool() {
        let mut state = DistState::new();
        let mut bank = funded_bank(1000);
        // 3 tokens sharing indivisible rewards
        let val = validator(3);
        initialize_delegation(&mut state, &BlockContext::new(0), &val, &delegation("1"));
        allocate_rewards(&mut state, &val, &stake_coins("100"));

        let paid = withdraw_delegation_rewards(
            &mut state,
            &mut bank,
            &BlockContext::new(1),
            &val,
            &delegation("1"),
            None,
        )
        .unwrap();

        // 100/3 per token, one token of stake
        assert_eq!(paid.amount_of(&STAKE), U256::from(33u64));
        let pool = state.community_pool();
        assert_eq!(pool.amount_of(&STAKE), dec("0.333333333333333333"));
        // outstanding keeps what the other shares have not yet claimed
        assert_eq!(
            state.get_outstanding(&VAL).amount_of(&STAKE),
            dec("66.666666666666666667")
        );
    }

    #[test]
    fn test_claim_clipped_to_outstanding_pool() {
        let mut state = DistState::new();
        let mut bank = funded_bank(300);
        let val = validator(100);
        setup(&mut state, &val, "300");

        // pool tracking ran behind the calculation
        state.set_outstanding(&VAL, stake_coins("250"));

        let paid = withdraw_delegation_rewards(
            &mut state,
            &mut bank,
            &BlockContext::new(1),
            &val,
            &delegation("100"),
            None,
        )
        .unwrap();

        // the clip bounds the payout, the pool drains without underflow
        assert_eq!(paid.amount_of(&STAKE), U256::from(250u64));
        assert!(state.get_outstanding(&VAL).is_empty());
        assert!(state.community_pool().is_empty());
    }

    #[test]
    fn test_clip_keeps_fractional_pool_balance() {
        let mut state = DistState::new();
        let mut bank = funded_bank(300);
        let val = validator(100);
        setup(&mut state, &val, "300");

        state.set_outstanding(&VAL, stake_coins("250.25"));

        let paid = withdraw_delegation_rewards(
            &mut state,
            &mut bank,
            &BlockContext::new(1),
            &val,
            &delegation("100"),
            None,
        )
        .unwrap();

        assert_eq!(paid.amount_of(&STAKE), U256::from(250u64));
        assert_eq!(state.community_pool().amount_of(&STAKE), dec("0.25"));
        assert!(state.get_outstanding(&VAL).is_empty());
    }

    #[test]
    fn test_cap_limits_claim_and_leaves_surplus_outstanding() {
        let mut state = DistState::new();
        let mut bank = funded_bank(300);
        let val = validator(100);
        setup(&mut state, &val, "300");

        let cap = stake_coins("120.5");
        let paid = withdraw_delegation_rewards(
            &mut state,
            &mut bank,
            &BlockContext::new(1),
            &val,
            &delegation("100"),
            Some(&cap),
        )
        .unwrap();

        assert_eq!(paid.amount_of(&STAKE), U256::from(120u64));
        assert_eq!(state.community_pool().amount_of(&STAKE), dec("0.5"));
        assert_eq!(state.get_outstanding(&VAL).amount_of(&STAKE), dec("179.5"));
    }

    #[test]
    fn test_cap_absent_denomination_claims_zero() {
        let mut state = DistState::new();
        let mut bank = funded_bank(300);
        let val = validator(100);
        setup(&mut state, &val, "300");

        let cap = DecCoins::new();
        let paid = withdraw_delegation_rewards(
            &mut state,
            &mut bank,
            &BlockContext::new(1),
            &val,
            &delegation("100"),
            Some(&cap),
        )
        .unwrap();

        assert!(paid.is_empty());
        assert_eq!(state.get_outstanding(&VAL).amount_of(&STAKE), dec("300"));
    }

    #[test]
    fn test_transfer_failure_keeps_claim_pending() {
        let mut state = DistState::new();
        let mut bank = funded_bank(10); // cannot cover 300
        let val = validator(100);
        setup(&mut state, &val, "300");

        let ctx = BlockContext::new(1);
        let del = delegation("100");
        let result =
            withdraw_delegation_rewards(&mut state, &mut bank, &ctx, &val, &del, None);
        assert!(matches!(
            result,
            Err(DistError::InsufficientPoolFunds { .. })
        ));

        // claim still fully pending
        assert!(state.has_starting_info(&VAL, &DEL));
        assert_eq!(state.get_outstanding(&VAL).amount_of(&STAKE), dec("300"));
        assert!(state.settlements().is_empty());

        // retry after funding succeeds in full
        bank.fund_pool(&Coins::from_coins(vec![Coin::new(
            STAKE,
            U256::from(290u64),
        )]));
        let paid =
            withdraw_delegation_rewards(&mut state, &mut bank, &ctx, &val, &del, None).unwrap();
        assert_eq!(paid.amount_of(&STAKE), U256::from(300u64));
    }

    #[test]
    fn test_payout_goes_to_withdraw_address() {
        let mut state = DistState::new();
        let mut bank = funded_bank(300);
        let val = validator(100);
        setup(&mut state, &val, "300");
        state.set_withdraw_address(&DEL, OTHER);

        withdraw_delegation_rewards(
            &mut state,
            &mut bank,
            &BlockContext::new(1),
            &val,
            &delegation("100"),
            None,
        )
        .unwrap();

        assert!(bank.balance_of(&DEL).is_empty());
        assert_eq!(
            bank.balance_of(&OTHER).amount_of(&STAKE),
            U256::from(300u64)
        );
    }
}
