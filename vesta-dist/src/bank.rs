//! Transfer collaborator for settlement payouts.
//!
//! The engine never moves tokens itself; it asks a [`Bank`] to pay
//! whole-unit coins out of the module's rewards pool. A failed transfer
//! surfaces as a recoverable error and the engine leaves the settlement
//! unapplied.

use std::collections::HashMap;

use vesta_core::{Address, Coin, Coins};

use crate::error::{DistError, DistResult};

/// Pays settlement amounts out of the distribution module's pool.
pub trait Bank {
    /// Transfer `amount` from the rewards pool to `to`.
    ///
    /// Either the full amount moves or nothing does.
    fn pay_from_rewards_pool(&mut self, to: &Address, amount: &Coins) -> DistResult<()>;
}

/// Simple account-map bank for tests and development.
#[derive(Clone, Debug, Default)]
pub struct ModuleBank {
    pool: Coins,
    balances: HashMap<Address, Coins>,
}

impl ModuleBank {
    /// Create a bank with an empty rewards pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deposit coins into the rewards pool.
    pub fn fund_pool(&mut self, amount: &Coins) {
        self.pool = self.pool.add(amount);
    }

    /// Current rewards pool balance.
    pub fn pool(&self) -> &Coins {
        &self.pool
    }

    /// Balance held by an account.
    pub fn balance_of(&self, addr: &Address) -> Coins {
        self.balances.get(addr).cloned().unwrap_or_default()
    }
}

impl Bank for ModuleBank {
    fn pay_from_rewards_pool(&mut self, to: &Address, amount: &Coins) -> DistResult<()> {
        // Validate before mutating so a shortfall leaves the pool intact.
        for coin in amount.iter() {
            let available = self.pool.amount_of(&coin.denom);
            if available < coin.amount {
                return Err(DistError::InsufficientPoolFunds {
                    denom: coin.denom,
                    available,
                    requested: coin.amount,
                });
            }
        }

        self.pool = match self.pool.checked_sub(amount) {
            Some(pool) => pool,
            None => unreachable!("pool balance checked above"),
        };

        let entry = self.balances.entry(*to).or_default();
        for coin in amount.iter() {
            entry.add_coin(Coin::new(coin.denom, coin.amount));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesta_core::types::denomination::common::{PHOTON, STAKE};
    use vesta_core::U256;

    const ALICE: Address = [7u8; 20];

    fn coins(denom: vesta_core::Denomination, amount: u64) -> Coins {
        Coins::from_coins(vec![Coin::new(denom, U256::from(amount))])
    }

    #[test]
    fn test_pay_moves_funds() {
        let mut bank = ModuleBank::new();
        bank.fund_pool(&coins(STAKE, 100));

        bank.pay_from_rewards_pool(&ALICE, &coins(STAKE, 60)).unwrap();

        assert_eq!(bank.pool().amount_of(&STAKE), U256::from(40u64));
        assert_eq!(bank.balance_of(&ALICE).amount_of(&STAKE), U256::from(60u64));
    }

    #[test]
    fn test_pay_insufficient_leaves_pool_intact() {
        let mut bank = ModuleBank::new();
        bank.fund_pool(&coins(STAKE, 50));

        let result = bank.pay_from_rewards_pool(&ALICE, &coins(STAKE, 60));
        assert!(matches!(
            result,
            Err(DistError::InsufficientPoolFunds { .. })
        ));
        assert_eq!(bank.pool().amount_of(&STAKE), U256::from(50u64));
        assert!(bank.balance_of(&ALICE).is_empty());
    }

    #[test]
    fn test_pay_multi_denom_all_or_nothing() {
        let mut bank = ModuleBank::new();
        bank.fund_pool(&coins(STAKE, 100));

        // photon missing from the pool, so nothing moves
        let request = coins(STAKE, 10).add(&coins(PHOTON, 1));
        let result = bank.pay_from_rewards_pool(&ALICE, &request);
        assert!(matches!(
            result,
            Err(DistError::InsufficientPoolFunds { denom: PHOTON, .. })
        ));
        assert_eq!(bank.pool().amount_of(&STAKE), U256::from(100u64));
        assert!(bank.balance_of(&ALICE).is_empty());
    }
}
