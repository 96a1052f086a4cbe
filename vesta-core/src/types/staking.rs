//! Staking-side views consumed by the reward engine.
//!
//! The engine does not own bonding; it reads validator and delegation
//! records maintained by the staking module and converts between shares
//! and tokens with the same rounding the staking module uses.

use serde::{Deserialize, Serialize};

use crate::dec::Dec;
use crate::u256::U256;

/// Raw 20-byte account address.
pub type Address = [u8; 20];

/// A validator as seen by the reward engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    /// Operator address, the key every distribution record hangs off.
    pub operator: Address,
    /// Bonded tokens currently backing the validator.
    pub tokens: U256,
    /// Total delegator shares issued against those tokens.
    pub delegator_shares: Dec,
    /// Fraction of accrued rewards retained as commission.
    pub commission_rate: Dec,
}

impl Validator {
    /// Convert delegator shares to tokens, rounding the result half up.
    ///
    /// Used once at delegation time to pin the stake snapshot.
    pub fn tokens_from_shares(&self, shares: &Dec) -> Dec {
        if self.delegator_shares.is_zero() {
            return Dec::zero();
        }
        shares.mul_int(self.tokens).quo(&self.delegator_shares)
    }

    /// Convert delegator shares to tokens, truncating toward zero.
    ///
    /// The truncating variant never credits a delegator with more stake
    /// than the shares actually represent.
    pub fn tokens_from_shares_truncated(&self, shares: &Dec) -> Dec {
        if self.delegator_shares.is_zero() {
            return Dec::zero();
        }
        shares
            .mul_int(self.tokens)
            .quo_truncate(&self.delegator_shares)
    }
}

/// A delegation as seen by the reward engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    /// Delegator account address.
    pub delegator: Address,
    /// Operator address of the delegated-to validator.
    pub validator: Address,
    /// Shares held against the validator.
    pub shares: Dec,
}
