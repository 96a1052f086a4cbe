//! Error types for the distribution engine.
//!
//! Only recoverable conditions are represented here: caller mistakes
//! and external transfer failures. Invariant breaches (period ordering,
//! ratio decrease, stake drift beyond tolerance) abort via `panic!`
//! instead, so they can never be swallowed by a caller.

use std::fmt;

use vesta_core::{Address, Denomination, U256};
use vesta_core::types::denomination::denomination_to_string;

/// Result type for distribution operations.
pub type DistResult<T> = Result<T, DistError>;

/// Recoverable errors from distribution operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DistError {
    /// The delegation has no starting info, so there is nothing to settle.
    NoPendingRewards {
        /// Validator operator address.
        validator: Address,
        /// Delegator account address.
        delegator: Address,
    },
    /// The validator has no accumulated commission to withdraw.
    NoAccumulatedCommission {
        /// Validator operator address.
        validator: Address,
    },
    /// The rewards pool cannot cover a requested transfer.
    InsufficientPoolFunds {
        /// Denomination that fell short.
        denom: Denomination,
        /// Amount available in the pool.
        available: U256,
        /// Amount the transfer needed.
        requested: U256,
    },
}

impl fmt::Display for DistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistError::NoPendingRewards { validator, delegator } => write!(
                f,
                "no pending rewards for delegator {} with validator {}",
                hex(delegator),
                hex(validator)
            ),
            DistError::NoAccumulatedCommission { validator } => {
                write!(f, "no accumulated commission for validator {}", hex(validator))
            }
            DistError::InsufficientPoolFunds {
                denom,
                available,
                requested,
            } => write!(
                f,
                "rewards pool holds {} {} but transfer needs {}",
                available,
                denomination_to_string(denom),
                requested
            ),
        }
    }
}

impl std::error::Error for DistError {}

/// Lowercase hex rendering of a raw address.
pub(crate) fn hex(addr: &Address) -> String {
    let mut s = String::with_capacity(40);
    for byte in addr {
        s.push_str(&format!("{:02x}", byte));
    }
    s
}
