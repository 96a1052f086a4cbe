//! # Vesta Distribution Engine
//!
//! Deterministic reward calculation and settlement for a delegated
//! proof-of-stake ledger.
//!
//! Validator rewards accrue into numbered periods; each delegation pins
//! a starting snapshot (period, stake, height) and is later settled by
//! integrating the cumulative reward-per-token ratio across the periods
//! it spanned, applying any slashes that hit the validator along the
//! way. All decimal math truncates toward zero, so a delegator can
//! never be paid more than accrued; truncation remainders are routed to
//! the community pool.
//!
//! The engine is a pure state machine over the [`state::LedgerWriter`]
//! trait with a [`bank::Bank`] collaborator for the actual transfer.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod bank;
pub mod context;
pub mod error;
pub mod rewards;
pub mod state;

pub use bank::{Bank, ModuleBank};
pub use context::BlockContext;
pub use error::{DistError, DistResult};
pub use rewards::{
    allocate_rewards, calculate_delegation_rewards, calculate_rewards_between,
    end_current_period, initialize_delegation, record_validator_slash,
    withdraw_delegation_rewards, withdraw_validator_commission,
};
pub use state::{DistState, LedgerReader, LedgerStore, LedgerWriter};
