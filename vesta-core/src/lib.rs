//! # Vesta Core
//!
//! Core types and arithmetic for the Vesta distribution module.
//!
//! This crate provides the foundation for the reward-accounting engine:
//! - 256-bit unsigned arithmetic backing the decimal type
//! - `Dec`, an 18-place fixed-precision decimal (never floating point)
//! - Denominated decimal and whole-unit coin collections
//! - Staking view objects (validator, delegation)
//! - Distribution ledger records (periods, starting info, slash events)
//! - Deterministic binary serialization

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod dec;
pub mod error;
pub mod serialization;
pub mod types;
pub mod u256;

// Re-export commonly used types at crate root
pub use dec::Dec;
pub use error::{CoreError, DecError, DenominationError, SerializationError};
pub use types::{
    Address, Coin, Coins, CurrentRewards, DecCoin, DecCoins, Delegation, DelegatorStartingInfo,
    Denomination, PeriodRecord, SettlementEvent, SlashEvent, Validator,
};
pub use u256::U256;
