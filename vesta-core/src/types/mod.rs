//! Protocol data types for the Vesta distribution module.

pub mod coins;
pub mod denomination;
pub mod distribution;
pub mod staking;

pub use coins::{Coin, Coins, DecCoin, DecCoins};
pub use denomination::Denomination;
pub use distribution::{
    CurrentRewards, DelegatorStartingInfo, PeriodRecord, SettlementEvent, SlashEvent,
};
pub use staking::{Address, Delegation, Validator};
