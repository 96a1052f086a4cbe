//! Reward accrual, calculation, and settlement.

mod calculate;
mod commission;
mod init;
mod period;
mod slash;
mod withdraw;

pub use calculate::{calculate_delegation_rewards, calculate_rewards_between};
pub use commission::withdraw_validator_commission;
pub use init::initialize_delegation;
pub use period::{allocate_rewards, end_current_period};
pub use slash::record_validator_slash;
pub use withdraw::withdraw_delegation_rewards;
