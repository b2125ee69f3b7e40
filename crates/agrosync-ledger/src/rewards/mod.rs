//! Reward accrual for staking positions

pub mod calculation;

pub use calculation::{accrued_rewards, DAYS_PER_YEAR};
