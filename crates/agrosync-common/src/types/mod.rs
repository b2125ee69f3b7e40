//! Core data types for the staking ledger

pub mod pool;
pub mod position;

pub use pool::{PoolTerms, StakingPool};
pub use position::{PositionStatus, StakingPosition};
