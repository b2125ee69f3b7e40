//! Staking ledger core for the AgroSync marketplace
//! Governs the position lifecycle and reward accrual under pool invariants

pub mod ledger;
pub mod rewards;


use thiserror::Error;

pub use ledger::{ClaimReceipt, StakeReceipt, StakingLedger, StakingSummary, UnstakeReceipt};

/// Errors that can occur in ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Staking pool not found or not active")]
    PoolUnavailable,

    #[error("Stake amount is below the pool minimum of {min}")]
    BelowMinimum { min: f64 },

    #[error("Stake amount is above the pool maximum of {max}")]
    AboveMaximum { max: f64 },

    #[error("Staking position not found")]
    PositionNotFound,

    #[error("Staking position is not active")]
    InvalidState,

    #[error("No rewards available to claim")]
    NoRewardsAvailable,

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
