use {
    crate::{
        rewards::accrued_rewards,
        LedgerError, Result,
    },
    agrosync_common::{
        types::{PoolTerms, PositionStatus, StakingPool, StakingPosition},
        utils::{current_timestamp, current_timestamp_millis, whole_days_between},
    },
    agrosync_store::{PoolDelta, PositionSettlement, RecordStore},
    anyhow::anyhow,
    serde::Serialize,
    std::sync::Arc,
    tracing::info,
};

/// Outcome of a successful `stake`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeReceipt {
    pub position_id: String,
    pub amount: f64,
    pub pool_name: String,
}

/// Outcome of a successful `unstake`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnstakeReceipt {
    pub amount: f64,
    pub rewards: f64,
    pub days_staked: i64,
}

/// Outcome of a successful `claim_rewards`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReceipt {
    pub rewards: f64,
}

/// A user's positions across all pools and statuses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingSummary {
    pub positions: Vec<StakingPosition>,
    pub count: usize,
}

/// The staking ledger: every operation is a request-scoped unit of work
/// against the record store. Pool aggregates move only through the store's
/// atomic adjustments, and position transitions go through conditional
/// writes, so concurrent requests against the same pool or position cannot
/// corrupt either.
pub struct StakingLedger {
    store: Arc<dyn RecordStore>,
}

impl StakingLedger {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Open a new position in `pool_id` for `user_id`.
    ///
    /// The position record is written before the pool aggregates are bumped:
    /// a crash between the two leaves the pool undercounted, never a phantom
    /// participant.
    pub async fn stake(&self, user_id: &str, pool_id: &str, amount: f64) -> Result<StakeReceipt> {
        let pool = self
            .store
            .get_pool(pool_id)
            .await?
            .filter(|p| p.is_active)
            .ok_or(LedgerError::PoolUnavailable)?;

        if amount < pool.min_stake {
            return Err(LedgerError::BelowMinimum {
                min: pool.min_stake,
            });
        }
        if let Some(max) = pool.max_stake {
            if amount > max {
                return Err(LedgerError::AboveMaximum { max });
            }
        }

        let now = current_timestamp();
        let position = StakingPosition {
            id: new_position_id(user_id),
            user_id: user_id.to_string(),
            pool_id: pool_id.to_string(),
            amount,
            start_date: now,
            end_date: None,
            rewards: 0.0,
            status: PositionStatus::Active,
            created_at: now,
            updated_at: now,
        };
        let position_id = position.id.clone();

        self.store.put_position(position).await?;
        self.store
            .adjust_pool_aggregates(
                pool_id,
                PoolDelta {
                    staked: amount,
                    participants: 1,
                    rewards: 0.0,
                },
            )
            .await?;

        info!(user_id, pool_id, amount, position_id = %position_id, "Opened staking position");

        Ok(StakeReceipt {
            position_id,
            amount,
            pool_name: pool.name,
        })
    }

    /// Close an active position: freeze the accrued rewards and release the
    /// principal from the pool aggregates.
    pub async fn unstake(&self, user_id: &str, position_id: &str) -> Result<UnstakeReceipt> {
        let position = self.owned_position(user_id, position_id).await?;
        if position.status != PositionStatus::Active {
            return Err(LedgerError::InvalidState);
        }

        let now = current_timestamp();
        let days_staked = whole_days_between(position.start_date, now);

        // Accrual reads the pool's apy as of unstake time.
        let pool = self
            .store
            .get_pool(&position.pool_id)
            .await?
            .ok_or_else(|| anyhow!("Pool '{}' missing for position '{}'", position.pool_id, position_id))?;
        let rewards = accrued_rewards(position.amount, pool.apy, days_staked);

        // Conditional write: a concurrent unstake settles this position at
        // most once, so the pool decrement below cannot be applied twice.
        let settled = self
            .store
            .settle_position(
                position_id,
                PositionStatus::Active,
                PositionSettlement {
                    status: PositionStatus::Completed,
                    end_date: Some(now),
                    rewards: Some(rewards),
                    updated_at: now,
                },
            )
            .await?;
        if !settled {
            return Err(LedgerError::InvalidState);
        }

        self.store
            .adjust_pool_aggregates(
                &position.pool_id,
                PoolDelta {
                    staked: -position.amount,
                    participants: -1,
                    rewards,
                },
            )
            .await?;

        info!(
            user_id,
            position_id,
            days_staked,
            rewards,
            "Closed staking position"
        );

        Ok(UnstakeReceipt {
            amount: position.amount,
            rewards,
            days_staked,
        })
    }

    /// Mark a completed position's frozen rewards as disbursed. The value is
    /// not recomputed and no funds move here; settlement is an external
    /// collaborator's concern.
    pub async fn claim_rewards(&self, user_id: &str, position_id: &str) -> Result<ClaimReceipt> {
        let position = self.owned_position(user_id, position_id).await?;
        if position.status != PositionStatus::Completed || position.rewards <= 0.0 {
            return Err(LedgerError::NoRewardsAvailable);
        }

        let settled = self
            .store
            .settle_position(
                position_id,
                PositionStatus::Completed,
                PositionSettlement {
                    status: PositionStatus::Rewarded,
                    end_date: None,
                    rewards: None,
                    updated_at: current_timestamp(),
                },
            )
            .await?;
        if !settled {
            return Err(LedgerError::NoRewardsAvailable);
        }

        info!(user_id, position_id, rewards = position.rewards, "Claimed rewards");

        Ok(ClaimReceipt {
            rewards: position.rewards,
        })
    }

    /// All positions owned by `user_id`, with a count.
    pub async fn staking_info(&self, user_id: &str) -> Result<StakingSummary> {
        let positions = self.store.positions_by_user(user_id).await?;
        let count = positions.len();
        Ok(StakingSummary { positions, count })
    }

    /// All pools currently accepting stakes.
    pub async fn active_pools(&self) -> Result<Vec<StakingPool>> {
        Ok(self.store.active_pools().await?)
    }

    /// Create the pool described by `terms` if the store does not hold it
    /// yet. Used for startup seeding; idempotent across restarts.
    pub async fn ensure_pool(&self, terms: PoolTerms) -> Result<()> {
        if self.store.get_pool(&terms.id).await?.is_some() {
            return Ok(());
        }
        let pool_id = terms.id.clone();
        self.store.put_pool(terms.into_pool()).await?;
        info!(pool_id = %pool_id, "Seeded staking pool");
        Ok(())
    }

    /// Create or reconfigure a pool. Terms overwrite; aggregates of an
    /// existing pool are preserved.
    pub async fn upsert_pool(&self, terms: PoolTerms) -> Result<StakingPool> {
        let pool = match self.store.get_pool(&terms.id).await? {
            Some(mut existing) => {
                terms.apply_to(&mut existing);
                existing
            }
            None => terms.into_pool(),
        };
        self.store.put_pool(pool.clone()).await?;
        info!(pool_id = %pool.id, "Upserted staking pool");
        Ok(pool)
    }

    /// Ownership check folded into the lookup: a position owned by someone
    /// else is reported exactly like a missing one.
    async fn owned_position(&self, user_id: &str, position_id: &str) -> Result<StakingPosition> {
        self.store
            .get_position(position_id)
            .await?
            .filter(|p| p.user_id == user_id)
            .ok_or(LedgerError::PositionNotFound)
    }
}

// Time-based with a random discriminator so bursts within one millisecond
// cannot collide.
fn new_position_id(user_id: &str) -> String {
    format!(
        "stake_{}_{:06}_{}",
        current_timestamp_millis(),
        fastrand::u32(..1_000_000),
        user_id
    )
}
