use {
    agrosync_common::types::{PositionStatus, StakingPool, StakingPosition},
    anyhow::Result,
    async_trait::async_trait,
    std::sync::Arc,
};

/// Atomic adjustment applied to a pool's aggregate counters. Deltas are
/// applied by the backend's own atomic-add primitive, never through an
/// application-level read-modify-write.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoolDelta {
    pub staked: f64,
    pub participants: i64,
    pub rewards: f64,
}

/// Fields written by a conditional position transition. `None` leaves the
/// stored value untouched.
#[derive(Debug, Clone)]
pub struct PositionSettlement {
    pub status: PositionStatus,
    pub end_date: Option<i64>,
    pub rewards: Option<f64>,
    pub updated_at: i64,
}

/// A trait representing the persistence capabilities required by the staking
/// ledger. This abstraction allows for pluggable storage backends; any
/// document or key-value store offering atomic counters and a
/// compare-and-swap write can satisfy it.
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Get a pool by id
    async fn get_pool(&self, pool_id: &str) -> Result<Option<StakingPool>>;

    /// Insert or replace a pool record
    async fn put_pool(&self, pool: StakingPool) -> Result<()>;

    /// All pools currently accepting stakes
    async fn active_pools(&self) -> Result<Vec<StakingPool>>;

    /// Atomically add `delta` to the pool's aggregate counters
    async fn adjust_pool_aggregates(&self, pool_id: &str, delta: PoolDelta) -> Result<()>;

    /// Get a position by id
    async fn get_position(&self, position_id: &str) -> Result<Option<StakingPosition>>;

    /// Insert or replace a position record
    async fn put_position(&self, position: StakingPosition) -> Result<()>;

    /// All positions owned by a user, across pools and statuses
    async fn positions_by_user(&self, user_id: &str) -> Result<Vec<StakingPosition>>;

    /// Compare-and-swap transition: apply `settlement` only if the position
    /// still has status `expected`. Returns false when the condition no
    /// longer holds (the position changed under a concurrent caller).
    async fn settle_position(
        &self,
        position_id: &str,
        expected: PositionStatus,
        settlement: PositionSettlement,
    ) -> Result<bool>;

    /// Close the store (flush any pending writes, close connections, etc.)
    async fn close(&self) -> Result<()>;
}

/// Factory trait for creating store instances
#[async_trait]
pub trait StoreFactory: Send + Sync + 'static {
    /// Create a new store instance with the given configuration
    async fn create_store(&self) -> Result<Arc<dyn RecordStore>>;
}
