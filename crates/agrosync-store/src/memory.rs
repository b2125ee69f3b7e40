use {
    crate::traits::{PoolDelta, PositionSettlement, RecordStore},
    agrosync_common::types::{PositionStatus, StakingPool, StakingPosition},
    anyhow::Result,
    async_trait::async_trait,
    std::collections::HashMap,
    tokio::sync::RwLock,
};

/// Process-local record store. Backs the test suites and single-node
/// development runs; the write lock gives the same atomic-adjust and
/// compare-and-swap guarantees the durable backends provide.
#[derive(Default)]
pub struct MemoryStore {
    pools: RwLock<HashMap<String, StakingPool>>,
    positions: RwLock<HashMap<String, StakingPosition>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get_pool(&self, pool_id: &str) -> Result<Option<StakingPool>> {
        let pools = self.pools.read().await;
        Ok(pools.get(pool_id).cloned())
    }

    async fn put_pool(&self, pool: StakingPool) -> Result<()> {
        let mut pools = self.pools.write().await;
        pools.insert(pool.id.clone(), pool);
        Ok(())
    }

    async fn active_pools(&self) -> Result<Vec<StakingPool>> {
        let pools = self.pools.read().await;
        let mut active: Vec<StakingPool> = pools.values().filter(|p| p.is_active).cloned().collect();
        active.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(active)
    }

    async fn adjust_pool_aggregates(&self, pool_id: &str, delta: PoolDelta) -> Result<()> {
        let mut pools = self.pools.write().await;
        if let Some(pool) = pools.get_mut(pool_id) {
            pool.total_staked += delta.staked;
            pool.total_rewards += delta.rewards;
            pool.current_participants =
                (pool.current_participants as i64 + delta.participants).max(0) as u64;
        }
        Ok(())
    }

    async fn get_position(&self, position_id: &str) -> Result<Option<StakingPosition>> {
        let positions = self.positions.read().await;
        Ok(positions.get(position_id).cloned())
    }

    async fn put_position(&self, position: StakingPosition) -> Result<()> {
        let mut positions = self.positions.write().await;
        positions.insert(position.id.clone(), position);
        Ok(())
    }

    async fn positions_by_user(&self, user_id: &str) -> Result<Vec<StakingPosition>> {
        let positions = self.positions.read().await;
        let mut owned: Vec<StakingPosition> = positions
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(owned)
    }

    async fn settle_position(
        &self,
        position_id: &str,
        expected: PositionStatus,
        settlement: PositionSettlement,
    ) -> Result<bool> {
        let mut positions = self.positions.write().await;
        match positions.get_mut(position_id) {
            Some(position) if position.status == expected => {
                position.status = settlement.status;
                if let Some(end_date) = settlement.end_date {
                    position.end_date = Some(end_date);
                }
                if let Some(rewards) = settlement.rewards {
                    position.rewards = rewards;
                }
                position.updated_at = settlement.updated_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
