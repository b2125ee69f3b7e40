use {
    crate::traits::{PoolDelta, PositionSettlement, RecordStore},
    agrosync_common::types::{PositionStatus, StakingPool, StakingPosition},
    anyhow::{anyhow, Result},
    async_trait::async_trait,
    sqlx::{
        postgres::{PgPoolOptions, PgRow},
        PgPool, Row,
    },
    tracing::info,
};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS staking_pools (
    id                   TEXT PRIMARY KEY,
    name                 TEXT NOT NULL,
    is_active            BOOLEAN NOT NULL,
    min_stake            DOUBLE PRECISION NOT NULL,
    max_stake            DOUBLE PRECISION,
    apy                  DOUBLE PRECISION NOT NULL,
    total_staked         DOUBLE PRECISION NOT NULL DEFAULT 0,
    total_rewards        DOUBLE PRECISION NOT NULL DEFAULT 0,
    current_participants BIGINT NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS staking_positions (
    id         TEXT PRIMARY KEY,
    user_id    TEXT NOT NULL,
    pool_id    TEXT NOT NULL,
    amount     DOUBLE PRECISION NOT NULL,
    start_date BIGINT NOT NULL,
    end_date   BIGINT,
    rewards    DOUBLE PRECISION NOT NULL DEFAULT 0,
    status     TEXT NOT NULL,
    created_at BIGINT NOT NULL,
    updated_at BIGINT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_staking_positions_user ON staking_positions (user_id);
"#;

/// Durable PostgreSQL record store. Aggregate adjustments run as in-database
/// `x = x + delta` updates and position transitions as conditional updates
/// on `status`, so concurrent ledger operations never race through an
/// application-level read-modify-write.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        info!("Connected to PostgreSQL record store");
        Ok(store)
    }

    async fn init_schema(&self) -> Result<()> {
        for statement in SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

fn pool_from_row(row: &PgRow) -> Result<StakingPool> {
    Ok(StakingPool {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        is_active: row.try_get("is_active")?,
        min_stake: row.try_get("min_stake")?,
        max_stake: row.try_get("max_stake")?,
        apy: row.try_get("apy")?,
        total_staked: row.try_get("total_staked")?,
        total_rewards: row.try_get("total_rewards")?,
        current_participants: row.try_get::<i64, _>("current_participants")?.max(0) as u64,
    })
}

fn position_from_row(row: &PgRow) -> Result<StakingPosition> {
    let status: String = row.try_get("status")?;
    Ok(StakingPosition {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        pool_id: row.try_get("pool_id")?,
        amount: row.try_get("amount")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        rewards: row.try_get("rewards")?,
        status: PositionStatus::parse(&status)
            .ok_or_else(|| anyhow!("Unknown position status '{}' in store", status))?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl RecordStore for PostgresStore {
    async fn get_pool(&self, pool_id: &str) -> Result<Option<StakingPool>> {
        let row = sqlx::query("SELECT * FROM staking_pools WHERE id = $1")
            .bind(pool_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(pool_from_row).transpose()
    }

    async fn put_pool(&self, pool: StakingPool) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO staking_pools
                (id, name, is_active, min_stake, max_stake, apy, total_staked, total_rewards, current_participants)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                is_active = EXCLUDED.is_active,
                min_stake = EXCLUDED.min_stake,
                max_stake = EXCLUDED.max_stake,
                apy = EXCLUDED.apy,
                total_staked = EXCLUDED.total_staked,
                total_rewards = EXCLUDED.total_rewards,
                current_participants = EXCLUDED.current_participants
            "#,
        )
        .bind(&pool.id)
        .bind(&pool.name)
        .bind(pool.is_active)
        .bind(pool.min_stake)
        .bind(pool.max_stake)
        .bind(pool.apy)
        .bind(pool.total_staked)
        .bind(pool.total_rewards)
        .bind(pool.current_participants as i64)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn active_pools(&self) -> Result<Vec<StakingPool>> {
        let rows = sqlx::query("SELECT * FROM staking_pools WHERE is_active ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(pool_from_row).collect()
    }

    async fn adjust_pool_aggregates(&self, pool_id: &str, delta: PoolDelta) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE staking_pools SET
                total_staked = total_staked + $2,
                current_participants = GREATEST(current_participants + $3, 0),
                total_rewards = total_rewards + $4
            WHERE id = $1
            "#,
        )
        .bind(pool_id)
        .bind(delta.staked)
        .bind(delta.participants)
        .bind(delta.rewards)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_position(&self, position_id: &str) -> Result<Option<StakingPosition>> {
        let row = sqlx::query("SELECT * FROM staking_positions WHERE id = $1")
            .bind(position_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(position_from_row).transpose()
    }

    async fn put_position(&self, position: StakingPosition) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO staking_positions
                (id, user_id, pool_id, amount, start_date, end_date, rewards, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                user_id = EXCLUDED.user_id,
                pool_id = EXCLUDED.pool_id,
                amount = EXCLUDED.amount,
                start_date = EXCLUDED.start_date,
                end_date = EXCLUDED.end_date,
                rewards = EXCLUDED.rewards,
                status = EXCLUDED.status,
                created_at = EXCLUDED.created_at,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&position.id)
        .bind(&position.user_id)
        .bind(&position.pool_id)
        .bind(position.amount)
        .bind(position.start_date)
        .bind(position.end_date)
        .bind(position.rewards)
        .bind(position.status.as_str())
        .bind(position.created_at)
        .bind(position.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn positions_by_user(&self, user_id: &str) -> Result<Vec<StakingPosition>> {
        let rows = sqlx::query("SELECT * FROM staking_positions WHERE user_id = $1 ORDER BY id")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(position_from_row).collect()
    }

    async fn settle_position(
        &self,
        position_id: &str,
        expected: PositionStatus,
        settlement: PositionSettlement,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE staking_positions SET
                status = $3,
                end_date = COALESCE($4, end_date),
                rewards = COALESCE($5, rewards),
                updated_at = $6
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(position_id)
        .bind(expected.as_str())
        .bind(settlement.status.as_str())
        .bind(settlement.end_date)
        .bind(settlement.rewards)
        .bind(settlement.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}
