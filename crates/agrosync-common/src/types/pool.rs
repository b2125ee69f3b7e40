use serde::{Deserialize, Serialize};

/// A staking program: shared terms plus the running aggregate state kept
/// consistent by the ledger's atomic pool adjustments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingPool {
    pub id: String,
    pub name: String,
    /// Pools accept new stakes only while active.
    pub is_active: bool,
    /// Lower bound on a single position's amount.
    pub min_stake: f64,
    /// Optional upper bound on a single position's amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_stake: Option<f64>,
    /// Annual percentage yield stored as a percentage value (`12.5` means
    /// 12.5%), applied as simple interest per elapsed whole day.
    pub apy: f64,
    /// Sum of `amount` over this pool's ACTIVE positions.
    pub total_staked: f64,
    /// Sum of rewards ever accrued out of this pool, for reporting.
    pub total_rewards: f64,
    /// Count of currently ACTIVE positions.
    pub current_participants: u64,
}

/// The configurable half of a pool: everything an operator sets up front,
/// without the ledger-maintained aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolTerms {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    #[serde(default)]
    pub min_stake: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stake: Option<f64>,
    pub apy: f64,
}

impl PoolTerms {
    /// A brand-new pool carrying these terms, with zeroed aggregates.
    pub fn into_pool(self) -> StakingPool {
        StakingPool {
            id: self.id,
            name: self.name,
            is_active: self.is_active,
            min_stake: self.min_stake,
            max_stake: self.max_stake,
            apy: self.apy,
            total_staked: 0.0,
            total_rewards: 0.0,
            current_participants: 0,
        }
    }

    /// Apply these terms to an existing pool, preserving its aggregates.
    pub fn apply_to(self, pool: &mut StakingPool) {
        pool.name = self.name;
        pool.is_active = self.is_active;
        pool.min_stake = self.min_stake;
        pool.max_stake = self.max_stake;
        pool.apy = self.apy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_to_pool_zeroes_aggregates() {
        let terms = PoolTerms {
            id: "agro-flex".to_string(),
            name: "AGRO Flex".to_string(),
            is_active: true,
            min_stake: 100.0,
            max_stake: Some(50_000.0),
            apy: 12.0,
        };

        let pool = terms.into_pool();
        assert_eq!(pool.total_staked, 0.0);
        assert_eq!(pool.total_rewards, 0.0);
        assert_eq!(pool.current_participants, 0);
    }

    #[test]
    fn apply_terms_preserves_aggregates() {
        let mut pool = PoolTerms {
            id: "agro-flex".to_string(),
            name: "AGRO Flex".to_string(),
            is_active: true,
            min_stake: 100.0,
            max_stake: None,
            apy: 12.0,
        }
        .into_pool();
        pool.total_staked = 5_000.0;
        pool.current_participants = 3;

        let update = PoolTerms {
            id: "agro-flex".to_string(),
            name: "AGRO Flex v2".to_string(),
            is_active: false,
            min_stake: 250.0,
            max_stake: Some(10_000.0),
            apy: 8.5,
        };
        update.apply_to(&mut pool);

        assert_eq!(pool.name, "AGRO Flex v2");
        assert!(!pool.is_active);
        assert_eq!(pool.apy, 8.5);
        assert_eq!(pool.total_staked, 5_000.0);
        assert_eq!(pool.current_participants, 3);
    }

    #[test]
    fn pool_serializes_camel_case() {
        let pool = PoolTerms {
            id: "p".to_string(),
            name: "P".to_string(),
            is_active: true,
            min_stake: 1.0,
            max_stake: None,
            apy: 10.0,
        }
        .into_pool();

        let json = serde_json::to_value(&pool).unwrap();
        assert!(json.get("isActive").is_some());
        assert!(json.get("totalStaked").is_some());
        assert!(json.get("currentParticipants").is_some());
        assert!(json.get("maxStake").is_none());
    }
}
