use serde::{Deserialize, Serialize};

/// Lifecycle of a staking position. Transitions only move forward:
/// `ACTIVE -> COMPLETED -> REWARDED`. Positions are never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionStatus {
    /// Principal is staked and accruing time.
    Active,
    /// Unstaked; rewards are computed and frozen.
    Completed,
    /// Frozen rewards have been marked as disbursed.
    Rewarded,
}

impl PositionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionStatus::Active => "ACTIVE",
            PositionStatus::Completed => "COMPLETED",
            PositionStatus::Rewarded => "REWARDED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(PositionStatus::Active),
            "COMPLETED" => Some(PositionStatus::Completed),
            "REWARDED" => Some(PositionStatus::Rewarded),
            _ => None,
        }
    }
}

impl std::fmt::Display for PositionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user's stake within a pool. `amount` is fixed at creation; `rewards`
/// stays `0` until unstake freezes the accrued value. Timestamps are Unix
/// seconds (UTC).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingPosition {
    pub id: String,
    pub user_id: String,
    pub pool_id: String,
    pub amount: f64,
    pub start_date: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<i64>,
    pub rewards: f64,
    pub status: PositionStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_names() {
        for status in [
            PositionStatus::Active,
            PositionStatus::Completed,
            PositionStatus::Rewarded,
        ] {
            assert_eq!(PositionStatus::parse(status.as_str()), Some(status));
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        assert_eq!(PositionStatus::parse("EXPIRED"), None);
    }

    #[test]
    fn active_position_omits_end_date() {
        let position = StakingPosition {
            id: "stake_1_user".to_string(),
            user_id: "user".to_string(),
            pool_id: "pool".to_string(),
            amount: 500.0,
            start_date: 1_700_000_000,
            end_date: None,
            rewards: 0.0,
            status: PositionStatus::Active,
            created_at: 1_700_000_000,
            updated_at: 1_700_000_000,
        };

        let json = serde_json::to_value(&position).unwrap();
        assert!(json.get("endDate").is_none());
        assert_eq!(json["status"], "ACTIVE");
        assert_eq!(json["userId"], "user");
    }
}
