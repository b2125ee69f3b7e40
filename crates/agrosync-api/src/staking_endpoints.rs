// src/staking_endpoints.rs

use axum::{
    extract::State,
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{bearer_token, AuthError, AuthGateway, Identity};
use crate::rest::AppState;
use crate::types::ApiError;

/// The staking request envelope: a closed union over the supported actions.
/// Anything that does not deserialize into one of these is a 400.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "action", content = "data")]
pub enum StakingRequest {
    #[serde(rename = "stake", rename_all = "camelCase")]
    Stake { pool_id: String, amount: f64 },
    #[serde(rename = "unstake", rename_all = "camelCase")]
    Unstake { position_id: String },
    #[serde(rename = "claimRewards", rename_all = "camelCase")]
    ClaimRewards { position_id: String },
    #[serde(rename = "getStakingInfo")]
    GetStakingInfo,
    #[serde(rename = "getPools")]
    GetPools,
}

/// Resolve the caller's identity, or fail with a 401 that leaks nothing
/// about why verification failed.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Identity, ApiError> {
    let token = bearer_token(headers)
        .map_err(|_| ApiError::Unauthorized("Missing or invalid authorization token".to_string()))?;

    state.auth.verify(token).await.map_err(|err| match err {
        AuthError::MissingToken | AuthError::InvalidToken => {
            ApiError::Unauthorized("Missing or invalid authorization token".to_string())
        }
    })
}

/// Single staking entry point: authenticate, parse the envelope, dispatch.
pub async fn staking_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let identity = authenticate(&state, &headers).await?;

    let request: StakingRequest = serde_json::from_value(body)
        .map_err(|_| ApiError::BadRequest("Unrecognized staking action".to_string()))?;

    let response = match request {
        StakingRequest::Stake { pool_id, amount } => {
            let receipt = state.ledger.stake(&identity.user_id, &pool_id, amount).await?;
            json!({
                "message": "Staking position created",
                "positionId": receipt.position_id,
                "amount": receipt.amount,
                "poolName": receipt.pool_name,
            })
        }
        StakingRequest::Unstake { position_id } => {
            let receipt = state.ledger.unstake(&identity.user_id, &position_id).await?;
            json!({
                "message": "Position unstaked",
                "amount": receipt.amount,
                "rewards": receipt.rewards,
                "daysStaked": receipt.days_staked,
            })
        }
        StakingRequest::ClaimRewards { position_id } => {
            let receipt = state
                .ledger
                .claim_rewards(&identity.user_id, &position_id)
                .await?;
            json!({
                "message": "Rewards claimed",
                "rewards": receipt.rewards,
            })
        }
        StakingRequest::GetStakingInfo => {
            let summary = state.ledger.staking_info(&identity.user_id).await?;
            json!({
                "message": "Staking info retrieved",
                "positions": summary.positions,
                "count": summary.count,
            })
        }
        StakingRequest::GetPools => {
            let pools = state.ledger.active_pools().await?;
            json!({
                "message": "Active pools retrieved",
                "pools": pools,
            })
        }
    };

    Ok(Json(response))
}

pub fn create_staking_router() -> Router<AppState> {
    Router::new().route("/staking", post(staking_handler))
}
