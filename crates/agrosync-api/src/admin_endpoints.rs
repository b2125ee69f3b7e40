// src/admin_endpoints.rs

use agrosync_common::types::PoolTerms;
use axum::{extract::State, http::HeaderMap, routing::post, Json, Router};
use serde_json::json;

use crate::rest::AppState;
use crate::staking_endpoints::authenticate;
use crate::types::ApiError;

/// Create or reconfigure a staking pool. Gated on the `admin` group;
/// aggregates of an existing pool survive a terms update.
pub async fn upsert_pool_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let identity = authenticate(&state, &headers).await?;
    if !identity.is_admin() {
        return Err(ApiError::Forbidden("Admin group required".to_string()));
    }

    let terms: PoolTerms = serde_json::from_value(body)
        .map_err(|err| ApiError::BadRequest(format!("Invalid pool definition: {err}")))?;

    let pool = state.ledger.upsert_pool(terms).await?;

    Ok(Json(json!({
        "message": "Pool saved",
        "pool": pool,
    })))
}

pub fn create_admin_router() -> Router<AppState> {
    Router::new().route("/admin/pools", post(upsert_pool_handler))
}
