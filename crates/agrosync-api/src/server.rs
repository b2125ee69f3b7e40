// src/server.rs

use std::sync::Arc;
use anyhow::Result;
use tracing::info;

use agrosync_ledger::StakingLedger;

use crate::auth::AuthGateway;
use crate::rest::{ApiConfig, ApiServer};
use crate::types::{HealthCheckResult, HealthStatus};

/// Run an API server with default health checks registered.
pub async fn run_api_server(
    config: ApiConfig,
    ledger: Arc<StakingLedger>,
    auth: Arc<dyn AuthGateway>,
) -> Result<()> {
    info!(
        "Starting API server for {} v{}",
        config.service_name, config.version
    );

    let server = ApiServer::new(config, ledger.clone(), auth);

    let health = server.health();

    health
        .register(
            "api",
            Arc::new(|| {
                Box::pin(async {
                    HealthCheckResult {
                        status: HealthStatus::Healthy,
                        details: Some("Service is running".to_string()),
                        metrics: None,
                    }
                })
            }),
        )
        .await;

    // The store check drives a real read so a dead backend flips /health.
    let ledger_for_check = ledger.clone();
    health
        .register(
            "store",
            Arc::new(move || {
                let ledger = ledger_for_check.clone();
                Box::pin(async move {
                    match ledger.active_pools().await {
                        Ok(pools) => HealthCheckResult {
                            status: HealthStatus::Healthy,
                            details: Some(format!("{} active pools", pools.len())),
                            metrics: None,
                        },
                        Err(err) => HealthCheckResult {
                            status: HealthStatus::Unhealthy,
                            details: Some(format!("Record store unavailable: {err}")),
                            metrics: None,
                        },
                    }
                })
            }),
        )
        .await;

    let metrics = server.metrics();
    let started = std::time::Instant::now();
    metrics.register_collector(move || {
        let mut collected = std::collections::HashMap::new();
        collected.insert(
            "uptime_seconds".to_string(),
            serde_json::json!(started.elapsed().as_secs()),
        );
        collected
    });

    // Run the server (this will block until the server stops)
    server.start().await?;

    Ok(())
}
