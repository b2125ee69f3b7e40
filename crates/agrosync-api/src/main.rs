use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use anyhow::Result;
use tracing::{info, warn};

use agrosync_api::auth::{AuthGateway, TokenTableAuth};
use agrosync_api::rest::ApiConfig;
use agrosync_api::run_api_server;
use agrosync_common::config::ServiceConfig;
use agrosync_ledger::StakingLedger;
use agrosync_store::{RecordStoreFactory, StoreFactory};

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: Failed to set global tracing subscriber: {}", e);
    }

    // Configuration file plus environment overrides
    let mut config = match std::env::var("AGROSYNC_CONFIG") {
        Ok(path) => {
            info!("Loading configuration from {}", path);
            ServiceConfig::from_file(&path)?
        }
        Err(_) => ServiceConfig::default(),
    };

    if let Ok(bind_addr) = std::env::var("BIND_ADDR") {
        config.bind_addr = bind_addr;
    }

    let service_name =
        std::env::var("SERVICE_NAME").unwrap_or_else(|_| "agrosync-api".to_string());
    let version = std::env::var("SERVICE_VERSION")
        .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

    // Record store, selected by configuration
    let store = RecordStoreFactory::new(config.store.clone())
        .create_store()
        .await?;

    let ledger = Arc::new(StakingLedger::new(store));

    // Seed pools so a fresh deployment has its staking programs available
    for terms in config.seed_pools.clone() {
        ledger.ensure_pool(terms).await?;
    }

    if config.auth.tokens.is_empty() {
        warn!("No auth tokens configured; every staking request will be rejected");
    }
    let auth: Arc<dyn AuthGateway> = Arc::new(TokenTableAuth::from_config(&config.auth));

    let api_config = ApiConfig {
        bind_addr: SocketAddr::from_str(&config.bind_addr)?,
        service_name: service_name.clone(),
        version,
        enable_metrics: config.metrics_enabled,
        path_prefix: Some("/api".to_string()),
    };

    info!("Starting {} on {}", service_name, config.bind_addr);
    run_api_server(api_config, ledger, auth).await
}
