// src/lib.rs

//! agrosync-api - HTTP adapter for the AgroSync staking ledger
//!
//! Exposes the ledger operations behind a bearer-token gateway, plus the
//! health/status/metrics endpoints every AgroSync service carries.

// Public modules
pub mod admin_endpoints;
pub mod auth;
pub mod health;
pub mod metrics;
pub mod rest;
pub mod server;
pub mod staking_endpoints;
pub mod types;

// Re-exports
pub use auth::{AuthGateway, Identity, TokenTableAuth};
pub use health::HealthService;
pub use metrics::MetricsService;
pub use rest::{ApiConfig, ApiServer, AppState};
pub use server::run_api_server;
pub use types::{ApiError, ApiResponse, HealthCheckResult, HealthResponse, HealthStatus, StatusResponse};
