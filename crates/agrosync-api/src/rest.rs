use axum::{
    extract::State,
    http::{header, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};

use agrosync_ledger::StakingLedger;

use crate::admin_endpoints::create_admin_router;
use crate::auth::AuthGateway;
use crate::health::HealthService;
use crate::metrics::MetricsService;
use crate::staking_endpoints::create_staking_router;
use crate::types::{ApiResponse, HealthResponse, StatusResponse};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Health check service
    pub health: Arc<HealthService>,
    /// Metrics service
    pub metrics: Arc<MetricsService>,
    /// Application start time
    pub start_time: Instant,
    /// Service name
    pub service_name: String,
    /// Service version
    pub version: String,
    /// The staking ledger behind every operation
    pub ledger: Arc<StakingLedger>,
    /// Bearer-token verifier
    pub auth: Arc<dyn AuthGateway>,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server bind address
    pub bind_addr: std::net::SocketAddr,
    /// Service name
    pub service_name: String,
    /// Service version
    pub version: String,
    /// Enable metrics collection
    pub enable_metrics: bool,
    /// API path prefix (optional)
    pub path_prefix: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3001".parse().expect("Valid default bind address"),
            service_name: "agrosync-api".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            enable_metrics: true,
            path_prefix: Some("/api".to_string()),
        }
    }
}

/// API server
pub struct ApiServer {
    /// Server configuration
    config: ApiConfig,
    /// Health service
    health_service: Arc<HealthService>,
    /// Metrics service
    metrics_service: Arc<MetricsService>,
    /// Application state
    state: AppState,
}

impl ApiServer {
    /// Create a new API server with the given configuration
    pub fn new(config: ApiConfig, ledger: Arc<StakingLedger>, auth: Arc<dyn AuthGateway>) -> Self {
        let health_service = Arc::new(HealthService::new());
        let metrics_service = Arc::new(MetricsService::new());

        let state = AppState {
            health: health_service.clone(),
            metrics: metrics_service.clone(),
            start_time: Instant::now(),
            service_name: config.service_name.clone(),
            version: config.version.clone(),
            ledger,
            auth,
        };

        Self {
            config,
            health_service,
            metrics_service,
            state,
        }
    }

    /// Get a reference to the health service
    pub fn health(&self) -> Arc<HealthService> {
        self.health_service.clone()
    }

    /// Get a reference to the metrics service
    pub fn metrics(&self) -> Arc<MetricsService> {
        self.metrics_service.clone()
    }

    /// Start the API server
    pub async fn start(&self) -> anyhow::Result<()> {
        tracing::info!(
            "Starting {} API server on {}",
            self.config.service_name,
            self.config.bind_addr
        );

        let router = self.create_router();

        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!("Listening on {}", self.config.bind_addr);

        axum::serve(listener, router).await?;

        Ok(())
    }

    /// Create the API router
    fn create_router(&self) -> Router {
        // The staking surface is called from browser wallets; authorization
        // must be allowed through CORS alongside content-type.
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_origin(Any);

        let mut router = Router::new()
            .route("/health", get(health_handler))
            .route("/status", get(status_handler))
            .layer(cors);

        if self.config.enable_metrics {
            router = router.route("/metrics", get(metrics_handler));
        }

        router = router.merge(create_staking_router()).merge(create_admin_router());

        if let Some(prefix) = &self.config.path_prefix {
            router = Router::new().nest(prefix, router);
        }

        router.with_state(self.state.clone())
    }
}

/// Health check handler
async fn health_handler(State(state): State<AppState>) -> axum::Json<HealthResponse> {
    let response = state.health.check_all().await;
    axum::Json(response)
}

/// Status handler
async fn status_handler(State(state): State<AppState>) -> axum::Json<ApiResponse<StatusResponse>> {
    let status = StatusResponse {
        name: state.service_name.clone(),
        version: state.version.clone(),
        uptime: state.start_time.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        additional: std::collections::HashMap::new(),
    };

    axum::Json(ApiResponse::success(status))
}

/// Metrics handler
async fn metrics_handler(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    let metrics = state.metrics.get_metrics().await;
    axum::Json(metrics)
}
