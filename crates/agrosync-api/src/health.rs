// src/health.rs

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::types::{HealthCheckResult, HealthResponse, HealthStatus};

pub type HealthCheckFn = Arc<
    dyn Fn() -> std::pin::Pin<Box<dyn std::future::Future<Output = HealthCheckResult> + Send>>
        + Send
        + Sync,
>;

pub struct HealthService {
    checks: Arc<RwLock<HashMap<String, HealthCheckFn>>>,
    start_time: Instant,
}

impl HealthService {
    pub fn new() -> Self {
        Self {
            checks: Arc::new(RwLock::new(HashMap::new())),
            start_time: Instant::now(),
        }
    }

    pub async fn register(&self, name: &str, check: HealthCheckFn) {
        let mut checks = self.checks.write().await;
        checks.insert(name.to_string(), check);
    }

    pub async fn unregister(&self, name: &str) {
        let mut checks = self.checks.write().await;
        checks.remove(name);
    }

    pub fn uptime(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub async fn check_all(&self) -> HealthResponse {
        let check_names: Vec<String> = {
            let checks = self.checks.read().await;
            checks.keys().cloned().collect()
        };

        let mut results = HashMap::new();
        let mut all_healthy = true;
        let mut any_healthy = false;

        for name in check_names {
            let check_fn = {
                let checks = self.checks.read().await;
                checks.get(&name).cloned()
            };

            if let Some(check) = check_fn {
                let result = check().await;

                match result.status {
                    HealthStatus::Healthy => {
                        any_healthy = true;
                    }
                    HealthStatus::Degraded => {
                        all_healthy = false;
                        any_healthy = true;
                    }
                    HealthStatus::Unhealthy => {
                        all_healthy = false;
                    }
                }

                results.insert(name, result);
            }
        }

        let status = if all_healthy {
            HealthStatus::Healthy
        } else if any_healthy {
            HealthStatus::Degraded
        } else {
            HealthStatus::Unhealthy
        };

        HealthResponse {
            status,
            checks: results,
            uptime: self.uptime(),
        }
    }
}

impl Default for HealthService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_check(status: HealthStatus) -> HealthCheckFn {
        Arc::new(move || {
            Box::pin(async move {
                HealthCheckResult {
                    status,
                    details: None,
                    metrics: None,
                }
            })
        })
    }

    #[tokio::test]
    async fn one_failing_check_degrades_overall_status() {
        let service = HealthService::new();
        service.register("store", fixed_check(HealthStatus::Healthy)).await;
        service.register("api", fixed_check(HealthStatus::Unhealthy)).await;

        let response = service.check_all().await;
        assert_eq!(response.status, HealthStatus::Degraded);
        assert_eq!(response.checks.len(), 2);
    }

    #[tokio::test]
    async fn all_failing_checks_mean_unhealthy() {
        let service = HealthService::new();
        service.register("store", fixed_check(HealthStatus::Unhealthy)).await;

        let response = service.check_all().await;
        assert_eq!(response.status, HealthStatus::Unhealthy);
    }
}
