use agrosync_ledger::LedgerError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard API response format for the infrastructure endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Success status
    pub success: bool,
    /// Optional result data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Optional error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response with data
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// API error types. Every failure leaving the staking surface is one of
/// these; the body is always `{"message": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message surfaced to the caller. Internal detail stays in the
    /// server logs.
    pub fn public_message(&self) -> &str {
        match self {
            ApiError::Unauthorized(message)
            | ApiError::BadRequest(message)
            | ApiError::NotFound(message)
            | ApiError::Forbidden(message) => message,
            ApiError::Internal(_) => "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!(detail = %detail, "Unhandled failure");
        }
        let body = serde_json::json!({ "message": self.public_message() });
        (self.status_code(), Json(body)).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::PoolUnavailable
            | LedgerError::BelowMinimum { .. }
            | LedgerError::AboveMaximum { .. }
            | LedgerError::InvalidState
            | LedgerError::NoRewardsAvailable => ApiError::BadRequest(err.to_string()),
            LedgerError::PositionNotFound => ApiError::NotFound(err.to_string()),
            LedgerError::Store(source) => ApiError::Internal(format!("{source:#}")),
        }
    }
}

/// Status response format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Service name
    pub name: String,
    /// Service version
    pub version: String,
    /// Service uptime in seconds
    pub uptime: u64,
    /// Current time in ISO 8601 format
    pub timestamp: String,
    /// Additional status fields
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub additional: HashMap<String, serde_json::Value>,
}

/// Health check response format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,
    /// Detailed checks
    pub checks: HashMap<String, HealthCheckResult>,
    /// Service uptime in seconds
    pub uptime: u64,
}

/// Health status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// All systems operational
    Healthy,
    /// Some systems degraded
    Degraded,
    /// Critical systems failing
    Unhealthy,
}

/// Individual health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Check status
    pub status: HealthStatus,
    /// Details about the check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Optional metrics related to this check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<HashMap<String, serde_json::Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_errors_map_to_contract_status_codes() {
        let cases = [
            (ApiError::from(LedgerError::PoolUnavailable), StatusCode::BAD_REQUEST),
            (
                ApiError::from(LedgerError::BelowMinimum { min: 100.0 }),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(LedgerError::AboveMaximum { max: 500.0 }),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::from(LedgerError::InvalidState), StatusCode::BAD_REQUEST),
            (
                ApiError::from(LedgerError::NoRewardsAvailable),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(LedgerError::PositionNotFound),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(LedgerError::Store(anyhow::anyhow!("connection refused"))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status_code(), expected, "{error:?}");
        }
    }

    #[test]
    fn internal_detail_never_reaches_the_caller() {
        let error = ApiError::from(LedgerError::Store(anyhow::anyhow!("password=hunter2")));
        assert_eq!(error.public_message(), "Internal server error");
    }

    #[test]
    fn validation_messages_carry_the_configured_bound() {
        let error = ApiError::from(LedgerError::BelowMinimum { min: 250.0 });
        assert!(error.public_message().contains("250"));
    }
}
