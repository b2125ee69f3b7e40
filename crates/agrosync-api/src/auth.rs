// src/auth.rs

//! Bearer-token authentication in front of the staking ledger.
//!
//! The gateway is a trait so deployments can plug in their identity
//! provider; the bundled implementation verifies against a token table
//! from the service configuration.

use agrosync_common::config::AuthConfig;
use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Authenticated caller: the owning identity for every ledger operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub groups: Vec<String>,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.groups.iter().any(|g| g == "admin")
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,
}

/// Verifies a bearer token and yields the caller's identity.
#[async_trait]
pub trait AuthGateway: Send + Sync + 'static {
    async fn verify(&self, token: &str) -> Result<Identity, AuthError>;
}

/// Token-table verifier backed by the service configuration.
pub struct TokenTableAuth {
    tokens: HashMap<String, Identity>,
}

impl TokenTableAuth {
    pub fn new(tokens: HashMap<String, Identity>) -> Self {
        Self { tokens }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        let tokens = config
            .tokens
            .iter()
            .map(|(token, identity)| {
                (
                    token.clone(),
                    Identity {
                        user_id: identity.user_id.clone(),
                        groups: identity.groups.clone(),
                    },
                )
            })
            .collect();
        Self { tokens }
    }
}

#[async_trait]
impl AuthGateway for TokenTableAuth {
    async fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        self.tokens.get(token).cloned().ok_or(AuthError::InvalidToken)
    }
}

/// Extract the bearer token from an Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    value.strip_prefix("Bearer ").ok_or(AuthError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_token_requires_the_scheme() {
        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(AuthError::MissingToken)
        ));
        assert!(matches!(
            bearer_token(&headers_with("Basic dXNlcjpwYXNz")),
            Err(AuthError::InvalidToken)
        ));
        assert_eq!(bearer_token(&headers_with("Bearer tok-1")).unwrap(), "tok-1");
    }

    #[tokio::test]
    async fn token_table_verifies_known_tokens_only() {
        let mut tokens = HashMap::new();
        tokens.insert(
            "tok-1".to_string(),
            Identity {
                user_id: "user-1".to_string(),
                groups: vec!["admin".to_string()],
            },
        );
        let gateway = TokenTableAuth::new(tokens);

        let identity = gateway.verify("tok-1").await.unwrap();
        assert_eq!(identity.user_id, "user-1");
        assert!(identity.is_admin());

        assert!(matches!(
            gateway.verify("tok-2").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn admin_requires_the_admin_group() {
        let identity = Identity {
            user_id: "user-1".to_string(),
            groups: vec!["producer".to_string()],
        };
        assert!(!identity.is_admin());
    }
}
