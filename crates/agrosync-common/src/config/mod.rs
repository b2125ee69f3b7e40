//! Configuration types for the AgroSync staking service

mod store;

pub use store::StoreConfig;

use {
    serde::{Deserialize, Serialize},
    std::{collections::HashMap, fs, path::Path},
};

use crate::errors::Result;
use crate::types::PoolTerms;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub bind_addr: String,
    pub log_level: String,
    pub metrics_enabled: bool,
    pub store: StoreConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    /// Pools created at startup when the store does not already hold them.
    #[serde(default)]
    pub seed_pools: Vec<PoolTerms>,
}

/// Identity attached to a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenIdentity {
    pub user_id: String,
    #[serde(default)]
    pub groups: Vec<String>,
}

/// Token table for the bundled token verifier. Production deployments plug
/// their identity provider in behind the `AuthGateway` trait instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub tokens: HashMap<String, TokenIdentity>,
}

impl ServiceConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str::<Self>(&contents)?)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3001".to_string(),
            log_level: "info".to_string(),
            metrics_enabled: true,
            store: StoreConfig::Memory,
            auth: AuthConfig::default(),
            seed_pools: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let json = r#"{
            "bind_addr": "127.0.0.1:8080",
            "log_level": "debug",
            "metrics_enabled": false,
            "store": { "backend": "postgres", "url": "postgres://localhost/agrosync", "max_connections": 8 },
            "auth": { "tokens": { "tok-1": { "user_id": "user-1", "groups": ["admin"] } } },
            "seed_pools": [
                { "id": "agro-flex", "name": "AGRO Flex", "isActive": true, "minStake": 100.0, "apy": 12.0 }
            ]
        }"#;

        let config: ServiceConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert!(matches!(config.store, StoreConfig::Postgres { .. }));
        assert_eq!(config.auth.tokens["tok-1"].user_id, "user-1");
        assert_eq!(config.seed_pools.len(), 1);
        assert_eq!(config.seed_pools[0].id, "agro-flex");
    }

    #[test]
    fn defaults_to_memory_store() {
        let config = ServiceConfig::default();
        assert!(matches!(config.store, StoreConfig::Memory));
        assert!(config.seed_pools.is_empty());
    }
}
