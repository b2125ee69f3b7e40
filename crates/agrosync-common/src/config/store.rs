use serde::{Deserialize, Serialize};

fn default_max_connections() -> u32 {
    5
}

/// Record store backend selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Process-local tables, used by tests and single-node development runs.
    Memory,
    /// Durable PostgreSQL backend.
    Postgres {
        url: String,
        #[serde(default = "default_max_connections")]
        max_connections: u32,
    },
}
