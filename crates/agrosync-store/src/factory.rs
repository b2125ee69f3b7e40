use {
    crate::{
        memory::MemoryStore,
        postgres_store::PostgresStore,
        traits::{RecordStore, StoreFactory},
    },
    agrosync_common::config::StoreConfig,
    anyhow::Result,
    async_trait::async_trait,
    std::sync::Arc,
    tracing::info,
};

/// Factory for creating record store instances based on configuration
pub struct RecordStoreFactory {
    config: StoreConfig,
}

impl RecordStoreFactory {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl StoreFactory for RecordStoreFactory {
    async fn create_store(&self) -> Result<Arc<dyn RecordStore>> {
        match &self.config {
            StoreConfig::Memory => {
                info!("Using in-memory record store");
                Ok(Arc::new(MemoryStore::new()))
            }
            StoreConfig::Postgres {
                url,
                max_connections,
            } => {
                let store = PostgresStore::connect(url, *max_connections).await?;
                Ok(Arc::new(store))
            }
        }
    }
}
