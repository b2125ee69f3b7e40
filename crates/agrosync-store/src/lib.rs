//! This is the agrosync-store crate - record persistence for the staking ledger

pub mod factory;
pub mod memory;
pub mod postgres_store;
pub mod traits;

pub use factory::RecordStoreFactory;
pub use memory::MemoryStore;
pub use postgres_store::PostgresStore;
pub use traits::{PoolDelta, PositionSettlement, RecordStore, StoreFactory};
