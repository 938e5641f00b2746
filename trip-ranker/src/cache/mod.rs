//! Caching layer for journey details.
//!
//! The same physical train shows up in many trip candidates and its stock
//! composition rarely changes within a day, so each detail is fetched once
//! per product number and kept in a store. Entries never expire; only the
//! memory backend drops any, and only to stay within its capacity.

mod detail;
mod dynamo;
mod file;
mod memory;
mod store;

use std::path::PathBuf;
use std::sync::Arc;

use crate::ns::JourneyDetail;

pub use detail::{DetailCache, ResolveError};
pub use dynamo::DynamoStore;
pub use file::FileStore;
pub use memory::{DEFAULT_MAX_ENTRIES, MemoryStore};
pub use store::{DetailStore, StoreError};

/// Default table name for stored details.
pub const DEFAULT_TABLE_NAME: &str = "ns-product-cache";

/// Which store backs the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process memory, lost on restart.
    Memory,
    /// JSON files under `root/<table_name>`.
    File { root: PathBuf },
    /// DynamoDB table `<table_name>`, shared between processes.
    DynamoDb,
}

/// Configuration for the detail cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Store backend.
    pub backend: StoreBackend,

    /// Table (or collection) name entries are kept under.
    pub table_name: String,

    /// Maximum number of entries held by the memory backend. Beyond it the
    /// least useful entries are evicted and later refetched.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            table_name: DEFAULT_TABLE_NAME.to_string(),
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

/// Store selected at runtime from configuration.
#[derive(Clone)]
pub enum ProductStore {
    Memory(MemoryStore),
    File(FileStore),
    DynamoDb(DynamoStore),
}

impl ProductStore {
    /// Build the store described by `config`.
    pub async fn from_config(config: &CacheConfig) -> Self {
        match &config.backend {
            StoreBackend::Memory => ProductStore::Memory(MemoryStore::new(config.max_entries)),
            StoreBackend::File { root } => {
                ProductStore::File(FileStore::new(root, &config.table_name))
            }
            StoreBackend::DynamoDb => {
                ProductStore::DynamoDb(DynamoStore::from_env(config.table_name.clone()).await)
            }
        }
    }
}

impl DetailStore for ProductStore {
    async fn get(&self, product_number: &str) -> Result<Option<Arc<JourneyDetail>>, StoreError> {
        match self {
            ProductStore::Memory(store) => store.get(product_number).await,
            ProductStore::File(store) => store.get(product_number).await,
            ProductStore::DynamoDb(store) => store.get(product_number).await,
        }
    }

    async fn put(&self, product_number: &str, detail: Arc<JourneyDetail>) -> Result<(), StoreError> {
        match self {
            ProductStore::Memory(store) => store.put(product_number, detail).await,
            ProductStore::File(store) => store.put(product_number, detail).await,
            ProductStore::DynamoDb(store) => store.put(product_number, detail).await,
        }
    }
}
