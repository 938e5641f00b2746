//! In-process detail store.

use std::sync::Arc;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::ns::JourneyDetail;

use super::store::{DetailStore, StoreError};

/// Default maximum number of cached details.
pub const DEFAULT_MAX_ENTRIES: u64 = 10_000;

/// Detail store held in process memory.
///
/// No TTL is set. Capacity bounds memory: once it is exceeded moka evicts
/// entries, and an evicted train is simply fetched and stored again.
#[derive(Clone)]
pub struct MemoryStore {
    details: MokaCache<String, Arc<JourneyDetail>>,
}

impl MemoryStore {
    /// Create a store holding at most `max_entries` details.
    pub fn new(max_entries: u64) -> Self {
        Self {
            details: MokaCache::builder().max_capacity(max_entries).build(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

impl DetailStore for MemoryStore {
    async fn get(&self, product_number: &str) -> Result<Option<Arc<JourneyDetail>>, StoreError> {
        Ok(self.details.get(product_number).await)
    }

    async fn put(&self, product_number: &str, detail: Arc<JourneyDetail>) -> Result<(), StoreError> {
        self.details.insert(product_number.to_string(), detail).await;
        debug!(
            product_number,
            entries = self.details.entry_count(),
            "Stored journey detail in memory"
        );
        Ok(())
    }
}
