//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{DetailCache, ProductStore};
use crate::ns::NsClient;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// NS API client used for trip searches
    pub ns: NsClient,

    /// Journey detail cache in front of the same client
    pub details: Arc<DetailCache<NsClient, ProductStore>>,
}

impl AppState {
    /// Create a new app state. The detail cache shares `ns`'s connection
    /// pool and request limit.
    pub fn new(ns: NsClient, store: ProductStore) -> Self {
        let details = DetailCache::new(ns.clone(), store);
        Self {
            ns,
            details: Arc::new(details),
        }
    }
}
