//! Key-value store seam for journey details.

use std::future::Future;
use std::sync::Arc;

use crate::ns::JourneyDetail;

/// Errors from a detail store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing medium failed
    #[error("store I/O error for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored entry could not be encoded or decoded
    #[error("store codec error for {key}: {source}")]
    Codec {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Stored entry has an unexpected shape
    #[error("malformed stored entry for {key}: {reason}")]
    Malformed { key: String, reason: String },

    /// Remote store request failed
    #[error("store backend error for {key}: {source}")]
    Backend {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Key cannot be used with this store
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),
}

/// Get/put store of journey details keyed by product number.
///
/// Entries are written once and never invalidated. Writing an existing key
/// overwrites it.
pub trait DetailStore: Send + Sync {
    /// Look up the detail stored under `product_number`.
    fn get(
        &self,
        product_number: &str,
    ) -> impl Future<Output = Result<Option<Arc<JourneyDetail>>, StoreError>> + Send;

    /// Store `detail` under `product_number`.
    fn put(
        &self,
        product_number: &str,
        detail: Arc<JourneyDetail>,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
