//! Disk-backed detail store.
//!
//! Each table is a directory; each entry is one JSON document named after
//! its product number.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ns::JourneyDetail;

use super::store::{DetailStore, StoreError};

/// Distinguishes temp files of concurrent writers within this process.
static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Stored document: the key alongside its detail.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDetail {
    product_number: String,
    detail: JourneyDetail,
}

/// Detail store persisted as JSON files under a table directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    table_dir: PathBuf,
}

impl FileStore {
    /// Create a store for `table_name` inside `root`.
    ///
    /// The table directory is created on first write.
    pub fn new(root: impl AsRef<Path>, table_name: &str) -> Self {
        Self {
            table_dir: root.as_ref().join(table_name),
        }
    }

    /// Directory holding this table's entries.
    pub fn table_dir(&self) -> &Path {
        &self.table_dir
    }

    /// File path for a key. Keys are restricted to a safe character set so
    /// they cannot escape the table directory.
    fn entry_path(&self, product_number: &str) -> Result<PathBuf, StoreError> {
        let valid = !product_number.is_empty()
            && product_number
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(product_number.to_string()));
        }
        Ok(self.table_dir.join(format!("{product_number}.json")))
    }
}

impl DetailStore for FileStore {
    async fn get(&self, product_number: &str) -> Result<Option<Arc<JourneyDetail>>, StoreError> {
        let path = self.entry_path(product_number)?;

        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    key: product_number.to_string(),
                    source,
                });
            }
        };

        // An unreadable entry is a miss; the next put replaces it.
        match serde_json::from_str::<StoredDetail>(&contents) {
            Ok(stored) => Ok(Some(Arc::new(stored.detail))),
            Err(e) => {
                warn!(
                    product_number,
                    path = %path.display(),
                    error = %e,
                    "Discarding unreadable stored detail"
                );
                Ok(None)
            }
        }
    }

    async fn put(&self, product_number: &str, detail: Arc<JourneyDetail>) -> Result<(), StoreError> {
        let path = self.entry_path(product_number)?;
        let io_err = |source| StoreError::Io {
            key: product_number.to_string(),
            source,
        };

        tokio::fs::create_dir_all(&self.table_dir)
            .await
            .map_err(io_err)?;

        let stored = StoredDetail {
            product_number: product_number.to_string(),
            detail: JourneyDetail::clone(&detail),
        };
        let json = serde_json::to_string(&stored).map_err(|source| StoreError::Codec {
            key: product_number.to_string(),
            source,
        })?;

        // Each write gets its own temp file; rename publishes it whole.
        let tmp = self.table_dir.join(format!(
            ".{product_number}.{}.{}.tmp",
            std::process::id(),
            TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        tokio::fs::write(&tmp, json).await.map_err(io_err)?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(io_err(e));
        }

        Ok(())
    }
}
