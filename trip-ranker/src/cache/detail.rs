//! Cache-backed journey detail resolution.

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::debug;

use crate::ns::{JourneyDetail, JourneyDetailSource, NsError};

use super::store::{DetailStore, StoreError};

/// Failure to resolve a product number.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Fetch(#[from] NsError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Journey detail source with a store in front of it.
///
/// Wraps a `JourneyDetailSource` and consults the store before every fetch.
/// Concurrent resolutions of the same key are not coalesced; both may fetch
/// and write, and the later write wins.
pub struct DetailCache<C, S> {
    client: C,
    store: S,
}

impl<C: JourneyDetailSource, S: DetailStore> DetailCache<C, S> {
    /// Create a new cache over `client` backed by `store`.
    pub fn new(client: C, store: S) -> Self {
        Self { client, store }
    }

    /// Resolve one product number.
    ///
    /// A hit returns the stored detail without touching the client. A miss
    /// fetches, writes the result back, then returns it.
    pub async fn resolve(&self, product_number: &str) -> Result<Arc<JourneyDetail>, ResolveError> {
        if let Some(cached) = self.store.get(product_number).await? {
            debug!(product_number, "Journey detail cache hit");
            return Ok(cached);
        }

        debug!(product_number, "Journey detail cache miss");
        let detail = Arc::new(self.client.fetch_journey_detail(product_number).await?);
        self.store.put(product_number, detail.clone()).await?;

        Ok(detail)
    }

    /// Resolve many product numbers concurrently.
    ///
    /// Results are in input order. The first failure fails the whole batch.
    pub async fn resolve_all(
        &self,
        product_numbers: &[String],
    ) -> Result<Vec<Arc<JourneyDetail>>, ResolveError> {
        try_join_all(product_numbers.iter().map(|n| self.resolve(n))).await
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Access the underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn detail(numbers: &[&str]) -> JourneyDetail {
        JourneyDetail {
            product_numbers: numbers.iter().map(|n| n.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Mock detail source for testing.
    struct MockSource {
        details: HashMap<String, JourneyDetail>,
        fetched: Mutex<Vec<String>>,
    }

    impl MockSource {
        fn new(details: &[(&str, JourneyDetail)]) -> Self {
            Self {
                details: details
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
                fetched: Mutex::new(Vec::new()),
            }
        }

        fn fetched(&self) -> Vec<String> {
            self.fetched.lock().unwrap().clone()
        }
    }

    impl JourneyDetailSource for MockSource {
        async fn fetch_journey_detail(&self, product_number: &str) -> Result<JourneyDetail, NsError> {
            self.fetched.lock().unwrap().push(product_number.to_string());
            self.details
                .get(product_number)
                .cloned()
                .ok_or_else(|| NsError::Api {
                    status: 404,
                    body: format!(r#"{{"message":"unknown train {product_number}"}}"#),
                })
        }
    }

    /// Store wrapper that counts calls.
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        gets: Mutex<usize>,
        puts: Mutex<Vec<String>>,
        fail_puts: bool,
    }

    impl CountingStore {
        fn gets(&self) -> usize {
            *self.gets.lock().unwrap()
        }

        fn puts(&self) -> Vec<String> {
            self.puts.lock().unwrap().clone()
        }
    }

    impl DetailStore for CountingStore {
        async fn get(&self, product_number: &str) -> Result<Option<Arc<JourneyDetail>>, StoreError> {
            *self.gets.lock().unwrap() += 1;
            self.inner.get(product_number).await
        }

        async fn put(
            &self,
            product_number: &str,
            detail: Arc<JourneyDetail>,
        ) -> Result<(), StoreError> {
            self.puts.lock().unwrap().push(product_number.to_string());
            if self.fail_puts {
                return Err(StoreError::InvalidKey(product_number.to_string()));
            }
            self.inner.put(product_number, detail).await
        }
    }

    #[tokio::test]
    async fn hits_make_no_fetches_or_writes() {
        let store = CountingStore::default();
        store.inner.put("123", Arc::new(detail(&["123"]))).await.unwrap();
        store.inner.put("456", Arc::new(detail(&["456"]))).await.unwrap();
        let cache = DetailCache::new(MockSource::new(&[]), store);

        let resolved = cache
            .resolve_all(&["123".to_string(), "456".to_string()])
            .await
            .unwrap();

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].product_numbers, vec!["123"]);
        assert_eq!(resolved[1].product_numbers, vec!["456"]);
        assert_eq!(cache.store().gets(), 2);
        assert!(cache.store().puts().is_empty());
        assert!(cache.client().fetched().is_empty());
    }

    #[tokio::test]
    async fn miss_fetches_once_and_writes_once() {
        let source = MockSource::new(&[("3028", detail(&["3028"]))]);
        let cache = DetailCache::new(source, CountingStore::default());

        let resolved = cache.resolve("3028").await.unwrap();

        assert_eq!(resolved.product_numbers, vec!["3028"]);
        assert_eq!(cache.client().fetched(), vec!["3028"]);
        assert_eq!(cache.store().puts(), vec!["3028"]);

        // Second resolution is served from the store.
        cache.resolve("3028").await.unwrap();
        assert_eq!(cache.client().fetched(), vec!["3028"]);
        assert_eq!(cache.store().puts(), vec!["3028"]);
    }

    #[tokio::test]
    async fn mixed_hits_and_misses_keep_input_order() {
        let source = MockSource::new(&[("2", detail(&["2"]))]);
        let store = CountingStore::default();
        store.inner.put("1", Arc::new(detail(&["1"]))).await.unwrap();
        let cache = DetailCache::new(source, store);

        let resolved = cache
            .resolve_all(&["2".to_string(), "1".to_string()])
            .await
            .unwrap();

        assert_eq!(resolved[0].product_numbers, vec!["2"]);
        assert_eq!(resolved[1].product_numbers, vec!["1"]);
        assert_eq!(cache.client().fetched(), vec!["2"]);
    }

    #[tokio::test]
    async fn one_failure_fails_batch() {
        let source = MockSource::new(&[("1", detail(&["1"]))]);
        let cache = DetailCache::new(source, CountingStore::default());

        let result = cache
            .resolve_all(&["1".to_string(), "999".to_string()])
            .await;

        match result {
            Err(ResolveError::Fetch(NsError::Api { status, .. })) => assert_eq!(status, 404),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn write_failure_propagates() {
        let source = MockSource::new(&[("1", detail(&["1"]))]);
        let store = CountingStore {
            fail_puts: true,
            ..Default::default()
        };
        let cache = DetailCache::new(source, store);

        let result = cache.resolve("1").await;
        assert!(matches!(result, Err(ResolveError::Store(_))));
    }

    #[tokio::test]
    async fn empty_batch_resolves_to_nothing() {
        let cache = DetailCache::new(MockSource::new(&[]), CountingStore::default());
        assert!(cache.resolve_all(&[]).await.unwrap().is_empty());
        assert_eq!(cache.store().gets(), 0);
    }
}
