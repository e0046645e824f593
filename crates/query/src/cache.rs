//! The key-addressed request cache.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;

use ticketflow_core::ApiError;

use crate::key::QueryKey;
use crate::runtime::{Sleep, Spawn};

/// Default staleness window for reads.
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(5 * 60);
/// Default retry count for reads.
pub const DEFAULT_READ_RETRIES: u32 = 3;
/// Default retry count for mutations.
pub const DEFAULT_MUTATION_RETRIES: u32 = 1;
/// Backoff ceiling.
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Exponential backoff: `min(1s * 2^attempt, 30s)`.
pub fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(1)
        .checked_mul(2u32.saturating_pow(attempt))
        .unwrap_or(MAX_RETRY_DELAY)
        .min(MAX_RETRY_DELAY)
}

#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub stale_time: Duration,
    pub retries: u32,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time: DEFAULT_STALE_TIME,
            retries: DEFAULT_READ_RETRIES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MutationOptions {
    pub retries: u32,
    /// Key prefixes invalidated after a successful mutation.
    pub invalidate: Vec<QueryKey>,
}

impl MutationOptions {
    pub fn invalidating(invalidate: Vec<QueryKey>) -> Self {
        Self {
            retries: DEFAULT_MUTATION_RETRIES,
            invalidate,
        }
    }
}

struct Entry {
    value: Value,
    updated_at: DateTime<Utc>,
    stale: bool,
}

type FetchState = Option<Result<Value, ApiError>>;

struct CacheInner {
    entries: RefCell<HashMap<QueryKey, Entry>>,
    pending: RefCell<HashMap<QueryKey, watch::Receiver<FetchState>>>,
    sleep: Rc<dyn Sleep>,
    spawn: Rc<dyn Spawn>,
}

/// Key-addressed cache of request results.
///
/// - A fresh entry (younger than the staleness window) is served without a
///   network call.
/// - A stale entry is served immediately while a background revalidation
///   runs; its result lands in the cache, last response wins.
/// - Concurrent reads of an equal key share one in-flight fetch.
///
/// The cache is a single-threaded handle (`Rc` inside); clone it freely
/// within the UI event loop.
#[derive(Clone)]
pub struct QueryCache {
    inner: Rc<CacheInner>,
}

impl QueryCache {
    pub fn new(sleep: Rc<dyn Sleep>, spawn: Rc<dyn Spawn>) -> Self {
        Self {
            inner: Rc::new(CacheInner {
                entries: RefCell::new(HashMap::new()),
                pending: RefCell::new(HashMap::new()),
                sleep,
                spawn,
            }),
        }
    }

    /// Cache wired to the browser event loop.
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        use crate::runtime::{BrowserSleep, BrowserSpawn};
        Self::new(Rc::new(BrowserSleep), Rc::new(BrowserSpawn))
    }

    /// Read through the cache. See the type-level contract.
    pub async fn read<F, Fut>(
        &self,
        key: QueryKey,
        fetcher: F,
        options: QueryOptions,
    ) -> Result<Value, ApiError>
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<Value, ApiError>> + 'static,
    {
        if let Some((value, fresh)) = self.cached(&key, options.stale_time) {
            if fresh {
                tracing::trace!(%key, "cache hit");
                return Ok(value);
            }

            // Stale: serve the cached value, revalidate in the background
            // unless a fetch for this key is already in flight.
            if !self.inner.pending.borrow().contains_key(&key) {
                tracing::trace!(%key, "stale hit, revalidating");
                let cache = self.clone();
                let retries = options.retries;
                let background_key = key.clone();
                self.inner.spawn.spawn(Box::pin(async move {
                    if let Err(err) = cache
                        .fetch_into_cache(background_key, &fetcher, retries)
                        .await
                    {
                        tracing::debug!(%err, "background revalidation failed");
                    }
                }));
            }
            return Ok(value);
        }

        // Join an in-flight fetch for the same key.
        let receiver = self.inner.pending.borrow().get(&key).cloned();
        if let Some(receiver) = receiver {
            tracing::trace!(%key, "joining in-flight fetch");
            return Self::await_pending(receiver).await;
        }

        self.fetch_into_cache(key, &fetcher, options.retries).await
    }

    /// Typed read.
    pub async fn read_as<T, F, Fut>(
        &self,
        key: QueryKey,
        fetcher: F,
        options: QueryOptions,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<Value, ApiError>> + 'static,
    {
        let value = self.read(key, fetcher, options).await?;
        serde_json::from_value(value).map_err(|err| ApiError::decode(err.to_string()))
    }

    /// Run a mutation with the mutation retry policy; on success invalidate
    /// the configured key prefixes.
    pub async fn mutate<F, Fut>(
        &self,
        fetcher: F,
        options: MutationOptions,
    ) -> Result<Value, ApiError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<Value, ApiError>>,
    {
        let result = self.run_with_retry(&fetcher, options.retries).await;
        if result.is_ok() {
            for prefix in &options.invalidate {
                self.invalidate(prefix);
            }
        }
        result
    }

    /// Typed mutation.
    pub async fn mutate_as<T, F, Fut>(
        &self,
        fetcher: F,
        options: MutationOptions,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<Value, ApiError>>,
    {
        let value = self.mutate(fetcher, options).await?;
        serde_json::from_value(value).map_err(|err| ApiError::decode(err.to_string()))
    }

    /// Mark every entry under `prefix` stale; the next read serves the old
    /// value once while refetching. Entries are kept, not dropped.
    pub fn invalidate(&self, prefix: &QueryKey) {
        let mut count = 0usize;
        for (key, entry) in self.inner.entries.borrow_mut().iter_mut() {
            if key.starts_with(prefix) {
                entry.stale = true;
                count += 1;
            }
        }
        tracing::debug!(%prefix, count, "invalidated cache entries");
    }

    /// Direct cache write, used when a mutation already returns the fresh
    /// entity.
    pub fn set<T: Serialize>(&self, key: QueryKey, value: &T) {
        match serde_json::to_value(value) {
            Ok(value) => self.write_entry(key, value),
            Err(err) => tracing::warn!(%err, "failed to serialize cache write"),
        }
    }

    /// Prepend to a cached list entry, creating it if absent. Keeps lists
    /// newest-first by insertion order.
    pub fn prepend(&self, key: QueryKey, value: Value) {
        let mut list = self
            .peek(&key)
            .and_then(|v| v.as_array().cloned())
            .unwrap_or_default();
        list.insert(0, value);
        self.write_entry(key, Value::Array(list));
    }

    /// Current cached value, regardless of freshness.
    pub fn peek(&self, key: &QueryKey) -> Option<Value> {
        self.inner
            .entries
            .borrow()
            .get(key)
            .map(|entry| entry.value.clone())
    }

    fn cached(&self, key: &QueryKey, stale_time: Duration) -> Option<(Value, bool)> {
        let entries = self.inner.entries.borrow();
        let entry = entries.get(key)?;
        let age = Utc::now().signed_duration_since(entry.updated_at);
        let within_window = chrono::Duration::from_std(stale_time)
            .map(|window| age <= window)
            .unwrap_or(false);
        Some((entry.value.clone(), !entry.stale && within_window))
    }

    fn write_entry(&self, key: QueryKey, value: Value) {
        self.inner.entries.borrow_mut().insert(
            key,
            Entry {
                value,
                updated_at: Utc::now(),
                stale: false,
            },
        );
    }

    async fn fetch_into_cache<F, Fut>(
        &self,
        key: QueryKey,
        fetcher: &F,
        retries: u32,
    ) -> Result<Value, ApiError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<Value, ApiError>>,
    {
        let (sender, receiver) = watch::channel(None);
        self.inner
            .pending
            .borrow_mut()
            .insert(key.clone(), receiver);

        let result = self.run_with_retry(fetcher, retries).await;

        self.inner.pending.borrow_mut().remove(&key);
        if let Ok(value) = &result {
            self.write_entry(key, value.clone());
        }
        let _ = sender.send(Some(result.clone()));

        result
    }

    async fn run_with_retry<F, Fut>(&self, fetcher: &F, retries: u32) -> Result<Value, ApiError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<Value, ApiError>>,
    {
        let mut attempt = 0u32;
        loop {
            match fetcher().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if attempt >= retries {
                        return Err(err);
                    }
                    let delay = backoff_delay(attempt);
                    tracing::debug!(attempt, ?delay, message = %err.message, "retrying failed fetch");
                    self.inner.sleep.sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn await_pending(mut receiver: watch::Receiver<FetchState>) -> Result<Value, ApiError> {
        loop {
            let state = receiver.borrow().clone();
            if let Some(result) = state {
                return result;
            }
            if receiver.changed().await.is_err() {
                return Err(ApiError::transport("request was abandoned"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::keys;
    use crate::runtime::{InstantSleep, ManualSpawn};
    use serde_json::json;
    use std::cell::Cell;
    use ticketflow_core::TicketFilters;

    fn cache_with_spawner() -> (QueryCache, Rc<ManualSpawn>) {
        let spawner = Rc::new(ManualSpawn::new());
        let cache = QueryCache::new(Rc::new(InstantSleep), spawner.clone());
        (cache, spawner)
    }

    fn counting_fetcher(
        count: Rc<Cell<u32>>,
        value: Value,
    ) -> impl Fn() -> std::pin::Pin<Box<dyn Future<Output = Result<Value, ApiError>>>> + 'static
    {
        move || {
            count.set(count.get() + 1);
            let value = value.clone();
            Box::pin(async move { Ok(value) })
        }
    }

    fn backdate(cache: &QueryCache, key: &QueryKey, age: chrono::Duration) {
        let mut entries = cache.inner.entries.borrow_mut();
        let entry = entries.get_mut(key).expect("entry to backdate");
        entry.updated_at = Utc::now() - age;
    }

    #[tokio::test]
    async fn fresh_entry_served_without_refetch() {
        let (cache, _) = cache_with_spawner();
        let count = Rc::new(Cell::new(0));
        let key = keys::tickets_all(&TicketFilters::default());

        let first = cache
            .read(
                key.clone(),
                counting_fetcher(count.clone(), json!({ "total": 1 })),
                QueryOptions::default(),
            )
            .await
            .unwrap();
        let second = cache
            .read(
                key,
                counting_fetcher(count.clone(), json!({ "total": 2 })),
                QueryOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(count.get(), 1);
    }

    #[tokio::test]
    async fn concurrent_reads_share_one_fetch() {
        let (cache, _) = cache_with_spawner();
        let count = Rc::new(Cell::new(0));
        let key = keys::ticket_detail("t-1");

        let fetch_count = count.clone();
        let fetcher = move || {
            fetch_count.set(fetch_count.get() + 1);
            Box::pin(async move {
                // Yield so the second reader can observe the in-flight fetch.
                tokio::task::yield_now().await;
                Ok(json!({ "id": "t-1" }))
            })
                as std::pin::Pin<Box<dyn Future<Output = Result<Value, ApiError>>>>
        };

        let (a, b) = tokio::join!(
            cache.read(key.clone(), fetcher.clone(), QueryOptions::default()),
            cache.read(key, fetcher, QueryOptions::default()),
        );

        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(count.get(), 1);
    }

    #[tokio::test]
    async fn stale_entry_served_then_revalidated_in_background() {
        let (cache, spawner) = cache_with_spawner();
        let key = keys::ticket_detail("t-9");
        cache.set(key.clone(), &json!({ "rev": 1 }));
        backdate(&cache, &key, chrono::Duration::minutes(10));

        let count = Rc::new(Cell::new(0));
        let served = cache
            .read(
                key.clone(),
                counting_fetcher(count.clone(), json!({ "rev": 2 })),
                QueryOptions::default(),
            )
            .await
            .unwrap();

        // Old value served immediately, no inline fetch.
        assert_eq!(served, json!({ "rev": 1 }));
        assert_eq!(count.get(), 0);
        assert_eq!(spawner.pending(), 1);

        spawner.run_all().await;
        assert_eq!(count.get(), 1);
        assert_eq!(cache.peek(&key).unwrap(), json!({ "rev": 2 }));
    }

    #[tokio::test]
    async fn invalidated_prefix_forces_refetch() {
        let (cache, spawner) = cache_with_spawner();
        let detail = keys::ticket_detail("t-1");
        let list = keys::tickets_all(&TicketFilters::default());
        cache.set(detail.clone(), &json!({ "rev": 1 }));
        cache.set(list.clone(), &json!([1]));

        cache.invalidate(&keys::tickets());

        let count = Rc::new(Cell::new(0));
        let _ = cache
            .read(
                detail.clone(),
                counting_fetcher(count.clone(), json!({ "rev": 2 })),
                QueryOptions::default(),
            )
            .await
            .unwrap();
        let _ = cache
            .read(
                list.clone(),
                counting_fetcher(count.clone(), json!([2])),
                QueryOptions::default(),
            )
            .await
            .unwrap();

        spawner.run_all().await;
        assert_eq!(count.get(), 2);
        assert_eq!(cache.peek(&detail).unwrap(), json!({ "rev": 2 }));
        assert_eq!(cache.peek(&list).unwrap(), json!([2]));
    }

    #[tokio::test]
    async fn mutation_invalidates_detail_and_list() {
        let (cache, _) = cache_with_spawner();
        let detail = keys::ticket_detail("t-1");
        let list = keys::tickets_all(&TicketFilters::default());
        cache.set(detail.clone(), &json!({ "status": "open" }));
        cache.set(list.clone(), &json!(["t-1"]));

        let updated = cache
            .mutate(
                || async { Ok(json!({ "status": "resolved" })) },
                MutationOptions::invalidating(vec![
                    keys::ticket_detail("t-1"),
                    keys::tickets_lists(),
                ]),
            )
            .await
            .unwrap();

        assert_eq!(updated, json!({ "status": "resolved" }));
        assert!(cache.inner.entries.borrow()[&detail].stale);
        assert!(cache.inner.entries.borrow()[&list].stale);
    }

    #[tokio::test]
    async fn failed_mutation_does_not_invalidate() {
        let (cache, _) = cache_with_spawner();
        let detail = keys::ticket_detail("t-1");
        cache.set(detail.clone(), &json!({ "status": "open" }));

        let attempts = Rc::new(Cell::new(0u32));
        let counter = attempts.clone();
        let result = cache
            .mutate(
                move || {
                    counter.set(counter.get() + 1);
                    async { Err(ApiError::transport("boom")) }
                },
                MutationOptions::invalidating(vec![keys::tickets()]),
            )
            .await;

        assert!(result.is_err());
        // One initial try plus one retry.
        assert_eq!(attempts.get(), 2);
        assert!(!cache.inner.entries.borrow()[&detail].stale);
    }

    #[tokio::test]
    async fn reads_retry_up_to_three_times() {
        let (cache, _) = cache_with_spawner();
        let attempts = Rc::new(Cell::new(0u32));
        let counter = attempts.clone();

        let result = cache
            .read(
                keys::auth_me(),
                move || {
                    let n = counter.get() + 1;
                    counter.set(n);
                    async move {
                        if n < 4 {
                            Err(ApiError::transport("flaky"))
                        } else {
                            Ok(json!({ "ok": true }))
                        }
                    }
                },
                QueryOptions::default(),
            )
            .await;

        assert_eq!(result.unwrap(), json!({ "ok": true }));
        assert_eq!(attempts.get(), 4);
    }

    #[tokio::test]
    async fn retries_exhausted_surface_last_error() {
        let (cache, _) = cache_with_spawner();
        let attempts = Rc::new(Cell::new(0u32));
        let counter = attempts.clone();

        let result = cache
            .read(
                keys::auth_me(),
                move || {
                    counter.set(counter.get() + 1);
                    async { Err(ApiError::transport("down")) }
                },
                QueryOptions::default(),
            )
            .await;

        assert_eq!(result.unwrap_err().message, "down");
        assert_eq!(attempts.get(), 4);
    }

    #[test]
    fn backoff_schedule_doubles_and_caps() {
        let secs: Vec<u64> = (0..7).map(|a| backoff_delay(a).as_secs()).collect();
        assert_eq!(secs, vec![1, 2, 4, 8, 16, 30, 30]);
    }

    #[tokio::test]
    async fn prepend_keeps_newest_first() {
        let (cache, _) = cache_with_spawner();
        let key = keys::ai_suggestions("t-1");

        cache.prepend(key.clone(), json!({ "id": "s-1" }));
        cache.prepend(key.clone(), json!({ "id": "s-2" }));

        let list = cache.peek(&key).unwrap();
        assert_eq!(list, json!([{ "id": "s-2" }, { "id": "s-1" }]));
    }
}
