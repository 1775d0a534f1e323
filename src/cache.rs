use std::{future::Future, time::Duration};

use chrono::{DateTime, Utc};
use moka::future::Cache;

use crate::{
    error::Error,
    report::{FinancialOverview, ReportData},
};

/// Fetches a cached value or computes it using the provided async function.
/// Uses Moka's built-in stampede protection: only one caller executes
/// the fetch on a cache miss; concurrent callers wait for the result.
pub async fn cached_fetch<T, F, Fut>(
    cache: &Cache<String, T>,
    key: &str,
    fetch_fn: F,
) -> Result<T, Error>
where
    T: Clone + Send + Sync + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, Error>>,
{
    cache
        .try_get_with_by_ref(key, fetch_fn())
        .await
        .map_err(|e| Error::TaskError(e.to_string()))
}

/// Response caches for the report endpoints.
pub struct ApiCache {
    pub reports: Cache<String, ReportData>,
    pub overview: Cache<String, FinancialOverview>,
}

impl ApiCache {
    pub fn new(ttl_minutes: u64) -> Self {
        let ttl = Duration::from_secs(ttl_minutes * 60);
        Self {
            reports: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(1_000)
                .build(),
            overview: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(100)
                .build(),
        }
    }
}

impl std::fmt::Debug for ApiCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCache")
            .field("reports", &self.reports.entry_count())
            .field("overview", &self.overview.entry_count())
            .finish()
    }
}

/// Build a cache key for a report request.
/// Includes report type, the date window and the optional property filter.
pub fn build_report_cache_key(
    report_type: &str,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    property_id: Option<i64>,
) -> String {
    let property_key = property_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "all".to_string());
    format!(
        "{}_{}_{}_{}",
        report_type,
        from.timestamp(),
        to.timestamp(),
        property_key
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn test_cache() -> Cache<String, i32> {
        Cache::builder()
            .time_to_live(Duration::from_secs(60))
            .max_capacity(100)
            .build()
    }

    #[tokio::test]
    async fn test_cached_fetch_miss_then_hit() {
        let cache = test_cache();

        // First call: cache miss, fetch executes
        let result = cached_fetch(&cache, "key1", || async { Ok(42) }).await;
        assert_eq!(result.unwrap(), 42);

        // Second call: cache hit, returns same value
        let result = cached_fetch(&cache, "key1", || async {
            panic!("should not be called on cache hit")
        })
        .await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_cached_fetch_error_propagation() {
        let cache = test_cache();

        let result: Result<i32, Error> =
            cached_fetch(&cache, "err_key", || async {
                Err(Error::TaskError("db connection failed".to_string()))
            })
            .await;

        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(
            err_msg.contains("db connection failed"),
            "Error message was: {}",
            err_msg
        );
    }

    #[tokio::test]
    async fn test_cached_fetch_stampede_protection() {
        let cache = Arc::new(test_cache());
        let fetch_count = Arc::new(AtomicU32::new(0));

        let mut handles = vec![];
        for _ in 0..10 {
            let cache = cache.clone();
            let fetch_count = fetch_count.clone();
            handles.push(tokio::spawn(async move {
                cached_fetch(&cache, "stampede_key", || async {
                    fetch_count.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Ok::<_, Error>(42)
                })
                .await
            }));
        }

        for handle in handles {
            let result = handle.await.unwrap();
            assert_eq!(result.unwrap(), 42);
        }

        // Moka coalesces concurrent fetches — expect 1 (or at most 2 due to timing)
        let count = fetch_count.load(Ordering::SeqCst);
        assert!(count <= 2, "Fetch was called {} times, expected 1-2", count);
    }

    #[tokio::test]
    async fn test_cached_fetch_expiry() {
        let cache: Cache<String, i32> = Cache::builder()
            .time_to_live(Duration::from_millis(100))
            .max_capacity(100)
            .build();

        let result = cached_fetch(&cache, "ttl_key", || async { Ok(1) }).await;
        assert_eq!(result.unwrap(), 1);

        tokio::time::sleep(Duration::from_millis(200)).await;

        // Should re-fetch after expiry
        let result = cached_fetch(&cache, "ttl_key", || async { Ok(2) }).await;
        assert_eq!(result.unwrap(), 2);
    }

    #[test]
    fn test_build_report_cache_key() {
        let from = DateTime::from_timestamp(0, 0).unwrap();
        let to = DateTime::from_timestamp(86_400, 0).unwrap();

        assert_eq!(
            build_report_cache_key("occupancy", from, to, None),
            "occupancy_0_86400_all"
        );
        assert_eq!(
            build_report_cache_key("rent_roll", from, to, Some(7)),
            "rent_roll_0_86400_7"
        );
    }
}
