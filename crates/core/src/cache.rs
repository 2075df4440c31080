//! TTL cache with single-flight miss handling.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::errors::{Error, Result};

const MAX_ENTRIES: u64 = 1_000;

/// A keyed cache where every entry expires `ttl` after it was stored.
///
/// Keys are strings and must embed every parameter of the call they
/// memoize (a company symbol, an article limit) so distinct calls never
/// collide on one entry.
pub struct TtlCache<V> {
    inner: Cache<String, V>,
}

impl<V> TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(ttl: Duration) -> Self {
        let inner = Cache::builder()
            .time_to_live(ttl)
            .max_capacity(MAX_ENTRIES)
            .build();
        Self { inner }
    }

    /// Return the live entry for `key`, or run `compute` to fill it.
    ///
    /// Concurrent misses for the same key coalesce: one compute runs to
    /// completion and every waiter shares its value. A failed compute is
    /// never stored, so the next call for that key retries instead of
    /// serving a poisoned entry for the rest of the TTL.
    pub async fn get_or_compute<F>(&self, key: &str, compute: F) -> Result<V>
    where
        F: Future<Output = Result<V>>,
    {
        self.inner
            .try_get_with(key.to_string(), compute)
            .await
            .map_err(|shared: Arc<Error>| (*shared).clone())
    }

    /// Drop every entry immediately; the next read per key recomputes.
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}
