//! Cached market data service.

use std::sync::Arc;

use log::debug;

use nepsehub_market_data::{CompanyRecord, MarketDataSource, MarketSnapshot};

use crate::cache::TtlCache;
use crate::errors::Result;
use crate::settings::CacheSettings;

const SNAPSHOT_KEY: &str = "market:snapshot";
const COMPANY_LIST_KEY: &str = "company:list";

/// Memoizes the exchange adapter behind per-data-kind TTL caches.
///
/// Concurrent dashboard views share one in-flight upstream call per key;
/// a failed call is never cached, so the next view retries.
pub struct MarketService {
    source: Arc<dyn MarketDataSource>,
    snapshot_cache: TtlCache<MarketSnapshot>,
    company_list_cache: TtlCache<Vec<CompanyRecord>>,
    company_details_cache: TtlCache<serde_json::Value>,
}

impl MarketService {
    pub fn new(source: Arc<dyn MarketDataSource>, settings: &CacheSettings) -> Self {
        Self {
            source,
            snapshot_cache: TtlCache::new(settings.market_snapshot_ttl),
            company_list_cache: TtlCache::new(settings.company_list_ttl),
            company_details_cache: TtlCache::new(settings.company_details_ttl),
        }
    }

    /// Full market overview, served from cache within the snapshot TTL.
    pub async fn snapshot(&self) -> Result<MarketSnapshot> {
        let source = Arc::clone(&self.source);
        self.snapshot_cache
            .get_or_compute(SNAPSHOT_KEY, async move {
                debug!("refreshing market snapshot");
                Ok(source.market_snapshot().await?)
            })
            .await
    }

    /// All listed companies, cached for the roster TTL.
    pub async fn companies(&self) -> Result<Vec<CompanyRecord>> {
        let source = Arc::clone(&self.source);
        self.company_list_cache
            .get_or_compute(COMPANY_LIST_KEY, async move {
                debug!("refreshing company list");
                Ok(source.company_list().await?)
            })
            .await
    }

    /// Detail payload for one symbol.
    ///
    /// The normalized symbol is part of the cache key, so two symbols
    /// never share an entry and `"nabil"` and `"NABIL"` share one.
    pub async fn company_details(&self, symbol: &str) -> Result<serde_json::Value> {
        let symbol = symbol.trim().to_uppercase();
        let key = format!("company:details:{symbol}");
        let source = Arc::clone(&self.source);
        self.company_details_cache
            .get_or_compute(&key, async move {
                debug!("fetching company details for {}", symbol);
                Ok(source.company_details(&symbol).await?)
            })
            .await
    }

    /// Drop every cached market value; the next reads hit upstream.
    pub fn invalidate_all(&self) {
        self.snapshot_cache.invalidate_all();
        self.company_list_cache.invalidate_all();
        self.company_details_cache.invalidate_all();
    }
}
