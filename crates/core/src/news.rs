//! Cached IPO news service.

use std::sync::Arc;

use log::debug;

use nepsehub_news::{ArticleRecord, NewsSource};

use crate::cache::TtlCache;
use crate::errors::Result;
use crate::settings::CacheSettings;

/// Memoizes the IPO listing scrape for the news TTL.
pub struct IpoNewsService {
    source: Arc<dyn NewsSource>,
    cache: TtlCache<Vec<ArticleRecord>>,
}

impl IpoNewsService {
    pub fn new(source: Arc<dyn NewsSource>, settings: &CacheSettings) -> Self {
        Self {
            source,
            cache: TtlCache::new(settings.ipo_news_ttl),
        }
    }

    /// Up to `limit` recent articles, in listing order. The limit is part
    /// of the cache key, so different limits are separate entries.
    pub async fn recent_articles(&self, limit: usize) -> Result<Vec<ArticleRecord>> {
        let key = format!("ipo:recent:{limit}");
        let source = Arc::clone(&self.source);
        self.cache
            .get_or_compute(&key, async move {
                debug!("scraping up to {} recent IPO articles", limit);
                Ok(source.scrape_recent(limit).await?)
            })
            .await
    }

    /// Drop every cached scrape; the next read re-scrapes.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nepsehub_news::NewsError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockNewsSource {
        calls: AtomicUsize,
        failures_remaining: AtomicUsize,
    }

    impl MockNewsSource {
        fn new(failures: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                failures_remaining: AtomicUsize::new(failures),
            }
        }
    }

    #[async_trait]
    impl NewsSource for MockNewsSource {
        async fn scrape_recent(
            &self,
            limit: usize,
        ) -> std::result::Result<Vec<ArticleRecord>, NewsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let remaining = self.failures_remaining.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failures_remaining.store(remaining - 1, Ordering::SeqCst);
                return Err(NewsError::NoArticles);
            }
            Ok((0..limit)
                .map(|i| ArticleRecord {
                    title: format!("IPO {}", i + 1),
                    date: "Jun 10, 2024".to_string(),
                    link: format!("https://example.com/articles/{}", i + 1),
                    content: format!("Body {}", i + 1),
                })
                .collect())
        }
    }

    fn service_with(source: Arc<MockNewsSource>) -> IpoNewsService {
        IpoNewsService::new(source, &CacheSettings::default())
    }

    #[tokio::test]
    async fn test_scrape_runs_once_within_ttl() {
        let source = Arc::new(MockNewsSource::new(0));
        let service = service_with(Arc::clone(&source));

        let first = service.recent_articles(5).await.unwrap();
        let second = service.recent_articles(5).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_different_limits_use_different_entries() {
        let source = Arc::new(MockNewsSource::new(0));
        let service = service_with(Arc::clone(&source));

        assert_eq!(service.recent_articles(3).await.unwrap().len(), 3);
        assert_eq!(service.recent_articles(5).await.unwrap().len(), 5);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_scrape_is_retried() {
        let source = Arc::new(MockNewsSource::new(1));
        let service = service_with(Arc::clone(&source));

        let err = service.recent_articles(5).await.unwrap_err();
        assert!(matches!(err, crate::Error::News(NewsError::NoArticles)));

        assert_eq!(service.recent_articles(5).await.unwrap().len(), 5);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_all_forces_rescrape() {
        let source = Arc::new(MockNewsSource::new(0));
        let service = service_with(Arc::clone(&source));

        service.recent_articles(5).await.unwrap();
        service.invalidate_all();
        service.recent_articles(5).await.unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
