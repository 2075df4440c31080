//! Listing scrape and per-article fan-out.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use log::{debug, warn};

use crate::errors::NewsError;
use crate::extract::{extract_article_content, parse_listing};
use crate::fetch::{HttpPageFetcher, PageFetcher};
use crate::models::{load_failure_marker, ArticleRecord, MISSING_CONTENT_MARKER};

/// ShareSansar IPO/FPO announcement category.
pub const IPO_LISTING_URL: &str = "https://www.sharesansar.com/category/ipo-fpo-news";

/// Articles scraped per run unless the caller asks otherwise.
pub const DEFAULT_ARTICLE_LIMIT: usize = 5;

/// Concurrent article fetches per scrape; keeps the fan-out polite.
const EXTRACTION_CONCURRENCY: usize = 4;

/// Source of assembled IPO article records.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Scrape up to `limit` recent articles, in listing order.
    async fn scrape_recent(&self, limit: usize) -> Result<Vec<ArticleRecord>, NewsError>;
}

/// Two-stage scraper over a [`PageFetcher`].
pub struct NewsScraper {
    fetcher: Arc<dyn PageFetcher>,
}

impl NewsScraper {
    pub fn new() -> Self {
        Self::with_fetcher(Arc::new(HttpPageFetcher::new()))
    }

    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Scrape the listing page and assemble one record per usable summary.
    ///
    /// The listing fetch failing fails the whole operation; there is
    /// nothing partial to return. Per-article failures degrade only that
    /// record's content field. Article pages are fetched with bounded
    /// concurrency and results keep listing order regardless of which
    /// fetch finishes first. A `limit` of zero asks for no articles and
    /// returns an empty batch without touching the network.
    pub async fn scrape_recent(&self, limit: usize) -> Result<Vec<ArticleRecord>, NewsError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let listing_html = self.fetcher.fetch(IPO_LISTING_URL).await?;

        let parsed = parse_listing(&listing_html, limit);
        if parsed.block_count == 0 {
            return Err(NewsError::NoArticles);
        }
        if parsed.summaries.is_empty() {
            return Err(NewsError::NoUsableArticles);
        }
        debug!(
            "scraping {} of {} summary blocks",
            parsed.summaries.len(),
            parsed.block_count
        );

        let records = stream::iter(parsed.summaries.into_iter().map(|summary| {
            let fetcher = Arc::clone(&self.fetcher);
            async move {
                let content = fetch_article_content(fetcher.as_ref(), &summary.link).await;
                ArticleRecord {
                    title: summary.title,
                    date: summary.date,
                    link: summary.link,
                    content,
                }
            }
        }))
        .buffered(EXTRACTION_CONCURRENCY)
        .collect::<Vec<_>>()
        .await;

        Ok(records)
    }
}

impl Default for NewsScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NewsSource for NewsScraper {
    async fn scrape_recent(&self, limit: usize) -> Result<Vec<ArticleRecord>, NewsError> {
        NewsScraper::scrape_recent(self, limit).await
    }
}

/// Fetch one article page and extract its content, recovering every
/// failure into a marker string so the batch stays total.
async fn fetch_article_content(fetcher: &dyn PageFetcher, url: &str) -> String {
    match fetcher.fetch(url).await {
        Ok(html) => match extract_article_content(&html) {
            Some(text) => text,
            None => {
                warn!("content region missing for {}", url);
                MISSING_CONTENT_MARKER.to_string()
            }
        },
        Err(err) => {
            warn!("failed to load article {}: {}", url, err);
            load_failure_marker(&err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    struct MockPageFetcher {
        pages: HashMap<String, Result<String, NewsError>>,
        delays_ms: HashMap<String, u64>,
    }

    impl MockPageFetcher {
        fn new() -> Self {
            Self {
                pages: HashMap::new(),
                delays_ms: HashMap::new(),
            }
        }

        fn with_page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), Ok(body.to_string()));
            self
        }

        fn with_failure(mut self, url: &str, err: NewsError) -> Self {
            self.pages.insert(url.to_string(), Err(err));
            self
        }

        fn with_delay(mut self, url: &str, millis: u64) -> Self {
            self.delays_ms.insert(url.to_string(), millis);
            self
        }
    }

    #[async_trait]
    impl PageFetcher for MockPageFetcher {
        async fn fetch(&self, url: &str) -> Result<String, NewsError> {
            if let Some(millis) = self.delays_ms.get(url) {
                tokio::time::sleep(Duration::from_millis(*millis)).await;
            }
            match self.pages.get(url) {
                Some(result) => result.clone(),
                None => Err(NewsError::Transport(format!("no fixture for {url}"))),
            }
        }
    }

    fn listing_block(title: &str, link: &str) -> String {
        format!(
            r#"<div class="featured-news-list">
                 <a href="{link}"><h4 class="featured-news-title">{title}</h4></a>
                 <span class="text-org">Jun 10, 2024</span>
               </div>"#
        )
    }

    fn article_page(body: &str) -> String {
        format!(r#"<html><body><div id="newsdetail-content"><p>{body}</p></div></body></html>"#)
    }

    fn five_article_listing() -> (String, Vec<String>) {
        let links: Vec<String> = (1..=5)
            .map(|i| format!("https://example.com/articles/{i}"))
            .collect();
        let blocks: Vec<String> = links
            .iter()
            .enumerate()
            .map(|(i, link)| listing_block(&format!("IPO {}", i + 1), link))
            .collect();
        let listing = format!("<html><body>{}</body></html>", blocks.join("\n"));
        (listing, links)
    }

    #[tokio::test]
    async fn test_per_article_failure_degrades_only_that_record() {
        let (listing, links) = five_article_listing();
        let mut mock = MockPageFetcher::new().with_page(IPO_LISTING_URL, &listing);
        for (i, link) in links.iter().enumerate() {
            if i == 2 {
                mock = mock
                    .with_failure(link, NewsError::Transport("connection reset".to_string()));
            } else {
                mock = mock.with_page(link, &article_page(&format!("Body {}", i + 1)));
            }
        }

        let scraper = NewsScraper::with_fetcher(Arc::new(mock));
        let records = scraper.scrape_recent(5).await.unwrap();

        assert_eq!(records.len(), 5);
        assert!(records[2].content_failed());
        assert!(records[2].content.contains("connection reset"));
        for (i, record) in records.iter().enumerate() {
            if i != 2 {
                assert_eq!(record.content, format!("Body {}", i + 1));
            }
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_records_keep_listing_order_despite_completion_order() {
        let (listing, links) = five_article_listing();
        let mut mock = MockPageFetcher::new().with_page(IPO_LISTING_URL, &listing);
        // First article finishes last, last article finishes first.
        for (i, link) in links.iter().enumerate() {
            mock = mock
                .with_page(link, &article_page(&format!("Body {}", i + 1)))
                .with_delay(link, (5 - i as u64) * 30);
        }

        let scraper = NewsScraper::with_fetcher(Arc::new(mock));
        let records = scraper.scrape_recent(5).await.unwrap();

        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["IPO 1", "IPO 2", "IPO 3", "IPO 4", "IPO 5"]);
    }

    #[tokio::test]
    async fn test_missing_content_region_uses_marker() {
        let listing = format!(
            "<html><body>{}</body></html>",
            listing_block("IPO 1", "https://example.com/articles/1")
        );
        let mock = MockPageFetcher::new()
            .with_page(IPO_LISTING_URL, &listing)
            .with_page(
                "https://example.com/articles/1",
                "<html><body><div id='other'></div></body></html>",
            );

        let scraper = NewsScraper::with_fetcher(Arc::new(mock));
        let records = scraper.scrape_recent(5).await.unwrap();
        assert_eq!(records[0].content, MISSING_CONTENT_MARKER);
    }

    #[tokio::test]
    async fn test_listing_fetch_failure_fails_operation() {
        let mock = MockPageFetcher::new()
            .with_failure(IPO_LISTING_URL, NewsError::Transport("dns failure".to_string()));
        let scraper = NewsScraper::with_fetcher(Arc::new(mock));
        let err = scraper.scrape_recent(5).await.unwrap_err();
        assert!(matches!(err, NewsError::Transport(_)));
    }

    #[tokio::test]
    async fn test_zero_blocks_is_no_articles() {
        let mock = MockPageFetcher::new()
            .with_page(IPO_LISTING_URL, "<html><body><p>new layout</p></body></html>");
        let scraper = NewsScraper::with_fetcher(Arc::new(mock));
        let err = scraper.scrape_recent(5).await.unwrap_err();
        assert!(matches!(err, NewsError::NoArticles));
    }

    #[tokio::test]
    async fn test_blocks_without_details_is_no_usable_articles() {
        // Blocks exist but none carries a date span.
        let listing = r#"<html><body>
            <div class="featured-news-list">
              <a href="https://example.com/articles/1"><h4 class="featured-news-title">IPO 1</h4></a>
            </div>
            <div class="featured-news-list">
              <a href="https://example.com/articles/2"><h4 class="featured-news-title">IPO 2</h4></a>
            </div>
        </body></html>"#;
        let mock = MockPageFetcher::new().with_page(IPO_LISTING_URL, listing);
        let scraper = NewsScraper::with_fetcher(Arc::new(mock));
        let err = scraper.scrape_recent(5).await.unwrap_err();
        assert!(matches!(err, NewsError::NoUsableArticles));
    }

    #[tokio::test]
    async fn test_zero_limit_returns_empty_batch_without_fetching() {
        // No fixtures registered, so any fetch would fail the operation.
        let scraper = NewsScraper::with_fetcher(Arc::new(MockPageFetcher::new()));
        let records = scraper.scrape_recent(0).await.unwrap();
        assert!(records.is_empty());
    }
}
