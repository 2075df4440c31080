//! NEPSE Hub News Crate
//!
//! Two-stage scraper for ShareSansar IPO/FPO announcements:
//!
//! 1. Fetch the category listing page and parse up to a bounded number of
//!    article summaries (title, link, date).
//! 2. Visit each article independently and extract the body text from its
//!    content region.
//!
//! Stage two failures never abort the batch: a broken article page leaves
//! a failure marker in that record's content field and every other record
//! intact. Only whole-operation failures (listing unreachable, zero
//! parseable summaries) surface as errors.

pub mod errors;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod scrape;

pub use errors::NewsError;
pub use fetch::{HttpPageFetcher, PageFetcher};
pub use models::{ArticleRecord, ArticleSummary, MISSING_CONTENT_MARKER};
pub use scrape::{NewsScraper, NewsSource, DEFAULT_ARTICLE_LIMIT, IPO_LISTING_URL};
