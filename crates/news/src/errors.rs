//! Error types for the news scraper.

use thiserror::Error;

/// Whole-operation scraping failures.
///
/// Per-article problems are not errors; they degrade into failure markers
/// inside the affected [`crate::models::ArticleRecord`]. The empty-listing
/// variants keep their long-standing user-facing wording because callers
/// surface them verbatim.
#[derive(Debug, Clone, Error)]
pub enum NewsError {
    /// Network-level failure reaching the listing page.
    #[error("transport error: {0}")]
    Transport(String),

    /// The listing page answered with a non-success HTTP status.
    #[error("upstream returned status {status} for {url}")]
    Upstream { status: u16, url: String },

    /// No summary blocks found at all; the page layout has likely changed.
    #[error("Could not find any articles on the main list page. The website layout may have changed.")]
    NoArticles,

    /// Summary blocks were present but none carried title, link, and date.
    #[error("Found article containers, but could not extract any article details.")]
    NoUsableArticles,
}

impl From<reqwest::Error> for NewsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NewsError::Transport(format!("request timed out: {err}"))
        } else {
            NewsError::Transport(err.to_string())
        }
    }
}
