//! HTML extraction for the listing page and article pages.
//!
//! All parsing is synchronous: `scraper::Html` is not `Send`, so documents
//! are built, read, and dropped inside these helpers and never cross an
//! await point.

use log::debug;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::models::ArticleSummary;

static LISTING_BLOCK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.featured-news-list").expect("valid CSS selector"));
static LISTING_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h4.featured-news-title").expect("valid CSS selector"));
static LISTING_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("valid CSS selector"));
static LISTING_DATE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.text-org").expect("valid CSS selector"));
static ARTICLE_CONTENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#newsdetail-content").expect("valid CSS selector"));

/// Result of parsing the listing page.
pub struct ParsedListing {
    /// Summary blocks examined, complete or not. Zero means the page no
    /// longer matches the expected layout.
    pub block_count: usize,
    pub summaries: Vec<ArticleSummary>,
}

/// Parse article summaries from the listing page, in page order.
///
/// A block missing its title, link, or date is skipped and does not
/// consume a slot of `limit`; parsing stops once `limit` complete
/// summaries have been collected.
pub fn parse_listing(html: &str, limit: usize) -> ParsedListing {
    let document = Html::parse_document(html);
    let mut block_count = 0;
    let mut summaries = Vec::new();

    for block in document.select(&LISTING_BLOCK) {
        if summaries.len() >= limit {
            break;
        }
        block_count += 1;

        let title = block.select(&LISTING_TITLE).next().map(element_text);
        let link = block
            .select(&LISTING_LINK)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string);
        let date = block.select(&LISTING_DATE).next().map(element_text);

        match (title, link, date) {
            (Some(title), Some(link), Some(date)) => {
                summaries.push(ArticleSummary { title, link, date });
            }
            _ => {
                debug!("skipping summary block missing title, link, or date");
            }
        }
    }

    ParsedListing {
        block_count,
        summaries,
    }
}

/// Extract the article body from an article page.
///
/// Returns `None` when the content region is absent. Text nodes are
/// trimmed and joined with newlines so the source line structure survives
/// instead of being reflowed into one paragraph.
pub fn extract_article_content(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let region = document.select(&ARTICLE_CONTENT).next()?;
    let text = region
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    Some(text)
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
