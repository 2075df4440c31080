//! Article models and failure markers.

use serde::Serialize;

/// Every failure marker starts with this prefix.
pub const CONTENT_FAILURE_PREFIX: &str = "FAILURE:";

/// Marker stored when an article page loads but its content region is
/// missing.
pub const MISSING_CONTENT_MARKER: &str =
    "FAILURE: Could not find the '#newsdetail-content' block on the article page.";

/// Marker stored when an article page cannot be loaded at all.
pub fn load_failure_marker(cause: &str) -> String {
    format!("FAILURE: Failed to load the article page. Error: {cause}")
}

/// One summary block parsed from the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSummary {
    pub title: String,
    pub link: String,
    /// Publication date exactly as printed on the listing page.
    pub date: String,
}

/// A fully assembled article record.
///
/// `content` is either the extracted body text or a failure marker; both
/// are valid terminal states, so a batch of records is always complete
/// even when individual extractions failed. Records keep the order of the
/// listing page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ArticleRecord {
    pub title: String,
    pub date: String,
    pub link: String,
    pub content: String,
}

impl ArticleRecord {
    /// True when `content` holds a failure marker instead of body text.
    pub fn content_failed(&self) -> bool {
        self.content.starts_with(CONTENT_FAILURE_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_failed_detects_markers() {
        let mut record = ArticleRecord {
            title: "Sunrise Hydro IPO opens".to_string(),
            date: "Jun 10, 2024".to_string(),
            link: "https://example.com/articles/1".to_string(),
            content: MISSING_CONTENT_MARKER.to_string(),
        };
        assert!(record.content_failed());

        record.content = load_failure_marker("transport error: connection reset");
        assert!(record.content_failed());

        record.content = "The issue opens on Jun 12.".to_string();
        assert!(!record.content_failed());
    }

    #[test]
    fn test_record_serializes_with_listing_field_names() {
        let record = ArticleRecord {
            title: "Sunrise Hydro IPO opens".to_string(),
            date: "Jun 10, 2024".to_string(),
            link: "https://example.com/articles/1".to_string(),
            content: "Body".to_string(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["title"], "Sunrise Hydro IPO opens");
        assert_eq!(value["date"], "Jun 10, 2024");
        assert_eq!(value["link"], "https://example.com/articles/1");
    }
}
