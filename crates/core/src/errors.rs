//! Aggregated error type for the service layer.

use nepsehub_market_data::MarketDataError;
use nepsehub_news::NewsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the cached services.
///
/// `Clone` is load-bearing: when concurrent cache misses coalesce onto one
/// upstream call, every waiter receives the same failure.
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("market data error: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("news error: {0}")]
    News(#[from] NewsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_data_error_converts() {
        let err: Error = MarketDataError::Transport("connection refused".to_string()).into();
        assert_eq!(
            err.to_string(),
            "market data error: transport error: connection refused"
        );
    }

    #[test]
    fn test_news_error_converts() {
        let err: Error = NewsError::NoArticles.into();
        assert!(matches!(err, Error::News(NewsError::NoArticles)));
    }
}
