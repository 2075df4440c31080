//! Error types for the NEPSE exchange adapter.

use thiserror::Error;

/// Errors returned by the exchange adapter.
///
/// Variants carry their cause as plain strings so values stay cheap to
/// clone; the caching layer shares a single failure between every waiter
/// coalesced onto one in-flight call.
#[derive(Debug, Clone, Error)]
pub enum MarketDataError {
    /// Network-level failure: DNS, connect, TLS handshake, or timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// Upstream answered with a non-success HTTP status.
    #[error("upstream returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Upstream payload did not match the expected shape.
    #[error("format error: {0}")]
    Format(String),

    /// A per-symbol query matched no listed security.
    #[error("symbol not found: {0}")]
    SymbolNotFound(String),
}

impl From<reqwest::Error> for MarketDataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MarketDataError::Transport(format!("request timed out: {err}"))
        } else {
            MarketDataError::Transport(err.to_string())
        }
    }
}
