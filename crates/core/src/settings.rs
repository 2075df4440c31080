//! Cache and rate-limit configuration.
//!
//! Defaults match the dashboard's tuning: volatile data (market overview,
//! per-company details) refreshes every five minutes, the company roster
//! hourly, IPO news every ten minutes, and chat is limited to two requests
//! per minute per session. Every value is plain configuration; callers
//! construct their own settings to override.

use std::time::Duration;

pub const DEFAULT_MARKET_SNAPSHOT_TTL: Duration = Duration::from_secs(300);
pub const DEFAULT_COMPANY_LIST_TTL: Duration = Duration::from_secs(3600);
pub const DEFAULT_COMPANY_DETAILS_TTL: Duration = Duration::from_secs(300);
pub const DEFAULT_IPO_NEWS_TTL: Duration = Duration::from_secs(600);

pub const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 2;
pub const DEFAULT_RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

/// Time-to-live per cached data kind.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub market_snapshot_ttl: Duration,
    pub company_list_ttl: Duration,
    pub company_details_ttl: Duration,
    pub ipo_news_ttl: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            market_snapshot_ttl: DEFAULT_MARKET_SNAPSHOT_TTL,
            company_list_ttl: DEFAULT_COMPANY_LIST_TTL,
            company_details_ttl: DEFAULT_COMPANY_DETAILS_TTL,
            ipo_news_ttl: DEFAULT_IPO_NEWS_TTL,
        }
    }
}

/// Fixed-window rate limit applied per user session.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitSettings {
    /// Requests admitted inside one window.
    pub max_requests: u32,
    /// Window length; the counter resets only once a full window has
    /// elapsed since the window opened.
    pub window: Duration,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
            window: DEFAULT_RATE_LIMIT_WINDOW,
        }
    }
}
