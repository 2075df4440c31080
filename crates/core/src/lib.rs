//! NEPSE Hub Core - caches, session routing, and cached services.
//!
//! This crate sits between the data-acquisition crates and the UI/LLM
//! boundary:
//!
//! - [`cache`]: per-data-kind TTL caches with single-flight miss handling
//! - [`market`] / [`news`]: services that memoize the exchange adapter and
//!   the IPO scraper behind those caches
//! - [`session`]: per-user-session context (active IPO article or company
//!   snapshot) and the fixed-window chat rate limiter
//! - [`settings`]: the TTL and rate-limit configuration with its defaults
//!
//! All state is in-memory and process-lifetime only; nothing here
//! persists across restarts.

pub mod cache;
pub mod errors;
pub mod market;
pub mod news;
pub mod session;
pub mod settings;

pub use cache::TtlCache;
pub use errors::{Error, Result};
pub use market::MarketService;
pub use news::IpoNewsService;
pub use session::{Admission, Session, SessionContext};
pub use settings::{CacheSettings, RateLimitSettings};
