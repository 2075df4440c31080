//! NEPSE Market Data Crate
//!
//! This crate wraps the Nepal Stock Exchange HTTP API and normalizes its
//! endpoints into typed results:
//!
//! - Market status (open / closed)
//! - Top-ten movers: gainers, losers, turnover leaders
//! - Index quotes: the headline NEPSE index plus sector sub-indices,
//!   merged into one table
//! - Listed companies and per-symbol security details
//!
//! Every query performs exactly one upstream round trip and returns either
//! a typed value or a [`MarketDataError`]; retries and memoization are the
//! caller's concern. The upstream serves an incomplete TLS certificate
//! chain, so certificate verification is disabled for this one host as an
//! accepted operational tradeoff.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{
    CompanyRecord, IndexQuote, MarketSnapshot, MarketStatus, MoverRow,
};
pub use provider::nepse::NepseClient;
pub use provider::MarketDataSource;
