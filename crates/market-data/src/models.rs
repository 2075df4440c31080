//! Normalized models for NEPSE market data.
//!
//! Field names mirror the upstream JSON (`camelCase`) so payloads survive
//! a decode/encode round trip unchanged; the one deliberate normalization
//! is folding the gainer/loser `ltp` spelling and the turnover
//! `lastTradedPrice` spelling into a single field.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trading state of the exchange, derived from the status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketStatus {
    Open,
    Closed,
    Unknown,
}

impl MarketStatus {
    /// Classify the upstream status label.
    ///
    /// A missing label is `Unknown`. Any label containing "open"
    /// (case-insensitive) counts as `Open`, so pre-open phases read as
    /// open; everything else is `Closed`.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            None => MarketStatus::Unknown,
            Some(s) if s.to_lowercase().contains("open") => MarketStatus::Open,
            Some(_) => MarketStatus::Closed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketStatus::Open => "OPEN",
            MarketStatus::Closed => "CLOSED",
            MarketStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, MarketStatus::Open)
    }
}

impl std::fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of a top-ten movers table (gainers, losers, turnover leaders).
///
/// Rows arrive rank-ordered and stay in upstream order. The gainer/loser
/// endpoints spell the price `ltp` while the turnover endpoint spells it
/// `lastTradedPrice`; both land in [`MoverRow::last_traded_price`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoverRow {
    pub symbol: String,

    /// Last traded price.
    #[serde(default, alias = "ltp")]
    pub last_traded_price: Option<Decimal>,

    /// Absolute change since previous close.
    #[serde(default)]
    pub point_change: Option<Decimal>,

    /// Percent change since previous close.
    #[serde(default)]
    pub percentage_change: Option<Decimal>,

    /// Session turnover, present on the turnover leaderboard.
    #[serde(default)]
    pub turnover: Option<Decimal>,

    /// Full security name (can be absent on some boards).
    #[serde(default)]
    pub security_name: Option<String>,
}

/// Quote for one exchange index, headline or sector sub-index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndexQuote {
    /// Index name as published upstream (e.g., "NEPSE Index",
    /// "Banking SubIndex").
    #[serde(rename = "index")]
    pub name: String,

    #[serde(default)]
    pub current_value: Option<Decimal>,

    #[serde(default)]
    pub change: Option<Decimal>,

    #[serde(default)]
    pub per_change: Option<Decimal>,
}

/// One listed company from the company-list endpoint.
///
/// Only symbol and name are typed; everything else the upstream sends
/// (sector, email, instrument type, ...) rides along untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub symbol: String,

    #[serde(default)]
    pub company_name: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CompanyRecord {
    /// Company name, falling back to the symbol when upstream omits it.
    pub fn display_name(&self) -> &str {
        self.company_name.as_deref().unwrap_or(&self.symbol)
    }
}

/// Complete overview of the exchange at one point in time.
///
/// Built wholesale from one round of upstream calls and never partially
/// mutated; a stale snapshot is replaced, not patched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketSnapshot {
    pub status: MarketStatus,
    pub gainers: Vec<MoverRow>,
    pub losers: Vec<MoverRow>,
    pub turnover: Vec<MoverRow>,
    pub indices: Vec<IndexQuote>,
}

/// Combine the headline index with the sector sub-indices into one table.
///
/// The headline entry comes first; entries are unique by index name with
/// the first occurrence winning, so a sub-index list that already repeats
/// the headline name contributes nothing twice.
pub fn merge_indices(headline: IndexQuote, sectors: Vec<IndexQuote>) -> Vec<IndexQuote> {
    let mut merged = Vec::with_capacity(sectors.len() + 1);
    let mut seen: Vec<String> = vec![headline.name.clone()];
    merged.push(headline);
    for quote in sectors {
        if seen.iter().any(|name| name == &quote.name) {
            continue;
        }
        seen.push(quote.name.clone());
        merged.push(quote);
    }
    merged
}

/// De-duplicate the company list by symbol, keeping the first occurrence
/// and the upstream ordering of survivors.
pub fn dedupe_companies(companies: Vec<CompanyRecord>) -> Vec<CompanyRecord> {
    let mut seen: std::collections::HashSet<String> = std::collections::HashSet::new();
    companies
        .into_iter()
        .filter(|company| seen.insert(company.symbol.clone()))
        .collect()
}
