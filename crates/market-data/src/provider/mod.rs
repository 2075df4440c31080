//! Provider abstraction for exchange data.

pub mod nepse;

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{CompanyRecord, MarketSnapshot};

/// Upstream source of normalized exchange data.
///
/// The production implementation is [`nepse::NepseClient`]; tests swap in
/// mocks. Implementations perform exactly one upstream round trip per
/// snapshot leg and never retry internally.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch a complete market overview: status, movers, and the merged
    /// indices table.
    async fn market_snapshot(&self) -> Result<MarketSnapshot, MarketDataError>;

    /// Fetch all listed companies, unique by symbol.
    async fn company_list(&self) -> Result<Vec<CompanyRecord>, MarketDataError>;

    /// Fetch the raw security detail payload for one symbol. The payload
    /// shape is upstream-defined and passed through opaquely.
    async fn company_details(
        &self,
        symbol: &str,
    ) -> Result<serde_json::Value, MarketDataError>;
}
