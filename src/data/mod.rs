// Data-source boundary: the analysis core consumes an already cleaned,
// chronologically ordered series and never fetches, retries or caches by
// itself.
pub mod json_source;

// Re-export commonly used types
pub use json_source::{BarFile, JsonFileSource};

use anyhow::Result;

use crate::models::PriceSeries;

/// Supplier of OHLCV series, keyed by symbol, interval and lookback window.
///
/// A fetch failure is fatal to the analysis invocation that asked for it;
/// retry policy, if any, belongs to the calling layer.
pub trait MarketDataSource {
    fn fetch_series(
        &self,
        symbol: &str,
        interval_ms: i64,
        lookback_days: u32,
    ) -> Result<PriceSeries>;
}
