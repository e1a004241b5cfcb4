use serde::{Deserialize, Serialize};

use crate::utils::TimeUtils;

/// Symbol plus candle interval, the key a price series is fetched by.
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
pub struct PairInterval {
    pub symbol: String,
    pub interval_ms: i64,
}

impl PairInterval {
    pub fn new(symbol: impl Into<String>, interval_ms: i64) -> Self {
        PairInterval {
            symbol: symbol.into(),
            interval_ms,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    // Split a "BASE-QUOTE" symbol (e.g. "BTC-USD") into its parts.
    // Returns None for symbols that don't follow that shape.
    pub fn base_and_quote(&self) -> Option<(&str, &str)> {
        self.symbol.split_once('-')
    }
}

impl std::fmt::Display for PairInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} @ {}",
            self.symbol,
            TimeUtils::interval_to_string(self.interval_ms)
        )
    }
}
