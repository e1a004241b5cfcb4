use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::domain::{Bar, PairInterval};
use crate::utils::TimeUtils;

/// Column-oriented OHLCV storage for one symbol/interval.
///
/// The series is the unit consumed by every analyzer: chronological, gap-free
/// and immutable once produced by the data source. Columns are kept parallel
/// so indicator code can borrow a single column as a slice.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PriceSeries {
    pub pair_interval: PairInterval,
    pub first_bar_timestamp_ms: i64,

    pub open_prices: Vec<f64>,
    pub high_prices: Vec<f64>,
    pub low_prices: Vec<f64>,
    pub close_prices: Vec<f64>,
    pub volumes: Vec<f64>,
}

impl PriceSeries {
    /// Build a series from row-oriented bars, validating chronological order.
    pub fn from_bars(pair_interval: PairInterval, bars: &[Bar]) -> Result<Self> {
        if bars.is_empty() {
            bail!("price series for {} is empty", pair_interval.symbol());
        }
        for pair in bars.windows(2) {
            if pair[1].timestamp_ms <= pair[0].timestamp_ms {
                bail!(
                    "price series for {} is not strictly chronological at timestamp {}",
                    pair_interval.symbol(),
                    pair[1].timestamp_ms
                );
            }
        }

        Ok(PriceSeries {
            first_bar_timestamp_ms: bars[0].timestamp_ms,
            open_prices: bars.iter().map(|b| b.open).collect(),
            high_prices: bars.iter().map(|b| b.high).collect(),
            low_prices: bars.iter().map(|b| b.low).collect(),
            close_prices: bars.iter().map(|b| b.close).collect(),
            volumes: bars.iter().map(|b| b.volume).collect(),
            pair_interval,
        })
    }

    pub fn len(&self) -> usize {
        self.close_prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close_prices.is_empty()
    }

    /// Materialize one bar. Timestamps are derived from the first bar and the
    /// interval width, so the columns never carry them.
    pub fn bar(&self, idx: usize) -> Bar {
        Bar::new(
            self.first_bar_timestamp_ms + idx as i64 * self.pair_interval.interval_ms,
            self.open_prices[idx],
            self.high_prices[idx],
            self.low_prices[idx],
            self.close_prices[idx],
            self.volumes[idx],
        )
    }

    pub fn last_bar_timestamp_ms(&self) -> i64 {
        self.first_bar_timestamp_ms
            + ((self.len().saturating_sub(1)) as i64) * self.pair_interval.interval_ms
    }

    pub fn last_close(&self) -> Option<f64> {
        self.close_prices.last().copied()
    }

    /// How many bars make up one calendar day at this interval, never zero.
    pub fn bars_per_day(&self) -> usize {
        (TimeUtils::MS_IN_D / self.pair_interval.interval_ms).max(1) as usize
    }

    /// Log-returns of consecutive closes; one element shorter than the series.
    pub fn log_returns(&self) -> Vec<f64> {
        self.close_prices
            .windows(2)
            .map(|w| (w[1] / w[0]).ln())
            .collect()
    }

    /// An empty series is a fatal input error for every analyzer, as opposed
    /// to a short window which degrades gracefully.
    pub fn ensure_not_empty(&self, caller: &str) -> Result<()> {
        if self.is_empty() {
            bail!(
                "{}: price series for {} is empty",
                caller,
                self.pair_interval.symbol()
            );
        }
        Ok(())
    }
}
