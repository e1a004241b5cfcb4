use anyhow::{Result, bail};

use crate::config::MomentumSettings;
use crate::models::report::{Divergence, MomentumReading};
use crate::models::PriceSeries;
use crate::utils::maths_utils::mean;

// The divergence comparison looks at the last 5 periods against the 5 before
// them, so the analyzer needs 10 oscillator values on top of the smoothing
// period.
const TREND_WINDOW: usize = 5;
const MIN_EXTRA_BARS: usize = 2 * TREND_WINDOW;

/// Compute the current relative-strength oscillator and classify divergence
/// between the price trend and the oscillator trend.
///
/// A series shorter than `period + 10` bars is a caller error: the trend
/// comparison would be undefined, so it is rejected instead of silently
/// degraded.
pub fn analyze_momentum(
    series: &PriceSeries,
    settings: &MomentumSettings,
) -> Result<MomentumReading> {
    let closes = &series.close_prices;
    let needed = settings.period + MIN_EXTRA_BARS;
    if closes.len() < needed {
        bail!(
            "momentum analysis for {} needs at least {} bars, got {}",
            series.pair_interval.symbol(),
            needed,
            closes.len()
        );
    }

    let oscillator_series = rsi_series(closes, settings.period);
    let oscillator = *oscillator_series
        .last()
        .expect("length checked above, smoothing always yields values");

    let n = closes.len();
    let m = oscillator_series.len();
    let price_trend =
        mean(&closes[n - TREND_WINDOW..]) - mean(&closes[n - 2 * TREND_WINDOW..n - TREND_WINDOW]);
    let oscillator_trend = mean(&oscillator_series[m - TREND_WINDOW..])
        - mean(&oscillator_series[m - 2 * TREND_WINDOW..m - TREND_WINDOW]);

    Ok(MomentumReading {
        oscillator,
        divergence: classify_divergence(price_trend, oscillator_trend),
    })
}

/// Price falling while the oscillator rises reads as a possible bullish
/// reversal, and vice versa. Flat or agreeing trends carry no signal.
pub fn classify_divergence(price_trend: f64, oscillator_trend: f64) -> Divergence {
    if price_trend < 0.0 && oscillator_trend > 0.0 {
        Divergence::Positive
    } else if price_trend > 0.0 && oscillator_trend < 0.0 {
        Divergence::Negative
    } else {
        Divergence::None
    }
}

/// Wilder-smoothed relative strength, one value per bar from `period` onward.
///
/// The first value averages the first `period` gains/losses, each later value
/// blends the previous averages with the next change at weight `1/period`.
/// Zero average loss pins the oscillator to 100; a fully flat window reads as
/// neutral 50.
fn rsi_series(closes: &[f64], period: usize) -> Vec<f64> {
    let changes: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    let mut avg_gain = changes[..period]
        .iter()
        .filter(|&&c| c > 0.0)
        .sum::<f64>()
        / period as f64;
    let mut avg_loss = changes[..period]
        .iter()
        .filter(|&&c| c < 0.0)
        .map(|c| -c)
        .sum::<f64>()
        / period as f64;

    let mut values = Vec::with_capacity(changes.len() - period + 1);
    values.push(rsi_value(avg_gain, avg_loss));

    for &change in &changes[period..] {
        let (gain, loss) = if change > 0.0 {
            (change, 0.0)
        } else {
            (0.0, -change)
        };
        avg_gain = (avg_gain * (period - 1) as f64 + gain) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + loss) / period as f64;
        values.push(rsi_value(avg_gain, avg_loss));
    }

    values
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_gain == 0.0 && avg_loss == 0.0 {
        return 50.0;
    }
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}
