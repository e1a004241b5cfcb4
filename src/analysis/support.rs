use anyhow::Result;
use itertools::Itertools;

use crate::config::SupportSettings;
use crate::models::report::{
    FibonacciLevel, FibonacciLevels, SupportLevels, RETRACEMENT_RATIOS,
};
use crate::models::PriceSeries;
use crate::utils::maths_utils::{get_max, get_min, round_to_step, tail};

/// Derive retracement levels and clustered support prices from the series.
///
/// A window shorter than configured is clamped to the data that exists: the
/// retracement range then degenerates towards max == min and the cluster list
/// towards empty, but neither is an error. Only an empty series is rejected.
pub fn analyze_support(series: &PriceSeries, settings: &SupportSettings) -> Result<SupportLevels> {
    series.ensure_not_empty("support analysis")?;

    let bars_per_day = series.bars_per_day();

    let lookback = (settings.lookback_days as usize * bars_per_day).max(1);
    let closes = tail(&series.close_prices, lookback);
    let fibonacci = fibonacci_retracement(closes);

    let cluster_window = settings.cluster_window_days as usize * bars_per_day;
    let lows = tail(&series.low_prices, cluster_window);
    let clusters = find_support_clusters(
        lows,
        settings.min_touches,
        settings.tolerance,
        settings.cluster_rounding,
    );

    Ok(SupportLevels { fibonacci, clusters })
}

/// The seven standard levels, linearly interpolated between the window max
/// and min of the closes. The endpoints are pinned to the exact max/min so
/// the 0.0%/100.0% invariant holds bit-for-bit.
fn fibonacci_retracement(closes: &[f64]) -> FibonacciLevels {
    let max_price = get_max(closes);
    let min_price = get_min(closes);
    let diff = max_price - min_price;

    let levels = RETRACEMENT_RATIOS
        .iter()
        .map(|&ratio| {
            let price = if ratio == 0.0 {
                max_price
            } else if ratio == 1.0 {
                min_price
            } else {
                max_price - ratio * diff
            };
            FibonacciLevel { ratio, price }
        })
        .collect();

    FibonacciLevels { levels }
}

/// Count, for every low, how many other lows sit within `tolerance` of it;
/// keep the ones touched at least `min_touches` times, rounded to the coarse
/// granularity, deduplicated and sorted ascending.
fn find_support_clusters(
    lows: &[f64],
    min_touches: usize,
    tolerance: f64,
    rounding: f64,
) -> Vec<f64> {
    let mut clusters: Vec<f64> = Vec::new();
    for &price in lows {
        let touches = lows
            .iter()
            .filter(|&&low| (low - price).abs() < price * tolerance)
            .count();
        if touches >= min_touches {
            clusters.push(round_to_step(price, rounding));
        }
    }

    clusters
        .into_iter()
        .sorted_by(|a, b| a.total_cmp(b))
        .dedup()
        .collect()
}
