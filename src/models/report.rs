use serde::{Deserialize, Serialize};

use crate::utils::maths_utils::{get_max, get_min};

/// The seven standard retracement ratios, from the window high (0.0) down to
/// the window low (1.0).
pub const RETRACEMENT_RATIOS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct FibonacciLevel {
    pub ratio: f64,
    pub price: f64,
}

impl FibonacciLevel {
    /// Human-facing ratio label, e.g. "61.8%".
    pub fn label(&self) -> String {
        format!("{:.1}%", self.ratio * 100.0)
    }
}

/// Retracement levels derived once per analysis from the lookback window.
///
/// Prices are monotonically non-increasing as the ratio grows: the 0.0% level
/// is the window maximum and the 100.0% level the window minimum.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FibonacciLevels {
    pub levels: Vec<FibonacciLevel>,
}

impl FibonacciLevels {
    pub fn min_support(&self) -> f64 {
        let prices: Vec<f64> = self.levels.iter().map(|l| l.price).collect();
        get_min(&prices)
    }

    pub fn max_resistance(&self) -> f64 {
        let prices: Vec<f64> = self.levels.iter().map(|l| l.price).collect();
        get_max(&prices)
    }

    /// A window whose max equals its min carries no support gradient; the
    /// proximity filter treats this as "no signal" rather than matching both
    /// branches.
    pub fn is_degenerate(&self) -> bool {
        self.min_support() == self.max_resistance()
    }
}

/// Retracement levels plus empirically clustered support prices.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SupportLevels {
    pub fibonacci: FibonacciLevels,
    /// Ascending, deduplicated prices where the low clustered; may be empty.
    pub clusters: Vec<f64>,
}

/// Disagreement between price direction and the oscillator's direction over
/// the trailing comparison windows.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Divergence {
    Positive,
    Negative,
    None,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MomentumReading {
    /// Smoothed relative-strength oscillator, bounded 0-100.
    pub oscillator: f64,
    pub divergence: Divergence,
}

/// Volume against its trailing moving average. Both percentages may be
/// negative; degenerate averages fall back to zero.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VolumeProfile {
    pub above_ma_pct: f64,
    pub spike_pct: f64,
}

/// Scenario outcomes of the stochastic simulation.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Forecast {
    /// Probability (0-100) that a simulated terminal price exceeds the target.
    pub target_exceedance_pct: f64,
    /// 80th percentile of simulated terminal prices.
    pub bull: f64,
    /// 50th percentile, also the fallback "current price" for the scorer.
    pub base: f64,
    /// 20th percentile.
    pub bear: f64,
    /// Estimated daily volatility of log-returns (epsilon-clamped when
    /// near-zero, exactly zero for a constant series).
    pub daily_volatility: f64,
}

/// The immutable aggregate handed from the analyzers to the decision scorer.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AnalysisReport {
    pub support: SupportLevels,
    pub momentum: MomentumReading,
    pub volume: VolumeProfile,
    pub forecast: Forecast,
}

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SuggestedAction {
    Enter,
    Wait,
    Avoid,
}

/// Outcome of scoring one analysis report. Created fresh per evaluation and
/// never mutated afterwards.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DecisionResult {
    pub score: f64,
    pub max_score: f64,
    /// Accumulated in filter-evaluation order (momentum, support, volume,
    /// forecast); the order is part of the contract.
    pub warnings: Vec<String>,
    pub feedback: String,
    pub suggested_action: SuggestedAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_label() {
        let level = FibonacciLevel {
            ratio: 0.618,
            price: 42.0,
        };
        assert_eq!(level.label(), "61.8%");
    }

    #[test]
    fn test_degenerate_levels() {
        let flat = FibonacciLevels {
            levels: RETRACEMENT_RATIOS
                .iter()
                .map(|&ratio| FibonacciLevel { ratio, price: 10.0 })
                .collect(),
        };
        assert!(flat.is_degenerate());
        assert_eq!(flat.min_support(), 10.0);
        assert_eq!(flat.max_resistance(), 10.0);
    }

    #[test]
    fn test_action_display() {
        assert_eq!(SuggestedAction::Enter.to_string(), "enter");
        assert_eq!(SuggestedAction::Wait.to_string(), "wait");
        assert_eq!(SuggestedAction::Avoid.to_string(), "avoid");
        assert_eq!(Divergence::Positive.to_string(), "positive");
    }
}
