use crate::models::report::{
    AnalysisReport, DecisionResult, Divergence, Forecast, MomentumReading, SuggestedAction,
    VolumeProfile,
};

/// One point per filter; the momentum filter can add a fractional bonus on
/// top of its point, and the published total is clamped to this bound.
pub const MAX_SCORE: f64 = 4.0;

// Thresholds of the individual filters.
const OVERBOUGHT: f64 = 70.0;
const OVERSOLD: f64 = 30.0;
const SUPPORT_PROXIMITY: f64 = 1.02;
const RESISTANCE_PROXIMITY: f64 = 0.98;
const VOLUME_CONFIRMATION_PCT: f64 = 10.0;
const VOLUME_SPIKE_PCT: f64 = 20.0;
const PROBABILITY_HIGH_PCT: f64 = 60.0;
const PROBABILITY_LOW_PCT: f64 = 30.0;

/// Run the four scoring filters over a report and derive the suggested
/// action.
///
/// `current_price` is the externally observed market price; when absent the
/// forecast base case stands in for it. Filters run in a fixed order
/// (momentum, support, volume, forecast) and warnings keep that order, which
/// matters for reproducible output.
pub fn score_report(report: &AnalysisReport, current_price: Option<f64>) -> DecisionResult {
    let mut warnings = Vec::new();
    let mut score = 0.0;

    score += momentum_filter(&report.momentum, &mut warnings);
    score += support_filter(report, current_price, &mut warnings);
    score += volume_filter(&report.volume, &mut warnings);
    score += forecast_filter(&report.forecast, &mut warnings);

    // The oversold bonus can push the raw sum past the four filter points;
    // the published score stays bounded by max_score.
    score = score.min(MAX_SCORE);

    let percent = 100.0 * score / MAX_SCORE;
    let (suggested_action, feedback) = suggestion(percent);

    DecisionResult {
        score,
        max_score: MAX_SCORE,
        warnings,
        feedback,
        suggested_action,
    }
}

/// Map the normalized score onto the three-way decision. Boundaries are
/// inclusive: exactly 75% still enters, exactly 50% still waits.
pub fn suggestion(percent: f64) -> (SuggestedAction, String) {
    if percent >= 75.0 {
        (
            SuggestedAction::Enter,
            "Favorable technical conditions: entering the market can be considered.".to_string(),
        )
    } else if percent >= 50.0 {
        (
            SuggestedAction::Wait,
            "Mixed technical conditions: proceed with caution, it may pay to wait for confirmation."
                .to_string(),
        )
    } else {
        (
            SuggestedAction::Avoid,
            "Unfavorable technical conditions: better to avoid entering now.".to_string(),
        )
    }
}

fn momentum_filter(momentum: &MomentumReading, warnings: &mut Vec<String>) -> f64 {
    let mut score = 0.0;
    match momentum.divergence {
        Divergence::None => score += 1.0,
        Divergence::Positive => {
            score += 1.0;
            warnings.push("Positive momentum divergence: possible bullish reversal.".to_string());
        }
        Divergence::Negative => {
            warnings.push("Negative momentum divergence: possible bearish reversal.".to_string());
        }
    }

    // Overbought only warns; oversold warns and adds a half point for the
    // rebound setup.
    if momentum.oscillator > OVERBOUGHT {
        warnings.push(format!(
            "Oscillator very high ({:.2}): overbought risk.",
            momentum.oscillator
        ));
    } else if momentum.oscillator < OVERSOLD {
        warnings.push(format!(
            "Oscillator very low ({:.2}): possible technical rebound.",
            momentum.oscillator
        ));
        score += 0.5;
    }

    score
}

fn support_filter(
    report: &AnalysisReport,
    current_price: Option<f64>,
    warnings: &mut Vec<String>,
) -> f64 {
    let fibonacci = &report.support.fibonacci;
    // A collapsed retracement range discriminates nothing: skip both
    // branches instead of matching them simultaneously.
    if fibonacci.is_degenerate() {
        return 0.0;
    }

    let price = current_price.unwrap_or(report.forecast.base);
    let min_support = fibonacci.min_support();
    let max_resistance = fibonacci.max_resistance();

    if price <= min_support * SUPPORT_PROXIMITY {
        warnings.push("Price near a key support: limited drawdown risk.".to_string());
        1.0
    } else if price >= max_resistance * RESISTANCE_PROXIMITY {
        warnings.push("Price near a major resistance: watch out for pullbacks.".to_string());
        0.0
    } else {
        0.0
    }
}

fn volume_filter(volume: &VolumeProfile, warnings: &mut Vec<String>) -> f64 {
    let mut score = 0.0;
    if volume.above_ma_pct > VOLUME_CONFIRMATION_PCT {
        score += 1.0;
        warnings.push("Volume above its average: confirms market interest.".to_string());
    } else if volume.above_ma_pct < -VOLUME_CONFIRMATION_PCT {
        warnings.push("Volume below its average: beware of weak signals.".to_string());
    }

    if volume.spike_pct > VOLUME_SPIKE_PCT {
        warnings.push(
            "Recent volume spike: possible accumulation or distribution phase.".to_string(),
        );
    }

    score
}

fn forecast_filter(forecast: &Forecast, warnings: &mut Vec<String>) -> f64 {
    let probability = forecast.target_exceedance_pct;
    if probability > PROBABILITY_HIGH_PCT {
        warnings.push(format!(
            "High simulated probability of clearing the target: {:.1}%.",
            probability
        ));
        1.0
    } else if probability < PROBABILITY_LOW_PCT {
        warnings.push(format!(
            "Low simulated probability of clearing the target: {:.1}%.",
            probability
        ));
        0.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::{
        FibonacciLevel, FibonacciLevels, SupportLevels, RETRACEMENT_RATIOS,
    };

    fn fibonacci_between(min: f64, max: f64) -> FibonacciLevels {
        let diff = max - min;
        FibonacciLevels {
            levels: RETRACEMENT_RATIOS
                .iter()
                .map(|&ratio| FibonacciLevel {
                    ratio,
                    price: max - ratio * diff,
                })
                .collect(),
        }
    }

    fn neutral_report() -> AnalysisReport {
        AnalysisReport {
            support: SupportLevels {
                fibonacci: fibonacci_between(1000.0, 2000.0),
                clusters: vec![],
            },
            momentum: MomentumReading {
                oscillator: 50.0,
                divergence: Divergence::None,
            },
            volume: VolumeProfile {
                above_ma_pct: 0.0,
                spike_pct: 0.0,
            },
            forecast: Forecast {
                target_exceedance_pct: 45.0,
                bull: 1600.0,
                base: 1500.0,
                bear: 1400.0,
                daily_volatility: 0.02,
            },
        }
    }

    #[test]
    fn test_score_stays_bounded() {
        // Everything favorable at once: momentum point + oversold bonus,
        // support, volume and forecast points.
        let mut report = neutral_report();
        report.momentum.oscillator = 25.0;
        report.volume.above_ma_pct = 15.0;
        report.forecast.target_exceedance_pct = 80.0;

        let result = score_report(&report, Some(1000.0));
        assert_eq!(result.max_score, 4.0);
        // Raw contributions add up to 4.5; the published score is clamped.
        assert_eq!(result.score, 4.0);
        assert_eq!(result.suggested_action, SuggestedAction::Enter);
    }

    #[test]
    fn test_action_thresholds_are_inclusive() {
        assert_eq!(suggestion(75.0).0, SuggestedAction::Enter);
        assert_eq!(suggestion(74.9).0, SuggestedAction::Wait);
        assert_eq!(suggestion(50.0).0, SuggestedAction::Wait);
        assert_eq!(suggestion(49.9).0, SuggestedAction::Avoid);
        assert_eq!(suggestion(0.0).0, SuggestedAction::Avoid);
    }

    #[test]
    fn test_volume_confirmation_adds_one_point_and_one_warning() {
        let mut warnings = Vec::new();
        let profile = VolumeProfile {
            above_ma_pct: 15.0,
            spike_pct: 0.0,
        };
        assert_eq!(volume_filter(&profile, &mut warnings), 1.0);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("above its average"));
    }

    #[test]
    fn test_weak_volume_warns_without_scoring() {
        let mut warnings = Vec::new();
        let profile = VolumeProfile {
            above_ma_pct: -15.0,
            spike_pct: 0.0,
        };
        assert_eq!(volume_filter(&profile, &mut warnings), 0.0);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("below its average"));
    }

    #[test]
    fn test_spike_warning_is_independent_of_the_average() {
        let mut warnings = Vec::new();
        let profile = VolumeProfile {
            above_ma_pct: 0.0,
            spike_pct: 35.0,
        };
        assert_eq!(volume_filter(&profile, &mut warnings), 0.0);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("spike"));
    }

    #[test]
    fn test_missing_current_price_falls_back_to_base_case() {
        // Base case 1500 sits mid-range: no proximity signal either way.
        let report = neutral_report();
        let mid = score_report(&report, None);
        assert!(mid.warnings.is_empty());

        // An explicit price at the low end flips the support branch on.
        let low = score_report(&report, Some(1010.0));
        assert_eq!(low.score - mid.score, 1.0);
        assert!(low.warnings[0].contains("key support"));
    }

    #[test]
    fn test_resistance_warns_without_scoring() {
        let report = neutral_report();
        let result = score_report(&report, Some(1990.0));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("resistance"));
        // Only the momentum filter scored.
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_degenerate_range_yields_no_proximity_signal() {
        let mut report = neutral_report();
        report.support.fibonacci = fibonacci_between(1500.0, 1500.0);
        // A price this low would otherwise match the support branch.
        let result = score_report(&report, Some(1.0));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_oversold_bonus_and_divergence_interplay() {
        let mut report = neutral_report();
        report.momentum.oscillator = 25.0;
        report.momentum.divergence = Divergence::Negative;

        let result = score_report(&report, None);
        // Negative divergence scores nothing, oversold still adds its half.
        assert_eq!(result.score, 0.5);
        assert_eq!(result.warnings.len(), 2);
        assert!(result.warnings[0].contains("bearish reversal"));
        assert!(result.warnings[1].contains("technical rebound"));
    }

    #[test]
    fn test_warning_order_follows_filter_order() {
        let mut report = neutral_report();
        report.momentum.divergence = Divergence::Positive;
        report.volume.above_ma_pct = 20.0;
        report.forecast.target_exceedance_pct = 75.0;

        let result = score_report(&report, Some(1010.0));
        assert_eq!(result.warnings.len(), 4);
        assert!(result.warnings[0].contains("bullish reversal"));
        assert!(result.warnings[1].contains("key support"));
        assert!(result.warnings[2].contains("market interest"));
        assert!(result.warnings[3].contains("High simulated probability"));
        // 4 of 4 points: well past the entry threshold.
        assert_eq!(result.score, 4.0);
        assert_eq!(result.suggested_action, SuggestedAction::Enter);
    }
}
