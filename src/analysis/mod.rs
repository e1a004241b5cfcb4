// Analysis algorithms and decision scoring
pub mod forecast;
pub mod momentum;
pub mod scoring;
pub mod support;
pub mod volume;

// Re-export commonly used entry points
pub use forecast::monte_carlo_forecast;
pub use momentum::analyze_momentum;
pub use scoring::{MAX_SCORE, score_report, suggestion};
pub use support::analyze_support;
pub use volume::analyze_volume;

use anyhow::Result;
use rand::Rng;

use crate::config::AnalysisConfig;
use crate::models::report::AnalysisReport;
use crate::models::PriceSeries;

/// Run the four analyzers over one immutable series and package their
/// outputs into a report.
///
/// The analyzers have no data dependency on each other, so they fan out on
/// the rayon pool; the nested joins are the synchronization barrier. Only
/// the forecaster draws from the injected randomness source. Any analyzer
/// error fails the whole invocation: a partially filled report is never
/// returned.
pub fn run_analysis<R: Rng + Send>(
    series: &PriceSeries,
    target: f64,
    config: &AnalysisConfig,
    rng: &mut R,
) -> Result<AnalysisReport> {
    series.ensure_not_empty("analysis")?;

    let ((support, momentum), (volume, forecast)) = rayon::join(
        || {
            rayon::join(
                || analyze_support(series, &config.support),
                || analyze_momentum(series, &config.momentum),
            )
        },
        || {
            rayon::join(
                || analyze_volume(series, &config.volume),
                || monte_carlo_forecast(series, target, &config.forecast, rng),
            )
        },
    );

    Ok(AnalysisReport {
        support: support?,
        momentum: momentum?,
        volume: volume?,
        forecast: forecast?,
    })
}
