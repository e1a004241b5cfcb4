use anyhow::{Result, bail};
use rand::Rng;
use rand::distributions::Distribution;
use statrs::distribution::Normal;
use statrs::statistics::{Data, OrderStatistics, Statistics};

use crate::config::ForecastSettings;
use crate::models::report::Forecast;
use crate::models::PriceSeries;

/// Simulate forward price paths from historical log-returns and derive the
/// probability of clearing `target` plus bull/base/bear scenario prices.
///
/// The randomness source is injected so callers can seed it: repeated runs on
/// the same input are only statistically similar unless the RNG is.
///
/// An exactly zero sigma (constant closes) short-circuits every path to the
/// starting price, while a merely tiny but nonzero sigma is clamped up to
/// `min_sigma` so the paths keep a usable spread.
pub fn monte_carlo_forecast<R: Rng>(
    series: &PriceSeries,
    target: f64,
    settings: &ForecastSettings,
    rng: &mut R,
) -> Result<Forecast> {
    series.ensure_not_empty("stochastic forecast")?;
    let closes = &series.close_prices;
    if closes.len() < 3 {
        bail!(
            "stochastic forecast for {} needs at least 3 closes to estimate volatility, got {}",
            series.pair_interval.symbol(),
            closes.len()
        );
    }
    if settings.simulations == 0 {
        bail!("stochastic forecast needs a positive simulation count");
    }

    let returns = series.log_returns();
    let mu = returns.iter().mean();
    let sigma_raw = returns.iter().std_dev();
    let start_price = closes[closes.len() - 1];

    let (terminal_prices, daily_volatility) = if sigma_raw == 0.0 {
        (vec![start_price; settings.simulations], 0.0)
    } else {
        let sigma = sigma_raw.max(settings.min_sigma);
        let step = Normal::new(mu, sigma)?;

        let mut terminals = Vec::with_capacity(settings.simulations);
        for _ in 0..settings.simulations {
            let mut price = start_price;
            for _ in 0..settings.horizon_days {
                price *= step.sample(rng).exp();
            }
            terminals.push(price);
        }
        (terminals, sigma)
    };

    let exceeding = terminal_prices.iter().filter(|&&p| p > target).count();
    let target_exceedance_pct = 100.0 * exceeding as f64 / settings.simulations as f64;

    let mut outcomes = Data::new(terminal_prices);
    Ok(Forecast {
        target_exceedance_pct,
        bull: outcomes.percentile(80),
        base: outcomes.percentile(50),
        bear: outcomes.percentile(20),
        daily_volatility,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bar, PairInterval};
    use crate::utils::TimeUtils;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn series_from_closes(closes: &[f64]) -> PriceSeries {
        let bars: Vec<Bar> = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(i as i64 * TimeUtils::MS_IN_H, c, c, c, c, 1.0))
            .collect();
        PriceSeries::from_bars(PairInterval::new("BTC-USD", TimeUtils::MS_IN_H), &bars).unwrap()
    }

    fn settings(simulations: usize) -> ForecastSettings {
        ForecastSettings {
            horizon_days: 30,
            simulations,
            min_sigma: 1e-4,
        }
    }

    #[test]
    fn test_constant_closes_collapse_every_path() {
        // Zero historical variance: sigma is treated as exactly zero, so all
        // 5000 terminal prices equal the start bit-for-bit.
        let series = series_from_closes(&vec![250.0; 100]);
        let mut rng = StdRng::seed_from_u64(7);

        let above = monte_carlo_forecast(&series, 200.0, &settings(5000), &mut rng).unwrap();
        assert_eq!(above.bull, 250.0);
        assert_eq!(above.base, 250.0);
        assert_eq!(above.bear, 250.0);
        assert_eq!(above.daily_volatility, 0.0);
        assert_eq!(above.target_exceedance_pct, 100.0);

        let below = monte_carlo_forecast(&series, 300.0, &settings(5000), &mut rng).unwrap();
        assert_eq!(below.target_exceedance_pct, 0.0);

        // Target equal to the start: exceedance is strict.
        let at = monte_carlo_forecast(&series, 250.0, &settings(5000), &mut rng).unwrap();
        assert_eq!(at.target_exceedance_pct, 0.0);
    }

    #[test]
    fn test_zero_target_is_always_exceeded() {
        let closes: Vec<f64> = (1..=120).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let series = series_from_closes(&closes);
        let mut rng = StdRng::seed_from_u64(42);

        let forecast = monte_carlo_forecast(&series, 0.0, &settings(1000), &mut rng).unwrap();
        assert_eq!(forecast.target_exceedance_pct, 100.0);
    }

    #[test]
    fn test_scenarios_are_ordered() {
        let closes: Vec<f64> = (1..=200)
            .map(|i| 1000.0 * (1.0 + 0.01 * (i as f64 * 0.3).sin()))
            .collect();
        let series = series_from_closes(&closes);
        let mut rng = StdRng::seed_from_u64(1);

        let forecast = monte_carlo_forecast(&series, 1000.0, &settings(2000), &mut rng).unwrap();
        assert!(forecast.bear <= forecast.base);
        assert!(forecast.base <= forecast.bull);
        assert!(forecast.daily_volatility > 0.0);
        assert!((0.0..=100.0).contains(&forecast.target_exceedance_pct));
    }

    #[test]
    fn test_seeded_runs_reproduce() {
        let closes: Vec<f64> = (1..=150)
            .map(|i| 500.0 * (1.0 + 0.02 * (i as f64 * 0.5).cos()))
            .collect();
        let series = series_from_closes(&closes);

        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        let a = monte_carlo_forecast(&series, 500.0, &settings(500), &mut rng_a).unwrap();
        let b = monte_carlo_forecast(&series, 500.0, &settings(500), &mut rng_b).unwrap();

        assert_eq!(a.bull, b.bull);
        assert_eq!(a.base, b.base);
        assert_eq!(a.bear, b.bear);
        assert_eq!(a.target_exceedance_pct, b.target_exceedance_pct);
    }

    #[test]
    fn test_tiny_variance_is_clamped_to_floor() {
        // Returns vary on the order of 1e-7: well under the 1e-4 floor but
        // not a constant series.
        let closes: Vec<f64> = (0..100)
            .map(|i| 1000.0 * (1.0 + 1e-7 * (i as f64).sin()))
            .collect();
        let series = series_from_closes(&closes);
        let mut rng = StdRng::seed_from_u64(3);

        let forecast = monte_carlo_forecast(&series, 0.0, &settings(200), &mut rng).unwrap();
        assert_eq!(forecast.daily_volatility, 1e-4);
    }

    #[test]
    fn test_too_few_closes_rejected() {
        let series = series_from_closes(&[100.0, 101.0]);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(monte_carlo_forecast(&series, 100.0, &settings(100), &mut rng).is_err());
    }
}
