//! Analysis and computation configuration

/// Settings for the support-level analyzer
pub struct SupportSettings {
    // Lookback for the retracement window (calendar days, converted to bars
    // via the series interval)
    pub lookback_days: u32,
    // Window scanned for clustered lows (calendar days)
    pub cluster_window_days: u32,
    // Minimum number of lows within tolerance for a price to count as support
    pub min_touches: usize,
    // Fractional price proximity for two lows to belong to the same cluster
    pub tolerance: f64,
    // Coarse granularity retained cluster prices are rounded to
    pub cluster_rounding: f64,
}

/// Settings for the momentum analyzer
pub struct MomentumSettings {
    // Smoothing period of the relative-strength oscillator
    pub period: usize,
}

/// Settings for the volume analyzer
pub struct VolumeSettings {
    // Trailing window the volume average is computed over (calendar days);
    // the moving-average sub-window is a third of it
    pub window_days: u32,
    // How many recent periods are scanned for a volume spike
    pub spike_lookback: usize,
}

/// Settings for the stochastic forecaster
pub struct ForecastSettings {
    // Forward horizon of each simulated path (steps)
    pub horizon_days: u32,
    // Number of independent paths
    pub simulations: usize,
    // Numerical floor for the estimated volatility; an exactly-zero sigma is
    // treated as the deliberate constant-series case instead
    pub min_sigma: f64,
}

/// The master analysis configuration
pub struct AnalysisConfig {
    pub support: SupportSettings,
    pub momentum: MomentumSettings,
    pub volume: VolumeSettings,
    pub forecast: ForecastSettings,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    support: SupportSettings {
        lookback_days: 60,
        cluster_window_days: 30,
        min_touches: 3,
        tolerance: 0.002,
        cluster_rounding: 100.0,
    },
    momentum: MomentumSettings { period: 14 },
    volume: VolumeSettings {
        window_days: 30,
        spike_lookback: 10,
    },
    forecast: ForecastSettings {
        horizon_days: 30,
        simulations: 1000,
        min_sigma: 1e-4,
    },
};
