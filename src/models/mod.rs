// Data models for deal analysis
// These modules contain pure business types independent of any front-end

pub mod report;
pub mod timeseries;

// Re-export key types for convenience
pub use report::{
    AnalysisReport, DecisionResult, Divergence, FibonacciLevel, FibonacciLevels, Forecast,
    MomentumReading, SuggestedAction, SupportLevels, VolumeProfile, RETRACEMENT_RATIOS,
};
pub use timeseries::PriceSeries;
