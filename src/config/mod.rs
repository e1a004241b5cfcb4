//! Configuration module for the deal analysis pipeline.

pub mod analysis;

// Re-export commonly used items
pub use analysis::{
    ANALYSIS, AnalysisConfig, ForecastSettings, MomentumSettings, SupportSettings, VolumeSettings,
};
