// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod deal;
pub mod domain;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use analysis::{monte_carlo_forecast, run_analysis, score_report};
pub use data::{BarFile, JsonFileSource, MarketDataSource};
pub use deal::{DealParameters, NetGainResult, evaluate_deal};
pub use domain::{Bar, PairInterval};
pub use models::{AnalysisReport, DecisionResult, Forecast, PriceSeries, SuggestedAction};
pub use utils::TimeUtils;

// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Investment amount, in quote currency
    #[arg(long)]
    pub amount: f64,

    /// Annual rate in percent (e.g. 57 for 57%)
    #[arg(long)]
    pub rate: f64,

    /// Term of the deal in days
    #[arg(long)]
    pub term_days: u32,

    /// Negotiated deal price, also used as the forecast target
    #[arg(long)]
    pub deal_price: f64,

    /// Asset symbol, e.g. BTC-USD
    #[arg(long)]
    pub symbol: String,

    /// Path to the JSON bar file produced by the data collaborator
    #[arg(long, default_value = "bars.json")]
    pub bars: PathBuf,

    /// Candle interval in milliseconds
    #[arg(long, default_value_t = TimeUtils::MS_IN_H)]
    pub interval_ms: i64,

    /// Seed for the forecast randomness source; omit for OS entropy
    #[arg(long)]
    pub seed: Option<u64>,

    /// Observed market price; falls back to the forecast base case
    #[arg(long)]
    pub current_price: Option<f64>,
}
