use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::data::MarketDataSource;
use crate::domain::{Bar, PairInterval};
use crate::models::PriceSeries;
use crate::utils::TimeUtils;

/// Serialized bar dump as produced by the data collaborator.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BarFile {
    pub symbol: String,
    pub interval_ms: i64,
    pub bars: Vec<Bar>,
}

impl BarFile {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file =
            File::open(path).context(format!("Failed to open bar file: {}", path.display()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to deserialize bar file: {}", path.display()))
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }
        let file =
            File::create(path).context(format!("Failed to create file: {}", path.display()))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer(writer, self)
            .context(format!("Failed to serialize bar file to: {}", path.display()))
    }
}

/// File-backed data source for the CLI and tests. The heavy lifting (gap
/// filling, cleaning) is the producer's job; this only checks the key and
/// trims to the requested lookback.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSource { path: path.into() }
    }
}

impl MarketDataSource for JsonFileSource {
    fn fetch_series(
        &self,
        symbol: &str,
        interval_ms: i64,
        lookback_days: u32,
    ) -> Result<PriceSeries> {
        let bar_file = BarFile::load_from_path(&self.path)?;
        if bar_file.symbol != symbol {
            bail!(
                "bar file {} holds {}, requested {}",
                self.path.display(),
                bar_file.symbol,
                symbol
            );
        }
        if bar_file.interval_ms != interval_ms {
            bail!(
                "bar file {} holds {} bars, requested {}",
                self.path.display(),
                TimeUtils::interval_to_string(bar_file.interval_ms),
                TimeUtils::interval_to_string(interval_ms)
            );
        }

        let bars_per_day = (TimeUtils::MS_IN_D / interval_ms).max(1) as usize;
        let wanted = lookback_days as usize * bars_per_day;
        if bar_file.bars.len() < wanted {
            log::warn!(
                "bar file {} covers {} bars, fewer than the {} requested; analyzers will clamp",
                self.path.display(),
                bar_file.bars.len(),
                wanted
            );
        }
        let start = bar_file.bars.len().saturating_sub(wanted);

        PriceSeries::from_bars(
            PairInterval::new(symbol, interval_ms),
            &bar_file.bars[start..],
        )
    }
}
