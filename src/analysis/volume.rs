use anyhow::Result;

use crate::config::VolumeSettings;
use crate::models::report::VolumeProfile;
use crate::models::PriceSeries;
use crate::utils::maths_utils::{get_max, mean, tail};

/// Compare the latest volume to its trailing moving average and scan the
/// recent periods for a spike.
///
/// The moving-average sub-window is a third of the configured window. When
/// the average cannot be computed or is non-positive, the corresponding
/// percentage falls back to 0 instead of erroring out.
pub fn analyze_volume(series: &PriceSeries, settings: &VolumeSettings) -> Result<VolumeProfile> {
    series.ensure_not_empty("volume analysis")?;

    let window = settings.window_days as usize * series.bars_per_day();
    let volumes = tail(&series.volumes, window);
    let ma_window = (window / 3).max(1);

    // Rolling means aligned to the right edge: moving_averages.last() is the
    // average ending at the latest bar.
    let moving_averages: Vec<f64> = if volumes.len() >= ma_window {
        volumes.windows(ma_window).map(mean).collect()
    } else {
        Vec::new()
    };

    let current = volumes[volumes.len() - 1];
    let above_ma_pct = match moving_averages.last() {
        Some(&ma) if ma > 0.0 => 100.0 * (current - ma) / ma,
        _ => 0.0,
    };

    let recent_volumes = tail(volumes, settings.spike_lookback);
    let recent_averages = tail(&moving_averages, settings.spike_lookback);
    let spike_pct = if recent_averages.is_empty() {
        0.0
    } else {
        let baseline = mean(recent_averages);
        if baseline > 0.0 {
            100.0 * (get_max(recent_volumes) - baseline) / baseline
        } else {
            0.0
        }
    };

    Ok(VolumeProfile {
        above_ma_pct,
        spike_pct,
    })
}
