//! Trailing simple moving average of volume.
//!
//! SMA(n)[i] = (V[i-n+1] + ... + V[i]) / n
//! Warmup: first n-1 bars have no value.
//!
//! Computed with a running window sum: each step adds the newest volume and
//! drops the one that left the window.

use crate::domain::bar::Bar;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};

pub fn calculate_volume_sma(bars: &[Bar], period: usize) -> IndicatorSeries {
    let mut values = Vec::with_capacity(bars.len());
    let mut window_sum = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        window_sum += bar.volume;
        if period > 0 && i >= period {
            window_sum -= bars[i - period].volume;
        }

        let value = if period > 0 && i + 1 >= period {
            Some(window_sum / period as f64)
        } else {
            None
        };

        values.push(IndicatorPoint {
            date: bar.date,
            value,
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::VolumeSma(period),
        values,
    }
}
