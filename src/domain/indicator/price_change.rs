//! Day-over-day percentage close change.
//!
//! CHG[i] = ((C[i] - C[i-1]) / C[i-1]) * 100
//! First bar has no value. A zero previous close also has no value.

use crate::domain::bar::Bar;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};

pub fn calculate_price_change(bars: &[Bar]) -> IndicatorSeries {
    let mut values = Vec::with_capacity(bars.len());

    for (i, bar) in bars.iter().enumerate() {
        let value = if i == 0 {
            None
        } else {
            let prev_close = bars[i - 1].close;
            if prev_close == 0.0 {
                None
            } else {
                Some((bar.close - prev_close) / prev_close * 100.0)
            }
        };

        values.push(IndicatorPoint {
            date: bar.date,
            value,
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::PriceChangePct,
        values,
    }
}
