//! Breakout flagging: augments each bar with its rolling volume average,
//! day-over-day change and the volume/price breakout flags.

use crate::domain::bar::Bar;
use crate::domain::indicator::price_change::calculate_price_change;
use crate::domain::indicator::volume_sma::calculate_volume_sma;

/// Trailing window for the average-volume baseline.
pub const VOLUME_AVERAGE_WINDOW: usize = 20;

/// Thresholds a bar has to clear to count as a breakout.
///
/// Both are percentages: `volume_threshold_pct = 200.0` means "more than
/// double the 20-bar average", `price_change_threshold_pct = 5.0` means "closed
/// at least 5% above the previous close". No range checks happen here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakoutThresholds {
    pub volume_threshold_pct: f64,
    pub price_change_threshold_pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlaggedBar {
    pub bar: Bar,
    pub avg_volume_20: Option<f64>,
    pub price_change_pct: Option<f64>,
    pub volume_breakout: bool,
    pub price_breakout: bool,
    pub breakout: bool,
}

pub fn flag_breakouts(bars: &[Bar], thresholds: &BreakoutThresholds) -> Vec<FlaggedBar> {
    let avg_volume = calculate_volume_sma(bars, VOLUME_AVERAGE_WINDOW);
    let price_change = calculate_price_change(bars);
    let volume_multiple = thresholds.volume_threshold_pct / 100.0;

    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let avg_volume_20 = avg_volume.value_at(i);
            let price_change_pct = price_change.value_at(i);

            let volume_breakout = avg_volume_20.is_some_and(|avg| bar.volume > volume_multiple * avg);
            let price_breakout =
                price_change_pct.is_some_and(|chg| chg >= thresholds.price_change_threshold_pct);

            FlaggedBar {
                bar: *bar,
                avg_volume_20,
                price_change_pct,
                volume_breakout,
                price_breakout,
                breakout: volume_breakout && price_breakout,
            }
        })
        .collect()
}
