//! Full breakout scan: flag bars, then simulate trades.

use std::num::NonZeroUsize;

use crate::domain::bar::Bar;
use crate::domain::breakout::{BreakoutThresholds, flag_breakouts};
use crate::domain::simulator::simulate_trades;
use crate::domain::trade::TradeLog;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanParams {
    pub thresholds: BreakoutThresholds,
    pub holding_period: NonZeroUsize,
}

/// Bars must be in ascending date order.
pub fn run_scan(bars: &[Bar], ticker: &str, params: &ScanParams) -> TradeLog {
    let flagged = flag_breakouts(bars, &params.thresholds);
    simulate_trades(&flagged, ticker, params.holding_period)
}
