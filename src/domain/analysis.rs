//! Request-to-trade-log pipeline shared by the CLI and the web adapter.

use tracing::{info, warn};

use crate::domain::bar::{Bar, is_chronological};
use crate::domain::error::BreakscanError;
use crate::domain::request::ScanRequest;
use crate::domain::scan::run_scan;
use crate::domain::sufficiency::ensure_sufficient_data;
use crate::domain::trade::TradeLog;
use crate::ports::data_port::DataPort;

#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub bars_scanned: usize,
    pub log: TradeLog,
}

pub fn analyze(
    data_port: &dyn DataPort,
    request: &ScanRequest,
) -> Result<AnalysisOutcome, BreakscanError> {
    info!(
        ticker = %request.ticker,
        start = %request.start_date,
        end = %request.end_date,
        "fetching bars"
    );
    let mut bars = data_port.fetch_bars(&request.ticker, request.start_date, request.end_date)?;
    normalize_order(&request.ticker, &mut bars);

    ensure_sufficient_data(&request.ticker, &bars)?;

    let log = run_scan(&bars, &request.ticker, &request.params);
    info!(
        ticker = %request.ticker,
        bars = bars.len(),
        trades = log.len(),
        "scan complete"
    );

    Ok(AnalysisOutcome {
        bars_scanned: bars.len(),
        log,
    })
}

/// Sorts by date and drops repeated dates, keeping the first bar of each.
fn normalize_order(ticker: &str, bars: &mut Vec<Bar>) {
    if is_chronological(bars) {
        return;
    }
    let before = bars.len();
    bars.sort_by_key(|b| b.date);
    bars.dedup_by_key(|b| b.date);
    warn!(
        ticker,
        dropped = before - bars.len(),
        "bars were not in strictly ascending date order; reordered"
    );
}
