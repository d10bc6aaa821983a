//! Data-sufficiency check run between fetching bars and scanning them.

use tracing::warn;

use crate::domain::bar::Bar;
use crate::domain::breakout::VOLUME_AVERAGE_WINDOW;
use crate::domain::error::BreakscanError;

/// Fewer bars than this can never produce a breakout.
pub const MIN_BARS: usize = VOLUME_AVERAGE_WINDOW;

pub fn ensure_sufficient_data(ticker: &str, bars: &[Bar]) -> Result<(), BreakscanError> {
    if bars.is_empty() {
        warn!(ticker, "no data returned");
        return Err(BreakscanError::NoData {
            ticker: ticker.to_string(),
        });
    }

    if bars.len() < MIN_BARS {
        warn!(ticker, bars = bars.len(), minimum = MIN_BARS, "insufficient data");
        return Err(BreakscanError::InsufficientData {
            ticker: ticker.to_string(),
            bars: bars.len(),
            minimum: MIN_BARS,
        });
    }

    Ok(())
}
