//! Simulated round-trip trades and the trade log.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round the exact binary value to 2 decimal places, ties to even.
///
/// `1.115` is stored as `1.11499999...` and rounds down to `1.11`. Values
/// outside the decimal range are returned unchanged.
pub fn round_to_cents(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Percentage return from `entry` to `exit`, rounded to 2 decimal places.
pub fn return_pct(entry_price: f64, exit_price: f64) -> f64 {
    round_to_cents((exit_price - entry_price) / entry_price * 100.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradeExit {
    pub date: NaiveDate,
    pub price: f64,
    pub return_pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub sequence: usize,
    pub ticker: String,
    pub entry_date: NaiveDate,
    pub entry_price: f64,
    /// `None` when the holding period runs past the end of the data.
    pub exit: Option<TradeExit>,
}

impl Trade {
    pub fn is_dangling(&self) -> bool {
        self.exit.is_none()
    }

    pub fn exit_date(&self) -> Option<NaiveDate> {
        self.exit.as_ref().map(|e| e.date)
    }

    pub fn exit_price(&self) -> Option<f64> {
        self.exit.as_ref().map(|e| e.price)
    }

    pub fn return_pct(&self) -> Option<f64> {
        self.exit.as_ref().map(|e| e.return_pct)
    }
}

/// Trades in the order they were opened.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeLog {
    trades: Vec<Trade>,
}

impl TradeLog {
    pub fn new(trades: Vec<Trade>) -> Self {
        Self { trades }
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trade> {
        self.trades.iter()
    }

    pub fn summary(&self) -> TradeSummary {
        TradeSummary::compute(&self.trades)
    }
}

impl<'a> IntoIterator for &'a TradeLog {
    type Item = &'a Trade;
    type IntoIter = std::slice::Iter<'a, Trade>;

    fn into_iter(self) -> Self::IntoIter {
        self.trades.iter()
    }
}

/// Aggregate view of a trade log. Dangling trades count toward `total` only.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
pub struct TradeSummary {
    pub total: usize,
    pub closed: usize,
    pub dangling: usize,
    pub winners: usize,
    pub average_return_pct: Option<f64>,
}

impl TradeSummary {
    pub fn compute(trades: &[Trade]) -> Self {
        let returns: Vec<f64> = trades.iter().filter_map(Trade::return_pct).collect();
        let winners = returns.iter().filter(|&&r| r > 0.0).count();
        let average_return_pct = if returns.is_empty() {
            None
        } else {
            Some(round_to_cents(returns.iter().sum::<f64>() / returns.len() as f64))
        };

        TradeSummary {
            total: trades.len(),
            closed: returns.len(),
            dangling: trades.len() - returns.len(),
            winners,
            average_return_pct,
        }
    }

    /// Winners over closed trades, 0.0 when nothing closed.
    pub fn win_rate(&self) -> f64 {
        if self.closed == 0 {
            0.0
        } else {
            self.winners as f64 / self.closed as f64
        }
    }
}
