//! Fixed-holding-period trade simulation over a flagged bar series.
//!
//! A single left-to-right pass drives a two-state machine:
//!
//! - `Flat --breakout[i]--> Holding` records the entry at bar `i` and schedules
//!   the exit for bar `i + holding_period`.
//! - `Holding --reached exit_index--> Flat` records the exit on that bar.
//!   The exit bar cannot open a new trade; the next candidate is the bar after.
//! - If the pass ends while `Holding`, the trade is kept with no exit.

use std::num::NonZeroUsize;

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::breakout::FlaggedBar;
use crate::domain::trade::{Trade, TradeExit, TradeLog, return_pct, round_to_cents};

#[derive(Debug, Clone, PartialEq)]
struct OpenTrade {
    sequence: usize,
    entry_date: NaiveDate,
    entry_price: f64,
    exit_index: usize,
}

impl OpenTrade {
    fn close(self, ticker: &str, exit_bar: Option<&FlaggedBar>) -> Trade {
        let exit = exit_bar.map(|fb| {
            let price = round_to_cents(fb.bar.close);
            TradeExit {
                date: fb.bar.date,
                price,
                return_pct: return_pct(self.entry_price, price),
            }
        });

        Trade {
            sequence: self.sequence,
            ticker: ticker.to_string(),
            entry_date: self.entry_date,
            entry_price: self.entry_price,
            exit,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum PositionState {
    Flat,
    Holding(OpenTrade),
}

pub fn simulate_trades(
    bars: &[FlaggedBar],
    ticker: &str,
    holding_period: NonZeroUsize,
) -> TradeLog {
    let mut trades: Vec<Trade> = Vec::new();
    let mut state = PositionState::Flat;

    for (i, fb) in bars.iter().enumerate() {
        state = match state {
            PositionState::Flat if fb.breakout => {
                let open = OpenTrade {
                    sequence: trades.len() + 1,
                    entry_date: fb.bar.date,
                    entry_price: round_to_cents(fb.bar.close),
                    exit_index: i + holding_period.get(),
                };
                debug!(
                    ticker,
                    sequence = open.sequence,
                    entry_date = %open.entry_date,
                    entry_price = open.entry_price,
                    "opened trade"
                );
                PositionState::Holding(open)
            }
            PositionState::Holding(open) if i == open.exit_index => {
                let trade = open.close(ticker, Some(fb));
                debug!(
                    ticker,
                    sequence = trade.sequence,
                    exit_date = %fb.bar.date,
                    return_pct = trade.return_pct(),
                    "closed trade"
                );
                trades.push(trade);
                PositionState::Flat
            }
            other => other,
        };
    }

    if let PositionState::Holding(open) = state {
        debug!(
            ticker,
            sequence = open.sequence,
            exit_index = open.exit_index,
            bars = bars.len(),
            "holding period runs past end of data"
        );
        trades.push(open.close(ticker, None));
    }

    TradeLog::new(trades)
}
