//! CSV trade log writer.
//!
//! One row per trade. Prices and returns carry two decimals; a dangling trade
//! leaves its exit columns empty so it cannot be mistaken for a 0% return.

use std::io::Write;
use std::path::Path;

use crate::domain::error::BreakscanError;
use crate::domain::trade::{Trade, TradeLog};
use crate::ports::report_port::ReportPort;

pub const HEADER: [&str; 7] = [
    "Sr. No.",
    "Ticker",
    "Entry Date",
    "Entry Price",
    "Exit Date",
    "Exit Price",
    "Return (%)",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Default, Clone, Copy)]
pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Write the log to any writer; used for files and for stdout.
    pub fn write_to<W: Write>(&self, log: &TradeLog, writer: W) -> Result<(), BreakscanError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(HEADER)?;
        for trade in log {
            wtr.write_record(row(trade))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

fn row(trade: &Trade) -> [String; 7] {
    let money = |v: f64| format!("{:.2}", v);
    [
        trade.sequence.to_string(),
        trade.ticker.clone(),
        trade.entry_date.format(DATE_FORMAT).to_string(),
        money(trade.entry_price),
        trade
            .exit_date()
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default(),
        trade.exit_price().map(money).unwrap_or_default(),
        trade.return_pct().map(money).unwrap_or_default(),
    ]
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, log: &TradeLog, output_path: &Path) -> Result<(), BreakscanError> {
        let file = std::fs::File::create(output_path)?;
        self.write_to(log, file)
    }
}
