#![allow(dead_code)]

use breakscan::domain::bar::Bar;
use breakscan::domain::error::BreakscanError;
use breakscan::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::process::ExitCode;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<Bar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<Bar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Bar>, BreakscanError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(BreakscanError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(ticker)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start_date && b.date <= end_date)
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn list_symbols(&self) -> Result<Vec<String>, BreakscanError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, BreakscanError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(BreakscanError::DataSource {
                reason: reason.clone(),
            });
        }
        match self.data.get(ticker) {
            Some(bars) if !bars.is_empty() => {
                let min = bars.iter().map(|b| b.date).min().unwrap();
                let max = bars.iter().map(|b| b.date).max().unwrap();
                Ok(Some((min, max, bars.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub const SERIES_START: &str = "2024-01-01";

/// Consecutive daily bars at close 100 and volume 1000.
pub fn flat_bars(count: usize) -> Vec<Bar> {
    let start = NaiveDate::parse_from_str(SERIES_START, "%Y-%m-%d").unwrap();
    (0..count)
        .map(|i| Bar::flat(start + chrono::Duration::days(i as i64), 100.0, 1_000.0))
        .collect()
}

/// Flat series with a breakout bar at `index`: close 110, volume 5000.
pub fn bars_with_spike(count: usize, index: usize) -> Vec<Bar> {
    let mut bars = flat_bars(count);
    bars[index].close = 110.0;
    bars[index].volume = 5_000.0;
    bars
}

/// Spike at 24, closes settle at 110 then 115 from index 29 on.
pub fn worked_example_bars() -> Vec<Bar> {
    let mut bars = bars_with_spike(40, 24);
    for bar in bars.iter_mut().skip(25) {
        bar.close = 110.0;
    }
    for bar in bars.iter_mut().skip(29) {
        bar.close = 115.0;
    }
    bars
}

pub fn is_success(code: ExitCode) -> bool {
    format!("{:?}", code) == format!("{:?}", ExitCode::SUCCESS)
}
