//! CSV directory data adapter.
//!
//! One file per ticker, `<TICKER>.csv`, with a header row. Columns are located
//! by name (case-insensitive): `date`, `close` and `volume` are required;
//! `open`, `high` and `low` fall back to the close when absent. Extra columns
//! such as `Adj Close` are ignored.

use crate::domain::bar::Bar;
use crate::domain::error::BreakscanError;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use csv::StringRecord;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

struct Columns {
    date: usize,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    close: usize,
    volume: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord, path: &str) -> Result<Self, BreakscanError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| BreakscanError::DataSource {
                reason: format!("{}: missing {} column", path, name),
            })
        };

        Ok(Columns {
            date: require("date")?,
            open: find("open"),
            high: find("high"),
            low: find("low"),
            close: require("close")?,
            volume: require("volume")?,
        })
    }
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }

    fn read_all(&self, ticker: &str) -> Result<Vec<Bar>, BreakscanError> {
        let path = self.csv_path(ticker);
        let display = path.display().to_string();
        let content = fs::read_to_string(&path).map_err(|e| BreakscanError::DataSource {
            reason: format!("failed to read {}: {}", display, e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr.headers().map_err(|e| BreakscanError::DataSource {
            reason: format!("CSV parse error in {}: {}", display, e),
        })?;
        let cols = Columns::from_headers(headers, &display)?;

        let mut bars = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| BreakscanError::DataSource {
                reason: format!("CSV parse error in {}: {}", display, e),
            })?;

            let date_str = field(&record, cols.date, "date")?;
            // Accept both plain dates and timestamp-suffixed exports.
            let date_part = date_str.get(..10).unwrap_or(date_str);
            let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|e| {
                BreakscanError::DataSource {
                    reason: format!("invalid date '{}': {}", date_str, e),
                }
            })?;

            let close = number(&record, cols.close, "close")?;
            let optional = |idx: Option<usize>, name: &str| match idx {
                Some(i) => number(&record, i, name),
                None => Ok(close),
            };

            bars.push(Bar {
                date,
                open: optional(cols.open, "open")?,
                high: optional(cols.high, "high")?,
                low: optional(cols.low, "low")?,
                close,
                volume: number(&record, cols.volume, "volume")?,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

fn field<'r>(record: &'r StringRecord, idx: usize, name: &str) -> Result<&'r str, BreakscanError> {
    record
        .get(idx)
        .map(str::trim)
        .ok_or_else(|| BreakscanError::DataSource {
            reason: format!("missing {} value", name),
        })
}

fn number(record: &StringRecord, idx: usize, name: &str) -> Result<f64, BreakscanError> {
    let raw = field(record, idx, name)?;
    raw.parse().map_err(|e| BreakscanError::DataSource {
        reason: format!("invalid {} value '{}': {}", name, raw, e),
    })
}

impl DataPort for CsvAdapter {
    fn fetch_bars(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Bar>, BreakscanError> {
        let mut bars = self.read_all(ticker)?;
        bars.retain(|b| b.date >= start_date && b.date <= end_date);
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, BreakscanError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| BreakscanError::DataSource {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| BreakscanError::DataSource {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(ticker) = name_str.strip_suffix(".csv") {
                symbols.push(ticker.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, BreakscanError> {
        if !self.csv_path(ticker).exists() {
            return Ok(None);
        }
        let bars = self.read_all(ticker)?;
        Ok(match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date, bars.len())),
            _ => None,
        })
    }
}
