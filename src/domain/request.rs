//! Scan request collection and validation.
//!
//! Parameters arrive as raw strings (INI `[scan]` section, CLI flags, HTTP
//! form fields) and are validated here into a typed [`ScanRequest`] before any
//! data is fetched.

use std::num::NonZeroUsize;

use chrono::NaiveDate;

use crate::domain::breakout::BreakoutThresholds;
use crate::domain::error::BreakscanError;
use crate::domain::scan::ScanParams;
use crate::ports::config_port::ConfigPort;

/// Shortest start-to-end span that can realistically hold 20 trading days.
pub const MIN_CALENDAR_SPAN_DAYS: i64 = 45;

pub const SCAN_SECTION: &str = "scan";

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "web", derive(serde::Deserialize))]
pub struct ScanRequestInput {
    pub ticker: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub volume_threshold: Option<String>,
    pub price_change_threshold: Option<String>,
    pub holding_period: Option<String>,
}

impl ScanRequestInput {
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        let get = |key: &str| config.get_string(SCAN_SECTION, key);
        ScanRequestInput {
            ticker: get("ticker"),
            start_date: get("start_date"),
            end_date: get("end_date"),
            volume_threshold: get("volume_threshold"),
            price_change_threshold: get("price_change_threshold"),
            holding_period: get("holding_period"),
        }
    }

    /// Fields set in `overrides` replace ours.
    pub fn merge(self, overrides: ScanRequestInput) -> Self {
        ScanRequestInput {
            ticker: overrides.ticker.or(self.ticker),
            start_date: overrides.start_date.or(self.start_date),
            end_date: overrides.end_date.or(self.end_date),
            volume_threshold: overrides.volume_threshold.or(self.volume_threshold),
            price_change_threshold: overrides
                .price_change_threshold
                .or(self.price_change_threshold),
            holding_period: overrides.holding_period.or(self.holding_period),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanRequest {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub params: ScanParams,
}

pub fn validate_scan_request(input: &ScanRequestInput) -> Result<ScanRequest, BreakscanError> {
    let ticker = required(&input.ticker, "ticker")?;
    let start = required(&input.start_date, "start_date")?;
    let end = required(&input.end_date, "end_date")?;
    let volume = required(&input.volume_threshold, "volume_threshold")?;
    let price = required(&input.price_change_threshold, "price_change_threshold")?;
    let holding = required(&input.holding_period, "holding_period")?;

    let ticker = validate_ticker(ticker)?;
    let start_date = parse_date(start, "start_date")?;
    let end_date = parse_date(end, "end_date")?;
    let volume_threshold_pct = parse_positive(volume, "volume_threshold")?;
    let price_change_threshold_pct = parse_positive(price, "price_change_threshold")?;
    let holding_period = parse_holding_period(holding)?;

    if start_date >= end_date {
        return Err(BreakscanError::invalid(
            "start_date",
            "start_date must be before end_date",
        ));
    }

    let span = (end_date - start_date).num_days();
    if span < MIN_CALENDAR_SPAN_DAYS {
        return Err(BreakscanError::invalid(
            "end_date",
            format!(
                "date range spans {} days, at least {} needed for analysis",
                span, MIN_CALENDAR_SPAN_DAYS
            ),
        ));
    }

    Ok(ScanRequest {
        ticker,
        start_date,
        end_date,
        params: ScanParams {
            thresholds: BreakoutThresholds {
                volume_threshold_pct,
                price_change_threshold_pct,
            },
            holding_period,
        },
    })
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, BreakscanError> {
    match value.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(BreakscanError::missing(name)),
    }
}

fn validate_ticker(raw: &str) -> Result<String, BreakscanError> {
    let ticker = raw.to_uppercase();
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=');
    if !ticker.chars().all(allowed) {
        return Err(BreakscanError::invalid(
            "ticker",
            format!("'{}' contains unsupported characters", raw),
        ));
    }
    Ok(ticker)
}

fn parse_date(value: &str, name: &str) -> Result<NaiveDate, BreakscanError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| BreakscanError::invalid(name, "invalid date format, expected YYYY-MM-DD"))
}

fn parse_positive(value: &str, name: &str) -> Result<f64, BreakscanError> {
    let parsed: f64 = value
        .parse()
        .map_err(|_| BreakscanError::invalid(name, format!("'{}' is not a number", value)))?;
    if !parsed.is_finite() || parsed <= 0.0 {
        return Err(BreakscanError::invalid(name, "must be a positive number"));
    }
    Ok(parsed)
}

fn parse_holding_period(value: &str) -> Result<NonZeroUsize, BreakscanError> {
    let parsed: i64 = value.parse().map_err(|_| {
        BreakscanError::invalid(
            "holding_period",
            format!("'{}' is not a whole number of bars", value),
        )
    })?;
    usize::try_from(parsed)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| BreakscanError::invalid("holding_period", "must be at least 1"))
}
