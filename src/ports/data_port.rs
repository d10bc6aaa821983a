//! Market data port trait.

use crate::domain::bar::Bar;
use crate::domain::error::BreakscanError;
use chrono::NaiveDate;

pub trait DataPort {
    /// Bars for `ticker` between `start_date` and `end_date` inclusive, oldest first.
    fn fetch_bars(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Bar>, BreakscanError>;

    fn list_symbols(&self) -> Result<Vec<String>, BreakscanError>;

    /// First date, last date and bar count, or `None` when nothing is stored.
    fn get_data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, BreakscanError>;
}
