//! Trade log sink port trait.

use std::path::{Path, PathBuf};

use crate::domain::error::BreakscanError;
use crate::domain::trade::TradeLog;

/// File name a ticker's trade log is stored under.
pub fn report_file_name(ticker: &str) -> String {
    format!("{}_breakout_trades.csv", ticker)
}

/// Port for persisting trade logs.
pub trait ReportPort {
    fn write(&self, log: &TradeLog, output_path: &Path) -> Result<(), BreakscanError>;

    /// Default implementation: writes to `<dir>/<TICKER>_breakout_trades.csv`,
    /// creating `dir` if needed, and returns the path written.
    fn write_to_dir(
        &self,
        log: &TradeLog,
        ticker: &str,
        dir: &Path,
    ) -> Result<PathBuf, BreakscanError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(report_file_name(ticker));
        self.write(log, &path)?;
        Ok(path)
    }
}
