//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod csv_report_adapter;
pub mod file_config_adapter;
#[cfg(feature = "sqlite")]
pub mod sqlite_adapter;
#[cfg(feature = "web")]
pub mod web;

use std::path::PathBuf;

use crate::domain::error::BreakscanError;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

/// Build the data port selected by `[data] source` (`csv` when unset).
pub fn data_port_from_config(
    config: &dyn ConfigPort,
) -> Result<Box<dyn DataPort + Send + Sync>, BreakscanError> {
    let source = config
        .get_string("data", "source")
        .unwrap_or_else(|| "csv".to_string())
        .to_lowercase();

    match source.as_str() {
        "csv" => {
            let dir = config
                .get_string("data", "csv_dir")
                .unwrap_or_else(|| "data".to_string());
            Ok(Box::new(csv_adapter::CsvAdapter::new(PathBuf::from(dir))))
        }
        #[cfg(feature = "sqlite")]
        "sqlite" => Ok(Box::new(sqlite_adapter::SqliteAdapter::from_config(config)?)),
        other => Err(BreakscanError::ConfigInvalid {
            section: "data".into(),
            key: "source".into(),
            reason: format!("unsupported data source '{}'", other),
        }),
    }
}

/// Directory trade logs are written to, `[output] dir` or `trades`.
pub fn output_dir_from_config(config: &dyn ConfigPort) -> PathBuf {
    PathBuf::from(
        config
            .get_string("output", "dir")
            .unwrap_or_else(|| "trades".to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    #[test]
    fn csv_is_the_default_source() {
        let config = FileConfigAdapter::from_string("[scan]\n").unwrap();
        assert!(data_port_from_config(&config).is_ok());
    }

    #[test]
    fn unknown_source_rejected() {
        let config = FileConfigAdapter::from_string("[data]\nsource = parquet\n").unwrap();
        let err = data_port_from_config(&config).err().unwrap();
        assert!(matches!(err, BreakscanError::ConfigInvalid { key, .. } if key == "source"));
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn sqlite_source_from_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let db = dir.path().join("bars.db");
        let ini = format!("[data]\nsource = sqlite\n\n[sqlite]\npath = {}\n", db.display());
        let config = FileConfigAdapter::from_string(&ini).unwrap();

        let port = data_port_from_config(&config).unwrap();
        assert!(port.list_symbols().unwrap().is_empty());
    }

    #[test]
    fn output_dir_default_and_override() {
        let config = FileConfigAdapter::from_string("[scan]\n").unwrap();
        assert_eq!(output_dir_from_config(&config), PathBuf::from("trades"));

        let config = FileConfigAdapter::from_string("[output]\ndir = out\n").unwrap();
        assert_eq!(output_dir_from_config(&config), PathBuf::from("out"));
    }
}
