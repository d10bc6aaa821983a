//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::{data_port_from_config, output_dir_from_config};
use crate::domain::analysis::{AnalysisOutcome, analyze};
use crate::domain::error::BreakscanError;
use crate::domain::request::{SCAN_SECTION, ScanRequest, ScanRequestInput, validate_scan_request};
use crate::domain::sufficiency::MIN_BARS;
use crate::domain::trade::Trade;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "breakscan", about = "Volume/price breakout scanner", version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Command-line overrides for the `[scan]` section.
#[derive(Args, Debug, Default, Clone)]
pub struct ScanOverrides {
    #[arg(long)]
    pub ticker: Option<String>,
    /// Start date (YYYY-MM-DD)
    #[arg(long = "start")]
    pub start_date: Option<String>,
    /// End date (YYYY-MM-DD)
    #[arg(long = "end")]
    pub end_date: Option<String>,
    /// Volume threshold as a percentage of the 20-bar average (200 = double)
    #[arg(long, allow_hyphen_values = true)]
    pub volume_threshold: Option<String>,
    /// Minimum day-over-day close change, in percent
    #[arg(long, allow_hyphen_values = true)]
    pub price_change_threshold: Option<String>,
    /// Bars to hold after entry
    #[arg(long, allow_hyphen_values = true)]
    pub holding_period: Option<String>,
}

impl From<ScanOverrides> for ScanRequestInput {
    fn from(o: ScanOverrides) -> Self {
        ScanRequestInput {
            ticker: o.ticker,
            start_date: o.start_date,
            end_date: o.end_date,
            volume_threshold: o.volume_threshold,
            price_change_threshold: o.price_change_threshold,
            holding_period: o.holding_period,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a ticker for breakouts and write the trade log
    Scan {
        #[arg(short, long)]
        config: PathBuf,
        #[command(flatten)]
        overrides: ScanOverrides,
        /// Output CSV path, or `-` for stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate scan parameters without fetching data
    Validate {
        #[arg(short, long)]
        config: PathBuf,
        #[command(flatten)]
        overrides: ScanOverrides,
    },
    /// Show the stored data range for a ticker
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
    },
    /// List tickers available in the data source
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Start the web server
    Serve {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Scan {
            config,
            overrides,
            output,
            dry_run,
        } => run_scan(&config, overrides, output.as_deref(), dry_run),
        Command::Validate { config, overrides } => run_validate(&config, overrides),
        Command::Info { config, ticker } => run_info(&config, ticker.as_deref()),
        Command::ListSymbols { config } => run_list_symbols(&config),
        Command::Serve { config } => run_serve(&config),
    }
}

fn fail(err: &BreakscanError) -> ExitCode {
    error!("{err}");
    err.into()
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    info!("loading config from {}", path.display());
    FileConfigAdapter::from_file(path).map_err(|e| fail(&e))
}

pub fn build_scan_request(
    config: &dyn ConfigPort,
    overrides: ScanOverrides,
) -> Result<ScanRequest, BreakscanError> {
    let input = ScanRequestInput::from_config(config).merge(overrides.into());
    validate_scan_request(&input)
}

fn print_request(request: &ScanRequest) {
    let t = &request.params.thresholds;
    eprintln!("\n=== Scan Parameters ===");
    eprintln!("Ticker:           {}", request.ticker);
    eprintln!("Period:           {} to {}", request.start_date, request.end_date);
    eprintln!("Volume Threshold: {}% of 20-bar average", t.volume_threshold_pct);
    eprintln!("Price Threshold:  {}% daily change", t.price_change_threshold_pct);
    eprintln!("Holding Period:   {} bars", request.params.holding_period);
}

fn run_scan(
    config_path: &Path,
    overrides: ScanOverrides,
    output: Option<&Path>,
    dry_run: bool,
) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let request = match build_scan_request(&adapter, overrides) {
        Ok(r) => r,
        Err(e) => return fail(&e),
    };
    print_request(&request);

    if dry_run {
        eprintln!("\nDry run complete: parameters are valid");
        return ExitCode::SUCCESS;
    }

    let data_port = match data_port_from_config(&adapter) {
        Ok(p) => p,
        Err(e) => return fail(&e),
    };

    run_scan_pipeline(
        &*data_port,
        &request,
        output,
        &output_dir_from_config(&adapter),
    )
}

/// Fetch, check, scan, print and persist. Empty logs are reported, not written.
pub fn run_scan_pipeline(
    data_port: &dyn DataPort,
    request: &ScanRequest,
    output: Option<&Path>,
    output_dir: &Path,
) -> ExitCode {
    let outcome = match analyze(data_port, request) {
        Ok(o) => o,
        Err(e) => return fail(&e),
    };

    print_results(&request.ticker, &outcome);

    if outcome.log.is_empty() {
        eprintln!("\nNo breakout trades found");
        return ExitCode::SUCCESS;
    }

    let report = CsvReportAdapter::new();
    let written = match output {
        Some(p) if p == Path::new("-") => report
            .write_to(&outcome.log, io::stdout().lock())
            .map(|_| None),
        Some(p) => report.write(&outcome.log, p).map(|_| Some(p.to_path_buf())),
        None => report
            .write_to_dir(&outcome.log, &request.ticker, output_dir)
            .map(Some),
    };

    match written {
        Ok(Some(path)) => {
            eprintln!("\nTrade log written to: {}", path.display());
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

fn print_results(ticker: &str, outcome: &AnalysisOutcome) {
    let summary = outcome.log.summary();

    eprintln!("\n=== {} Breakout Scan ===", ticker);
    eprintln!("Bars Scanned:     {}", outcome.bars_scanned);
    eprintln!("Total Trades:     {}", summary.total);
    eprintln!("Closed Trades:    {}", summary.closed);
    eprintln!("Open at End:      {}", summary.dangling);
    eprintln!("Win Rate:         {:.1}%", summary.win_rate() * 100.0);
    match summary.average_return_pct {
        Some(avg) => eprintln!("Average Return:   {:.2}%", avg),
        None => eprintln!("Average Return:   n/a"),
    }

    if !outcome.log.is_empty() {
        eprintln!("\n=== Trades ===");
        eprintln!(
            "{:>4}  {:<10}  {:>10}  {:<10}  {:>10}  {:>9}",
            "#", "Entry", "Price", "Exit", "Price", "Return"
        );
        for trade in &outcome.log {
            eprintln!("{}", format_trade_row(trade));
        }
    }
}

pub fn format_trade_row(trade: &Trade) -> String {
    let exit_date = trade
        .exit_date()
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());
    let exit_price = trade
        .exit_price()
        .map(|p| format!("{:.2}", p))
        .unwrap_or_else(|| "-".to_string());
    let ret = trade
        .return_pct()
        .map(|r| format!("{:+.2}%", r))
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{:>4}  {:<10}  {:>10.2}  {:<10}  {:>10}  {:>9}",
        trade.sequence, trade.entry_date, trade.entry_price, exit_date, exit_price, ret
    )
}

fn run_validate(config_path: &Path, overrides: ScanOverrides) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    match build_scan_request(&adapter, overrides) {
        Ok(request) => {
            print_request(&request);
            eprintln!("\nScan parameters are valid.");
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn run_info(config_path: &Path, ticker: Option<&str>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let ticker = match ticker
        .map(|t| t.trim().to_uppercase())
        .or_else(|| config.get_string(SCAN_SECTION, "ticker").map(|t| t.to_uppercase()))
    {
        Some(t) => t,
        None => return fail(&BreakscanError::missing("ticker")),
    };

    let data_port = match data_port_from_config(&config) {
        Ok(p) => p,
        Err(e) => return fail(&e),
    };

    match data_port.get_data_range(&ticker) {
        Ok(Some((first, last, count))) => {
            println!("{}: {} bars, {} to {}", ticker, count, first, last);
            if count < MIN_BARS {
                eprintln!(
                    "warning: fewer than {} bars, no breakouts can be detected",
                    MIN_BARS
                );
            }
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("{}: no data found", ticker);
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn run_list_symbols(config_path: &Path) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let data_port = match data_port_from_config(&config) {
        Ok(p) => p,
        Err(e) => return fail(&e),
    };

    match data_port.list_symbols() {
        Ok(symbols) if symbols.is_empty() => {
            eprintln!("No symbols found");
            ExitCode::SUCCESS
        }
        Ok(symbols) => {
            for symbol in &symbols {
                println!("{}", symbol);
            }
            eprintln!("{} symbols found", symbols.len());
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn run_serve(config_path: &Path) -> ExitCode {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{AppState, serve};
        use std::net::SocketAddr;
        use std::sync::Arc;

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(code) => return code,
        };

        let data_port = match data_port_from_config(&config) {
            Ok(p) => Arc::from(p),
            Err(e) => return fail(&e),
        };

        let listen = config
            .get_string("web", "listen")
            .unwrap_or_else(|| "127.0.0.1:3000".to_string());
        let addr: SocketAddr = match listen.parse() {
            Ok(a) => a,
            Err(_) => {
                return fail(&BreakscanError::ConfigInvalid {
                    section: "web".into(),
                    key: "listen".into(),
                    reason: format!("'{}' is not a socket address", listen),
                });
            }
        };

        let state = AppState {
            data_port,
            report: CsvReportAdapter::new(),
            output_dir: output_dir_from_config(&config),
        };

        let runtime = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => return fail(&BreakscanError::Io(e)),
        };

        match runtime.block_on(serve(state, addr)) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => fail(&e),
        }
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = config_path;
        error!("web feature is required for serve");
        ExitCode::from(1)
    }
}
