//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::BinanceCsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::svg_report::SvgReportAdapter;
use crate::domain::backtest::{
    self as backtest_engine, RunConfig, DEFAULT_DATA_DIR, DEFAULT_PLOTS_DIR, DEFAULT_ROWS,
    DEFAULT_ZIPPED_DIR,
};
use crate::domain::config_validation::{
    check_initial_funds, check_pair_name, validate_macd_config, validate_run_config,
};
use crate::domain::error::MacdTraderError;
use crate::domain::indicator::macd::{DEFAULT_FAST, DEFAULT_SIGNAL, DEFAULT_SLOW};
use crate::domain::indicator::MacdParams;
use crate::domain::kline::{close_prices, last_n, Kline};
use crate::logging;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "macdtrader",
    about = "Backtest a MACD crossover strategy against buy-and-hold"
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the MACD backtest for a trading pair
    Run {
        /// Trading pair, e.g. BTCUSDT
        pair: Option<String>,
        /// Starting capital
        initial_funds: Option<f64>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Directory of downloaded `.zip` archives, one subdirectory per pair
        #[arg(long)]
        zipped_dir: Option<PathBuf>,
        /// Directory of extracted CSV files, one subdirectory per pair
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long)]
        plots_dir: Option<PathBuf>,
        /// Number of most recent klines to use
        #[arg(long)]
        rows: Option<usize>,
        /// Skip chart rendering
        #[arg(long)]
        no_plots: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List trading pairs with kline data
    ListPairs {
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Values given on the command line; each one wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub pair: Option<String>,
    pub initial_funds: Option<f64>,
    pub zipped_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub plots_dir: Option<PathBuf>,
    pub rows: Option<usize>,
}

pub fn run(cli: Cli) -> ExitCode {
    logging::init(cli.verbose);

    match cli.command {
        Command::Run {
            pair,
            initial_funds,
            config,
            zipped_dir,
            data_dir,
            plots_dir,
            rows,
            no_plots,
        } => {
            let overrides = RunOverrides {
                pair,
                initial_funds,
                zipped_dir,
                data_dir,
                plots_dir,
                rows,
            };
            run_backtest(config.as_deref(), &overrides, !no_plots)
        }
        Command::Validate { config } => run_validate(&config),
        Command::ListPairs { data_dir, config } => {
            run_list_pairs(data_dir.as_deref(), config.as_deref())
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, MacdTraderError> {
    FileConfigAdapter::from_file(path).map_err(|e| MacdTraderError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn load_optional_config(path: Option<&Path>) -> Result<FileConfigAdapter, MacdTraderError> {
    match path {
        Some(p) => {
            tracing::info!(path = %p.display(), "loading config");
            load_config(p)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

/// Merge config values and overrides into a validated `RunConfig`.
pub fn build_run_config(
    adapter: &dyn ConfigPort,
    overrides: &RunOverrides,
) -> Result<RunConfig, MacdTraderError> {
    validate_run_config(adapter)?;
    validate_macd_config(adapter)?;

    let pair_name = match &overrides.pair {
        Some(p) => p.trim().to_uppercase(),
        None => adapter
            .get_string("run", "pair")
            .map(|p| p.to_uppercase())
            .ok_or_else(|| MacdTraderError::ConfigMissing {
                section: "run".into(),
                key: "pair".into(),
            })?,
    };
    check_pair_name("run", &pair_name)?;

    let initial_funds = match overrides.initial_funds {
        Some(f) => f,
        None => {
            if adapter.get_string("run", "initial_funds").is_none() {
                return Err(MacdTraderError::ConfigMissing {
                    section: "run".into(),
                    key: "initial_funds".into(),
                });
            }
            adapter.get_double("run", "initial_funds", f64::NAN)
        }
    };
    check_initial_funds("run", initial_funds)?;

    let rows = match overrides.rows {
        Some(0) => {
            return Err(MacdTraderError::ConfigInvalid {
                section: "run".into(),
                key: "rows".into(),
                reason: "rows must be positive".into(),
            });
        }
        Some(r) => r,
        None => adapter.get_int("run", "rows", DEFAULT_ROWS as i64) as usize,
    };

    let zipped_dir = overrides
        .zipped_dir
        .clone()
        .or_else(|| adapter.get_string("run", "zipped_dir").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ZIPPED_DIR));
    let data_dir = overrides
        .data_dir
        .clone()
        .or_else(|| adapter.get_string("run", "data_dir").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    let plots_dir = overrides
        .plots_dir
        .clone()
        .or_else(|| adapter.get_string("run", "plots_dir").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PLOTS_DIR));

    let params = MacdParams {
        fast: adapter.get_int("macd", "fast", DEFAULT_FAST as i64) as usize,
        slow: adapter.get_int("macd", "slow", DEFAULT_SLOW as i64) as usize,
        signal: adapter.get_int("macd", "signal", DEFAULT_SIGNAL as i64) as usize,
    };
    params.validate()?;

    Ok(RunConfig {
        pair_name,
        initial_funds,
        zipped_dir,
        data_dir,
        plots_dir,
        rows,
        params,
    })
}

fn run_backtest(config_path: Option<&Path>, overrides: &RunOverrides, plots: bool) -> ExitCode {
    let outcome = load_optional_config(config_path)
        .and_then(|adapter| build_run_config(&adapter, overrides))
        .and_then(|config| {
            let data_port = BinanceCsvAdapter::new(config.data_dir.clone())
                .with_archives(config.zipped_dir.clone());
            let report_port = SvgReportAdapter::new(config.plots_dir.clone());
            run_backtest_pipeline(&data_port, plots.then_some(&report_port as &dyn ReportPort), &config)
        });

    match outcome {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Load, compute, simulate, compare and optionally render. Returns the
/// text printed to stdout.
pub fn run_backtest_pipeline(
    data_port: &dyn DataPort,
    report_port: Option<&dyn ReportPort>,
    config: &RunConfig,
) -> Result<String, MacdTraderError> {
    // Stage 1: Load klines
    tracing::info!(pair = %config.pair_name, "loading klines");
    let klines = last_n(data_port.fetch_klines(&config.pair_name)?, config.rows);
    let prices = close_prices(&klines);
    if prices.len() < recommended_bars(&config.params) {
        tracing::warn!(
            bars = prices.len(),
            recommended = recommended_bars(&config.params),
            "short series: MACD and signal lines are mostly warm-up"
        );
    }

    // Stage 2: Indicators, simulation, baseline
    let result = backtest_engine::run_backtest(&prices, config.initial_funds, config.params)?;

    // Stage 3: Charts
    if let Some(report) = report_port {
        let written = report.write(&config.pair_name, &klines, &result)?;
        for path in &written {
            tracing::info!(path = %path.display(), "chart written");
        }
    }

    Ok(format!(
        "{}\n\n{}",
        data_summary(&config.pair_name, &klines),
        result.comparison
    ))
}

/// Bars needed before the slow EMA window and the signal window are full.
pub fn recommended_bars(params: &MacdParams) -> usize {
    params.slow.max(params.fast) + params.signal
}

fn data_summary(pair: &str, klines: &[Kline]) -> String {
    match (klines.first(), klines.last()) {
        (Some(first), Some(last)) => format!(
            "{}: {} klines, {} to {}",
            pair,
            klines.len(),
            first.close_time.format("%Y-%m-%d %H:%M:%S"),
            last.close_time.format("%Y-%m-%d %H:%M:%S")
        ),
        _ => format!("{}: no klines", pair),
    }
}

fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let outcome = load_config(config_path).and_then(|adapter| {
        validate_run_config(&adapter)?;
        validate_macd_config(&adapter)?;
        Ok(adapter)
    });

    match outcome {
        Ok(adapter) => {
            let pair = adapter
                .get_string("run", "pair")
                .unwrap_or_else(|| "(from command line)".to_string());
            eprintln!("  pair:   {}", pair);
            eprintln!(
                "  macd:   {}/{}/{}",
                adapter.get_int("macd", "fast", DEFAULT_FAST as i64),
                adapter.get_int("macd", "slow", DEFAULT_SLOW as i64),
                adapter.get_int("macd", "signal", DEFAULT_SIGNAL as i64)
            );
            eprintln!("\nConfiguration is valid.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_list_pairs(data_dir: Option<&Path>, config_path: Option<&Path>) -> ExitCode {
    let outcome = load_optional_config(config_path).and_then(|adapter| {
        let dir = data_dir
            .map(Path::to_path_buf)
            .or_else(|| adapter.get_string("run", "data_dir").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        BinanceCsvAdapter::new(dir).list_pairs()
    });

    match outcome {
        Ok(pairs) if pairs.is_empty() => {
            eprintln!("No pairs found");
            ExitCode::SUCCESS
        }
        Ok(pairs) => {
            for pair in &pairs {
                println!("{}", pair);
            }
            eprintln!("{} pairs found", pairs.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
