//! Backtest configuration and the end-to-end numeric pipeline:
//! prices -> MACD line -> signal line -> simulation -> baseline -> comparison.

use std::path::PathBuf;

use super::baseline::buy_and_hold;
use super::error::MacdTraderError;
use super::indicator::{compute_indicators, MacdIndicator, MacdParams};
use super::metrics::Comparison;
use super::simulation::{simulate, SimulationResult};

pub const DEFAULT_ZIPPED_DIR: &str = "data/zipped_data";
pub const DEFAULT_DATA_DIR: &str = "data/unzipped_data";
pub const DEFAULT_PLOTS_DIR: &str = "plots";
pub const DEFAULT_ROWS: usize = 1000;

/// Validated parameters for one run on one trading pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub pair_name: String,
    pub initial_funds: f64,
    /// Downloaded `.zip` archives, one directory per pair.
    pub zipped_dir: PathBuf,
    pub data_dir: PathBuf,
    pub plots_dir: PathBuf,
    pub rows: usize,
    pub params: MacdParams,
}

impl RunConfig {
    pub fn new(pair_name: impl Into<String>, initial_funds: f64) -> Self {
        RunConfig {
            pair_name: pair_name.into(),
            initial_funds,
            zipped_dir: PathBuf::from(DEFAULT_ZIPPED_DIR),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            plots_dir: PathBuf::from(DEFAULT_PLOTS_DIR),
            rows: DEFAULT_ROWS,
            params: MacdParams::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub indicator: MacdIndicator,
    pub simulation: SimulationResult,
    pub baseline_final: f64,
    pub comparison: Comparison,
}

pub fn run_backtest(
    prices: &[f64],
    initial_funds: f64,
    params: MacdParams,
) -> Result<BacktestResult, MacdTraderError> {
    let indicator = compute_indicators(prices, params)?;
    let simulation = simulate(initial_funds, prices, &indicator.line, &indicator.signal)?;
    let baseline_final = buy_and_hold(initial_funds, prices)?;
    let comparison = Comparison::new(initial_funds, simulation.final_funds, baseline_final);

    tracing::info!(
        bars = prices.len(),
        buys = simulation.buy_indices.len(),
        sells = simulation.sell_indices.len(),
        final_funds = simulation.final_funds,
        baseline_final,
        "backtest complete"
    );

    Ok(BacktestResult {
        indicator,
        simulation,
        baseline_final,
        comparison,
    })
}
