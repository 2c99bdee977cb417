//! Report generation port trait.

use std::path::PathBuf;

use crate::domain::backtest::BacktestResult;
use crate::domain::error::MacdTraderError;
use crate::domain::kline::Kline;

/// Port for rendering the charts of a finished backtest.
pub trait ReportPort {
    /// Returns the paths of the files written.
    fn write(
        &self,
        pair: &str,
        klines: &[Kline],
        result: &BacktestResult,
    ) -> Result<Vec<PathBuf>, MacdTraderError>;
}
