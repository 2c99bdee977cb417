//! MACD (Moving Average Convergence Divergence) line and signal line.
//!
//! MACD Line = EMA(fast) - EMA(slow), defined at every index (the EMA
//! engine truncates its window at the start of the series).
//! Signal Line = EMA(signal) of the MACD line, absent for the first
//! `signal` indices.
//!
//! Default parameters: fast=12, slow=26, signal=9

use super::ema::ema;
use crate::domain::error::MacdTraderError;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

/// EMA windows for the MACD and signal lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        MacdParams {
            fast: DEFAULT_FAST,
            slow: DEFAULT_SLOW,
            signal: DEFAULT_SIGNAL,
        }
    }
}

impl MacdParams {
    pub fn validate(&self) -> Result<(), MacdTraderError> {
        for (name, value) in [("fast", self.fast), ("slow", self.slow), ("signal", self.signal)] {
            if value == 0 {
                return Err(MacdTraderError::InvalidWindow { name, value });
            }
        }
        Ok(())
    }
}

/// MACD line with the default 12/26 windows.
pub fn macd_line(prices: &[f64]) -> Result<Vec<f64>, MacdTraderError> {
    macd_line_with(prices, DEFAULT_FAST, DEFAULT_SLOW)
}

pub fn macd_line_with(
    prices: &[f64],
    fast: usize,
    slow: usize,
) -> Result<Vec<f64>, MacdTraderError> {
    if prices.is_empty() {
        return Err(MacdTraderError::InsufficientData { have: 0, need: 1 });
    }
    Ok((0..prices.len())
        .map(|i| ema(prices, i, fast) - ema(prices, i, slow))
        .collect())
}

/// Signal line with the default 9-period window and warm-up gap.
pub fn signal_line(macd_values: &[f64]) -> Result<Vec<Option<f64>>, MacdTraderError> {
    signal_line_with(macd_values, DEFAULT_SIGNAL)
}

/// Entries before index `period` are `None`; the rest are EMA(period) of
/// the MACD line.
pub fn signal_line_with(
    macd_values: &[f64],
    period: usize,
) -> Result<Vec<Option<f64>>, MacdTraderError> {
    if macd_values.is_empty() {
        return Err(MacdTraderError::InsufficientData { have: 0, need: 1 });
    }
    Ok((0..macd_values.len())
        .map(|i| (i >= period).then(|| ema(macd_values, i, period)))
        .collect())
}
