//! Technical indicators: the windowed EMA engine and the MACD/signal lines
//! built on it.

pub mod ema;
pub mod macd;

pub use ema::ema;
pub use macd::{macd_line, macd_line_with, signal_line, signal_line_with, MacdParams};

use super::error::MacdTraderError;
use super::kline::validate_prices;

/// MACD and signal lines, index-aligned with the price series.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdIndicator {
    pub params: MacdParams,
    pub line: Vec<f64>,
    pub signal: Vec<Option<f64>>,
}

impl MacdIndicator {
    pub fn len(&self) -> usize {
        self.line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    /// Index of the first present signal entry, if any.
    pub fn first_signal_index(&self) -> Option<usize> {
        self.signal.iter().position(Option::is_some)
    }
}

/// Validate parameters and prices, then derive both lines.
pub fn compute_indicators(
    prices: &[f64],
    params: MacdParams,
) -> Result<MacdIndicator, MacdTraderError> {
    params.validate()?;
    validate_prices(prices)?;

    let line = macd_line_with(prices, params.fast, params.slow)?;
    let signal = signal_line_with(&line, params.signal)?;
    tracing::debug!(
        bars = prices.len(),
        fast = params.fast,
        slow = params.slow,
        signal = params.signal,
        "computed MACD indicator"
    );

    Ok(MacdIndicator {
        params,
        line,
        signal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_indicators_aligns_lengths() {
        let prices: Vec<f64> = (0..50).map(|i| 100.0 + (i as f64).sin()).collect();
        let ind = compute_indicators(&prices, MacdParams::default()).unwrap();
        assert_eq!(ind.len(), prices.len());
        assert_eq!(ind.signal.len(), prices.len());
        assert_eq!(ind.first_signal_index(), Some(9));
    }

    #[test]
    fn compute_indicators_rejects_bad_price() {
        let err = compute_indicators(&[100.0, -1.0], MacdParams::default()).unwrap_err();
        assert!(matches!(err, MacdTraderError::InvalidPrice { index: 1, .. }));
    }

    #[test]
    fn compute_indicators_rejects_zero_window() {
        let params = MacdParams {
            fast: 0,
            ..MacdParams::default()
        };
        let err = compute_indicators(&[100.0], params).unwrap_err();
        assert!(matches!(err, MacdTraderError::InvalidWindow { name: "fast", .. }));
    }

    #[test]
    fn compute_indicators_rejects_empty() {
        assert!(compute_indicators(&[], MacdParams::default()).is_err());
    }

    #[test]
    fn short_series_has_no_signal() {
        let ind = compute_indicators(&[1.0, 2.0, 3.0], MacdParams::default()).unwrap();
        assert_eq!(ind.first_signal_index(), None);
        assert!(!ind.is_empty());
    }
}
