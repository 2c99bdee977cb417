//! Crossover-driven trading simulation.
//!
//! Walks the MACD and signal lines from index 1. An upward crossover
//! (MACD moves from <= signal to > signal) spends all funds on coins; a
//! downward crossover (>= to <) sells all coins. Steps where either line is
//! absent at `i` or `i-1` only mark the holdings to market.

use super::error::MacdTraderError;
use super::kline::validate_prices;
use super::portfolio::TradeState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossover {
    Upward,
    Downward,
}

/// Outcome of one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// Holdings liquidated at the last price, without recording a sell.
    pub final_funds: f64,
    /// One mark-to-market snapshot per price index.
    pub portfolio_values: Vec<f64>,
    pub buy_indices: Vec<usize>,
    pub sell_indices: Vec<usize>,
}

/// Classify the transition between `i-1` and `i`. Equality on the current
/// bar never fires; only the strict crossing that follows a tie does.
pub fn detect_crossover(
    macd_prev: f64,
    signal_prev: f64,
    macd: f64,
    signal: f64,
) -> Option<Crossover> {
    if macd > signal && macd_prev <= signal_prev {
        Some(Crossover::Upward)
    } else if macd < signal && macd_prev >= signal_prev {
        Some(Crossover::Downward)
    } else {
        None
    }
}

pub fn simulate(
    initial_funds: f64,
    prices: &[f64],
    macd_values: &[f64],
    signal_values: &[Option<f64>],
) -> Result<SimulationResult, MacdTraderError> {
    if !initial_funds.is_finite() || initial_funds < 0.0 {
        return Err(MacdTraderError::InvalidFunds {
            value: initial_funds,
        });
    }
    validate_prices(prices)?;
    check_len("MACD line", prices.len(), macd_values.len())?;
    check_len("signal line", prices.len(), signal_values.len())?;
    check_finite("MACD line", macd_values.iter().copied().enumerate())?;
    check_finite(
        "signal line",
        signal_values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i, v))),
    )?;

    let mut state = TradeState::new(initial_funds);
    let mut portfolio_values = Vec::with_capacity(prices.len());
    portfolio_values.push(initial_funds);
    let mut buy_indices = Vec::new();
    let mut sell_indices = Vec::new();

    for i in 1..prices.len() {
        let price = prices[i];
        let crossover = match (signal_values[i - 1], signal_values[i]) {
            (Some(signal_prev), Some(signal)) => {
                detect_crossover(macd_values[i - 1], signal_prev, macd_values[i], signal)
            }
            _ => None,
        };

        match crossover {
            Some(Crossover::Upward) if state.can_buy() => {
                let coins = state.buy_all(price);
                buy_indices.push(i);
                tracing::debug!(index = i, price, coins, "buy");
            }
            Some(Crossover::Downward) if state.can_sell() => {
                let proceeds = state.sell_all(price);
                sell_indices.push(i);
                tracing::debug!(index = i, price, proceeds, "sell");
            }
            _ => {}
        }

        portfolio_values.push(state.value_at(price));
    }

    let last_price = prices[prices.len() - 1];
    Ok(SimulationResult {
        final_funds: state.value_at(last_price),
        portfolio_values,
        buy_indices,
        sell_indices,
    })
}

fn check_len(series: &'static str, expected: usize, actual: usize) -> Result<(), MacdTraderError> {
    if expected != actual {
        return Err(MacdTraderError::LengthMismatch {
            series,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Present entries must be finite; absence is expressed with `None`, never NaN.
fn check_finite(
    series: &'static str,
    values: impl Iterator<Item = (usize, f64)>,
) -> Result<(), MacdTraderError> {
    for (index, value) in values {
        if !value.is_finite() {
            return Err(MacdTraderError::NonFiniteIndicator {
                series,
                index,
                value,
            });
        }
    }
    Ok(())
}
