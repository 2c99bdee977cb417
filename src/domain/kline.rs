//! Candlestick (kline) representation and price-series helpers.

use chrono::NaiveDateTime;

use super::error::MacdTraderError;

/// One candlestick in the 12-column Binance kline layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Kline {
    pub open_time: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub close_time: NaiveDateTime,
    pub quote_volume: f64,
    pub count: u64,
    pub taker_buy_volume: f64,
    pub taker_buy_quote_volume: f64,
}

/// Close prices, index-aligned with the input klines.
pub fn close_prices(klines: &[Kline]) -> Vec<f64> {
    klines.iter().map(|k| k.close).collect()
}

/// Close times, index-aligned with the input klines.
pub fn close_times(klines: &[Kline]) -> Vec<NaiveDateTime> {
    klines.iter().map(|k| k.close_time).collect()
}

/// Keep only the last `n` klines, preserving order.
pub fn last_n(mut klines: Vec<Kline>, n: usize) -> Vec<Kline> {
    if klines.len() > n {
        klines.drain(..klines.len() - n);
    }
    klines
}

/// Reject empty series and any price that is zero, negative or non-finite.
pub fn validate_prices(prices: &[f64]) -> Result<(), MacdTraderError> {
    if prices.is_empty() {
        return Err(MacdTraderError::InsufficientData { have: 0, need: 1 });
    }
    match prices
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite() || **p <= 0.0)
    {
        Some((index, &price)) => Err(MacdTraderError::InvalidPrice { index, price }),
        None => Ok(()),
    }
}
