#![allow(dead_code)]

use chrono::{DateTime, NaiveDateTime};
use macdtrader::domain::backtest::BacktestResult;
use macdtrader::domain::error::MacdTraderError;
pub use macdtrader::domain::kline::Kline;
use macdtrader::ports::data_port::DataPort;
use macdtrader::ports::report_port::ReportPort;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

/// 2024-01-01 00:00:00 UTC
pub const T0_MS: i64 = 1_704_067_200_000;
pub const HOUR_MS: i64 = 3_600_000;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<Kline>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_klines(mut self, pair: &str, klines: Vec<Kline>) -> Self {
        self.data.insert(pair.to_string(), klines);
        self
    }

    pub fn with_error(mut self, pair: &str, reason: &str) -> Self {
        self.errors.insert(pair.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_klines(&self, pair: &str) -> Result<Vec<Kline>, MacdTraderError> {
        if let Some(reason) = self.errors.get(pair) {
            return Err(MacdTraderError::Data {
                reason: reason.clone(),
            });
        }
        match self.data.get(pair) {
            Some(klines) if !klines.is_empty() => Ok(klines.clone()),
            _ => Err(MacdTraderError::NoData {
                pair: pair.to_string(),
            }),
        }
    }

    fn list_pairs(&self) -> Result<Vec<String>, MacdTraderError> {
        let mut pairs: Vec<String> = self.data.keys().cloned().collect();
        pairs.sort();
        Ok(pairs)
    }
}

/// Records what it was asked to render instead of writing files.
#[derive(Default)]
pub struct RecordingReportPort {
    pub calls: RefCell<Vec<(String, usize, usize)>>,
}

impl ReportPort for RecordingReportPort {
    fn write(
        &self,
        pair: &str,
        klines: &[Kline],
        result: &BacktestResult,
    ) -> Result<Vec<PathBuf>, MacdTraderError> {
        self.calls.borrow_mut().push((
            pair.to_string(),
            klines.len(),
            result.simulation.portfolio_values.len(),
        ));
        Ok(vec![PathBuf::from(format!("{pair}.svg"))])
    }
}

pub fn ms_to_time(ms: i64) -> NaiveDateTime {
    DateTime::from_timestamp_millis(ms).unwrap().naive_utc()
}

pub fn make_kline(hour: usize, close: f64) -> Kline {
    let open_ms = T0_MS + hour as i64 * HOUR_MS;
    Kline {
        open_time: ms_to_time(open_ms),
        open: close,
        high: close * 1.01,
        low: close * 0.99,
        close,
        volume: 10.0,
        close_time: ms_to_time(open_ms + HOUR_MS - 1),
        quote_volume: close * 10.0,
        count: 100,
        taker_buy_volume: 5.0,
        taker_buy_quote_volume: close * 5.0,
    }
}

pub fn make_klines(prices: &[f64]) -> Vec<Kline> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &p)| make_kline(i, p))
        .collect()
}

/// Oscillating prices that produce several MACD/signal crossovers.
pub fn wave_prices(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 1000.0 + 80.0 * (i as f64 / 6.0).sin() + i as f64 * 0.5)
        .collect()
}

/// One headerless Binance kline CSV row.
pub fn csv_row(hour: usize, close: f64) -> String {
    let open_ms = T0_MS + hour as i64 * HOUR_MS;
    format!(
        "{},{c},{c},{c},{c},10,{},{},100,5,{},0\n",
        open_ms,
        open_ms + HOUR_MS - 1,
        close * 10.0,
        close * 5.0,
        c = close
    )
}
