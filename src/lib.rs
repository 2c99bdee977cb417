//! macdtrader: MACD crossover backtester for candlestick series.
//!
//! Hexagonal architecture: the numeric engine and trade simulation live in
//! [`domain`], port traits in [`ports`], concrete implementations in
//! [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
pub mod logging;
