//! Core domain types and logic: the EMA/MACD engine, the crossover
//! simulator and the buy-and-hold baseline.

pub mod kline;
pub mod indicator;
pub mod portfolio;
pub mod simulation;
pub mod baseline;
pub mod metrics;
pub mod backtest;
pub mod config_validation;
pub mod error;
