//! Kline data access port trait.

use crate::domain::error::MacdTraderError;
use crate::domain::kline::Kline;

pub trait DataPort {
    /// All klines for `pair`, oldest first.
    fn fetch_klines(&self, pair: &str) -> Result<Vec<Kline>, MacdTraderError>;

    fn list_pairs(&self) -> Result<Vec<String>, MacdTraderError>;
}
