//! Buy-and-hold baseline: buy everything on the first bar, value the
//! holdings on the last.

use super::error::MacdTraderError;
use super::portfolio::TradeState;

pub fn buy_and_hold(initial_funds: f64, prices: &[f64]) -> Result<f64, MacdTraderError> {
    if !initial_funds.is_finite() || initial_funds < 0.0 {
        return Err(MacdTraderError::InvalidFunds {
            value: initial_funds,
        });
    }
    let (first, last) = match (prices.first(), prices.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Err(MacdTraderError::InsufficientData { have: 0, need: 1 }),
    };
    if !first.is_finite() || first <= 0.0 {
        return Err(MacdTraderError::InvalidPrice {
            index: 0,
            price: first,
        });
    }
    if !last.is_finite() || last < 0.0 {
        return Err(MacdTraderError::InvalidPrice {
            index: prices.len() - 1,
            price: last,
        });
    }

    let mut state = TradeState::new(initial_funds);
    if state.can_buy() {
        state.buy_all(first);
    }
    Ok(state.value_at(last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn buys_first_values_last() {
        let prices = [100.0, 110.0, 90.0, 130.0, 80.0];
        assert_relative_eq!(buy_and_hold(1000.0, &prices).unwrap(), 800.0, epsilon = 1e-9);
    }

    #[test]
    fn single_price_returns_initial() {
        assert_relative_eq!(buy_and_hold(1000.0, &[55.0]).unwrap(), 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_funds_stay_zero() {
        assert_relative_eq!(buy_and_hold(0.0, &[10.0, 20.0]).unwrap(), 0.0);
    }

    #[test]
    fn rejects_empty_prices() {
        assert!(matches!(
            buy_and_hold(1000.0, &[]),
            Err(MacdTraderError::InsufficientData { .. })
        ));
    }

    #[test]
    fn rejects_zero_first_price() {
        assert!(matches!(
            buy_and_hold(1000.0, &[0.0, 10.0]),
            Err(MacdTraderError::InvalidPrice { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_nan_last_price() {
        assert!(matches!(
            buy_and_hold(1000.0, &[10.0, f64::NAN]),
            Err(MacdTraderError::InvalidPrice { index: 1, .. })
        ));
    }
}
