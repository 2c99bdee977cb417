//! All-in/all-out trade state and mark-to-market valuation.

/// Cash and coin holdings of one simulation run. Neither side ever goes
/// negative: buys spend all funds and sells liquidate all coins.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeState {
    pub funds: f64,
    pub coins: f64,
}

impl TradeState {
    pub fn new(initial_funds: f64) -> Self {
        TradeState {
            funds: initial_funds,
            coins: 0.0,
        }
    }

    pub fn can_buy(&self) -> bool {
        self.funds > 0.0
    }

    pub fn can_sell(&self) -> bool {
        self.coins > 0.0
    }

    /// Convert all funds to coins at `price`. Returns the coins bought.
    pub fn buy_all(&mut self, price: f64) -> f64 {
        let bought = self.funds / price;
        self.coins += bought;
        self.funds = 0.0;
        bought
    }

    /// Convert all coins to funds at `price`. Returns the proceeds.
    pub fn sell_all(&mut self, price: f64) -> f64 {
        let proceeds = self.coins * price;
        self.funds += proceeds;
        self.coins = 0.0;
        proceeds
    }

    pub fn value_at(&self, price: f64) -> f64 {
        self.funds + self.coins * price
    }
}
