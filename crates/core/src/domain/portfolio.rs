//! The user's own lists: held positions and the watchlist.

use super::stock::StockRecord;
use serde::{Deserialize, Serialize};

/// A held position valued at the record's current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    #[serde(flatten)]
    pub stock: StockRecord,
    pub quantity: u32,
    pub avg_price: f64,
    pub total_value: f64,
    pub profit_loss: f64,
    pub profit_loss_percent: f64,
}

impl Holding {
    pub fn new(stock: StockRecord, quantity: u32, avg_price: f64) -> Self {
        let qty = f64::from(quantity);
        let cost = avg_price * qty;
        let total_value = stock.price * qty;
        let profit_loss = total_value - cost;
        Self {
            stock,
            quantity,
            avg_price,
            total_value,
            profit_loss,
            profit_loss_percent: percent(profit_loss, cost),
        }
    }

    pub fn cost(&self) -> f64 {
        self.avg_price * f64::from(self.quantity)
    }
}

/// `part / whole` as a percentage rounded to 2 places; 0 when `whole` is 0.
pub(crate) fn percent(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    (part / whole * 10_000.0).round() / 100.0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Watchlist {
    stocks: Vec<StockRecord>,
}

impl Watchlist {
    pub fn new(stocks: Vec<StockRecord>) -> Self {
        Self { stocks }
    }

    pub fn stocks(&self) -> &[StockRecord] {
        &self.stocks
    }

    /// Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.stocks.len();
        self.stocks.retain(|s| s.id != id);
        self.stocks.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;

    #[test]
    fn holding_values_position_at_current_price() {
        let naver = sample::recommended_stocks().remove(2);
        let h = Holding::new(naver, 10, 205_000.0);
        assert_eq!(h.total_value, 1_985_000.0);
        assert_eq!(h.cost(), 2_050_000.0);
        assert_eq!(h.profit_loss, -65_000.0);
        assert_eq!(h.profit_loss_percent, -3.17);
    }

    #[test]
    fn zero_cost_position_has_zero_percent() {
        let stock = sample::recommended_stocks().remove(0);
        assert_eq!(Holding::new(stock, 0, 68_000.0).profit_loss_percent, 0.0);
    }

    #[test]
    fn watchlist_remove_reports_change() {
        let mut w = Watchlist::new(sample::recommended_stocks());
        assert!(w.remove("2"));
        assert!(!w.remove("2"));
        assert_eq!(w.stocks().len(), 3);
    }
}
