//! Presentation filler for figures the backend did not send.
//!
//! Everything here is driven by an injected generator so a given seed always produces the
//! same cards. The distributions are display filler, not market data.

use crate::domain::stock::PricePoint;
use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Synthesized day change is drawn from `[-CHANGE_BOUND, CHANGE_BOUND)`.
pub const CHANGE_BOUND: f64 = 5_000.0;

const HISTORY_POINTS: u32 = 7;
const HISTORY_START_RATIO: f64 = 0.85;
const HISTORY_STEP_RATIO: f64 = 0.05;
// Biased upward so the series tends to end near the current price.
const HISTORY_DRIFT: f64 = 0.4;

#[derive(Debug, Clone)]
pub struct Filler<R = StdRng> {
    rng: R,
}

impl Filler<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Filler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Whole-won day change.
    pub fn change(&mut self) -> f64 {
        self.rng.gen_range(-CHANGE_BOUND..CHANGE_BOUND).round()
    }

    /// Monthly closes for the chart on a stock's detail view, ending at `anchor`'s month.
    /// Starts at 85% of `current_price` and random-walks; the last point is pinned to
    /// `current_price`.
    pub fn price_history(&mut self, current_price: f64, anchor: NaiveDate) -> Vec<PricePoint> {
        let mut price = current_price * HISTORY_START_RATIO;
        let mut out = Vec::with_capacity(HISTORY_POINTS as usize);
        for i in 0..HISTORY_POINTS {
            let step = self.rng.gen::<f64>() - HISTORY_DRIFT;
            price += step * current_price * HISTORY_STEP_RATIO;
            let months_back = HISTORY_POINTS - 1 - i;
            out.push(PricePoint {
                date: month_label(anchor, months_back),
                price: (price * 100.0).round() / 100.0,
            });
        }
        if let Some(last) = out.last_mut() {
            last.price = current_price;
        }
        out
    }
}

fn month_label(anchor: NaiveDate, months_back: u32) -> String {
    let month0 = (anchor.month0() + 12 - months_back % 12) % 12;
    format!("{}월", month0 + 1)
}
