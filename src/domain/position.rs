//! Position state of the pairs strategy.

use chrono::NaiveDate;

/// Market exposure carried between simulated days.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PositionState {
    #[default]
    Flat,
    /// Short the inverse instrument, entered at `entry_price` on `entry_date`.
    ShortInverse {
        entry_price: f64,
        entry_date: NaiveDate,
    },
}

impl PositionState {
    pub fn is_flat(&self) -> bool {
        matches!(self, PositionState::Flat)
    }

    pub fn entry_price(&self) -> Option<f64> {
        match self {
            PositionState::Flat => None,
            PositionState::ShortInverse { entry_price, .. } => Some(*entry_price),
        }
    }

    /// Short payoff at `price`: positive when the inverse has fallen since entry.
    pub fn unrealized_profit(&self, price: f64) -> Option<f64> {
        self.entry_price().map(|entry| entry - price)
    }
}
