//! Closed trade records and the append-only trade log.

use chrono::NaiveDate;

/// One completed short-inverse round trip. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    entry_date: NaiveDate,
    exit_date: NaiveDate,
    entry_price: f64,
    exit_price: f64,
    profit: f64,
    percent_profit: f64,
}

impl TradeRecord {
    /// `profit = entry - exit` (short payoff), `percent_profit = profit / entry * 100`.
    pub fn close(
        entry_date: NaiveDate,
        entry_price: f64,
        exit_date: NaiveDate,
        exit_price: f64,
    ) -> Self {
        let profit = entry_price - exit_price;
        Self {
            entry_date,
            exit_date,
            entry_price,
            exit_price,
            profit,
            percent_profit: profit / entry_price * 100.0,
        }
    }

    pub fn entry_date(&self) -> NaiveDate {
        self.entry_date
    }

    pub fn exit_date(&self) -> NaiveDate {
        self.exit_date
    }

    pub fn entry_price(&self) -> f64 {
        self.entry_price
    }

    pub fn exit_price(&self) -> f64 {
        self.exit_price
    }

    pub fn profit(&self) -> f64 {
        self.profit
    }

    pub fn percent_profit(&self) -> f64 {
        self.percent_profit
    }

    pub fn holding_days(&self) -> i64 {
        (self.exit_date - self.entry_date).num_days()
    }

    pub fn is_win(&self) -> bool {
        self.profit > 0.0
    }
}

/// Trades in exit order. Records can be appended but never changed or removed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TradeLog {
    trades: Vec<TradeRecord>,
}

impl TradeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, trade: TradeRecord) {
        self.trades.push(trade);
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TradeRecord> {
        self.trades.iter()
    }

    pub fn as_slice(&self) -> &[TradeRecord] {
        &self.trades
    }
}

impl<'a> IntoIterator for &'a TradeLog {
    type Item = &'a TradeRecord;
    type IntoIter = std::slice::Iter<'a, TradeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.trades.iter()
    }
}

impl FromIterator<TradeRecord> for TradeLog {
    fn from_iter<I: IntoIterator<Item = TradeRecord>>(iter: I) -> Self {
        Self {
            trades: iter.into_iter().collect(),
        }
    }
}
