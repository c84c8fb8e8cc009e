//! Summary statistics over the trade log.

use crate::domain::trade::TradeLog;
use chrono::NaiveDate;

/// A dated value on a cumulative-percentage curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Derived from a [`TradeLog`]; recomputed, never updated in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryStatistics {
    pub total_profit: f64,
    pub trade_count: usize,
    pub average_profit_per_trade: f64,
    /// Fraction in `[0, 1]`.
    pub win_ratio: f64,
    /// Sum of per-trade percent profits. `None` when no trades closed.
    pub cumulative_percent_profit: Option<f64>,
}

impl SummaryStatistics {
    pub fn compute(trades: &TradeLog) -> Self {
        if trades.is_empty() {
            return Self::default();
        }

        let trade_count = trades.len();
        let total_profit: f64 = trades.iter().map(|t| t.profit()).sum();
        let wins = trades.iter().filter(|t| t.is_win()).count();
        let cumulative = cumulative_percent_curve(trades)
            .last()
            .map(|p| p.value);

        Self {
            total_profit,
            trade_count,
            average_profit_per_trade: total_profit / trade_count as f64,
            win_ratio: wins as f64 / trade_count as f64,
            cumulative_percent_profit: cumulative,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.trade_count == 0
    }
}

/// Running sum of percent profit, one point per trade at its exit date.
pub fn cumulative_percent_curve(trades: &TradeLog) -> Vec<CurvePoint> {
    trades
        .iter()
        .scan(0.0_f64, |running, trade| {
            *running += trade.percent_profit();
            Some(CurvePoint {
                date: trade.exit_date(),
                value: *running,
            })
        })
        .collect()
}
