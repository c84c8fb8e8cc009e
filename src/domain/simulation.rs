//! Pairs strategy state machine.
//!
//! One forward pass over the aligned frame, folding a
//! `(PositionState, TradeLog)` accumulator through [`step`] once per day from
//! index 1 onward:
//!
//! - `Flat -> ShortInverse` when both instruments closed higher than the day
//!   before; the inverse close becomes the entry price.
//! - `ShortInverse -> Flat` when `alpha * inverse_close < entry_price`; a
//!   [`TradeRecord`] is emitted.
//!
//! A position still open when the data runs out is discarded without a
//! record. Only closed trades count; the outcome keeps the final state so
//! callers can report it.

use crate::domain::config::PairsConfig;
use crate::domain::position::PositionState;
use crate::domain::price::{AlignedPriceFrame, DailyObservation};
use crate::domain::trade::{TradeLog, TradeRecord};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pub trades: TradeLog,
    /// State after the last day. `ShortInverse` here means an open position
    /// that produced no trade record.
    pub final_state: PositionState,
    pub days_evaluated: usize,
}

impl SimulationOutcome {
    pub fn has_open_position(&self) -> bool {
        !self.final_state.is_flat()
    }
}

/// Both instruments moved up on the same day.
pub fn entry_signal(obs: &DailyObservation) -> bool {
    obs.long_today > obs.long_yesterday && obs.inv_today > obs.inv_yesterday
}

pub fn exit_signal(obs: &DailyObservation, entry_price: f64, alpha: f64) -> bool {
    alpha * obs.inv_today < entry_price
}

/// Single-day transition. At most one state change per day, so an entry is
/// never exited on the day it was opened.
pub fn step(
    state: PositionState,
    obs: &DailyObservation,
    alpha: f64,
) -> (PositionState, Option<TradeRecord>) {
    match state {
        PositionState::Flat if entry_signal(obs) => {
            debug!(date = %obs.date, price = obs.inv_today, "enter short inverse");
            (
                PositionState::ShortInverse {
                    entry_price: obs.inv_today,
                    entry_date: obs.date,
                },
                None,
            )
        }
        PositionState::ShortInverse {
            entry_price,
            entry_date,
        } if exit_signal(obs, entry_price, alpha) => {
            let trade = TradeRecord::close(entry_date, entry_price, obs.date, obs.inv_today);
            debug!(
                date = %obs.date,
                entry_price,
                exit_price = obs.inv_today,
                profit = trade.profit(),
                holding_days = trade.holding_days(),
                "exit short inverse"
            );
            (PositionState::Flat, Some(trade))
        }
        unchanged => (unchanged, None),
    }
}

pub fn simulate(frame: &AlignedPriceFrame, alpha: f64) -> SimulationOutcome {
    let (final_state, trades, days_evaluated) = frame.observations().fold(
        (PositionState::Flat, TradeLog::new(), 0usize),
        |(state, mut trades, days), obs| {
            let (next, closed) = step(state, &obs, alpha);
            if let Some(trade) = closed {
                trades.record(trade);
            }
            (next, trades, days + 1)
        },
    );

    SimulationOutcome {
        trades,
        final_state,
        days_evaluated,
    }
}

/// Simulation entry point for a configured run.
pub fn run_simulation(frame: &AlignedPriceFrame, config: &PairsConfig) -> SimulationOutcome {
    info!(
        days = frame.len(),
        long = frame.long_symbol(),
        inverse = frame.inverse_symbol(),
        alpha = config.alpha,
        "running pairs simulation"
    );

    let outcome = simulate(frame, config.alpha);

    if let PositionState::ShortInverse {
        entry_price,
        entry_date,
    } = outcome.final_state
    {
        let unrealized = frame
            .inverse_prices()
            .last()
            .and_then(|&last| outcome.final_state.unrealized_profit(last));
        warn!(
            %entry_date,
            entry_price,
            ?unrealized,
            "position still open at end of data; discarded without a trade record"
        );
    }

    info!(
        trades = outcome.trades.len(),
        days = outcome.days_evaluated,
        "simulation complete"
    );
    outcome
}
