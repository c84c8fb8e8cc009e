//! Everything a report adapter needs from a finished run.

use crate::domain::benchmark::cumulative_percent_returns;
use crate::domain::config::PairsConfig;
use crate::domain::metrics::{cumulative_percent_curve, CurvePoint, SummaryStatistics};
use crate::domain::price::AlignedPriceFrame;
use crate::domain::simulation::SimulationOutcome;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestReport {
    pub config: PairsConfig,
    pub statistics: SummaryStatistics,
    pub strategy_curve: Vec<CurvePoint>,
    pub benchmark_symbol: String,
    pub benchmark_curve: Vec<CurvePoint>,
    pub outcome: SimulationOutcome,
}

impl BacktestReport {
    /// The long instrument is the benchmark.
    pub fn build(config: &PairsConfig, frame: &AlignedPriceFrame, outcome: SimulationOutcome) -> Self {
        Self {
            config: config.clone(),
            statistics: SummaryStatistics::compute(&outcome.trades),
            strategy_curve: cumulative_percent_curve(&outcome.trades),
            benchmark_symbol: frame.long_symbol().to_string(),
            benchmark_curve: cumulative_percent_returns(&frame.long_series()),
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price::{Alignment, PricePoint, PriceSeries};
    use crate::domain::simulation::simulate;
    use chrono::NaiveDate;

    #[test]
    fn build_collects_both_curves() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let to_series = |symbol: &str, prices: &[f64]| {
            PriceSeries::new(
                symbol,
                prices
                    .iter()
                    .enumerate()
                    .map(|(i, &price)| PricePoint {
                        date: start + chrono::Duration::days(i as i64),
                        price,
                    })
                    .collect(),
            )
            .unwrap()
        };
        let frame = AlignedPriceFrame::align(
            &to_series("SPY", &[100.0, 101.0, 99.0, 98.0]),
            &to_series("SH", &[50.0, 51.0, 49.0, 48.5]),
            Alignment::Strict,
        )
        .unwrap();
        let config = PairsConfig {
            long_symbol: "SPY".into(),
            inverse_symbol: "SH".into(),
            start_date: start,
            end_date: NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
            alpha: 1.05,
        };

        let report = BacktestReport::build(&config, &frame, simulate(&frame, 1.05));

        assert_eq!(report.benchmark_symbol, "SPY");
        assert_eq!(report.benchmark_curve.len(), 3);
        assert_eq!(report.strategy_curve.len(), 1);
        assert_eq!(report.statistics.trade_count, 1);
    }
}
