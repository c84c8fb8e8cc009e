//! SVG chart report adapter implementing ReportPort.

use std::fs;
use std::path::{Path, PathBuf};

use crate::adapters::chart_svg::generate_comparison_svg;
use crate::domain::error::PairsError;
use crate::domain::report::BacktestReport;
use crate::ports::report_port::ReportPort;
use tracing::{info, warn};

pub const DEFAULT_CHART_PATH: &str = "pairs_trading.svg";

pub struct SvgReportAdapter {
    output_path: PathBuf,
}

impl SvgReportAdapter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

impl Default for SvgReportAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_CHART_PATH)
    }
}

impl ReportPort for SvgReportAdapter {
    fn write(&self, report: &BacktestReport) -> Result<(), PairsError> {
        let svg = generate_comparison_svg(
            &report.strategy_curve,
            &report.benchmark_symbol,
            &report.benchmark_curve,
        );
        if svg.is_empty() {
            warn!("nothing to chart; skipping {}", self.output_path.display());
            return Ok(());
        }

        if let Some(parent) = self.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.output_path, svg).map_err(|e| PairsError::Report {
            reason: format!("failed to write {}: {}", self.output_path.display(), e),
        })?;

        info!("chart written to {}", self.output_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::PairsConfig;
    use crate::domain::metrics::{CurvePoint, SummaryStatistics};
    use crate::domain::position::PositionState;
    use crate::domain::simulation::SimulationOutcome;
    use crate::domain::trade::TradeLog;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn report(benchmark_curve: Vec<CurvePoint>) -> BacktestReport {
        BacktestReport {
            config: PairsConfig {
                long_symbol: "SPY".into(),
                inverse_symbol: "SH".into(),
                start_date: date(1),
                end_date: date(31),
                alpha: 1.05,
            },
            statistics: SummaryStatistics::default(),
            strategy_curve: Vec::new(),
            benchmark_symbol: "SPY".into(),
            benchmark_curve,
            outcome: SimulationOutcome {
                trades: TradeLog::new(),
                final_state: PositionState::Flat,
                days_evaluated: 0,
            },
        }
    }

    #[test]
    fn writes_chart_creating_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("chart.svg");
        let adapter = SvgReportAdapter::new(&path);

        adapter
            .write(&report(vec![
                CurvePoint { date: date(2), value: 1.0 },
                CurvePoint { date: date(3), value: 0.5 },
            ]))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Pairs Trading Strategy vs. Benchmark"));
        assert!(content.contains(">SPY</text>"));
    }

    #[test]
    fn empty_curves_write_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.svg");
        SvgReportAdapter::new(&path).write(&report(Vec::new())).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn default_path() {
        assert_eq!(
            SvgReportAdapter::default().output_path(),
            Path::new(DEFAULT_CHART_PATH)
        );
    }
}
