//! Report generation port trait.

use crate::domain::error::PairsError;
use crate::domain::report::BacktestReport;

/// Port for emitting a finished backtest.
pub trait ReportPort {
    fn write(&self, report: &BacktestReport) -> Result<(), PairsError>;
}
