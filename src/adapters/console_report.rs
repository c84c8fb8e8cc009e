//! Fixed-format text summary.

use crate::domain::error::PairsError;
use crate::domain::metrics::SummaryStatistics;
use crate::domain::report::BacktestReport;
use crate::ports::report_port::ReportPort;
use std::cell::RefCell;
use std::io::Write;

pub fn format_summary(stats: &SummaryStatistics) -> String {
    let mut out = String::new();
    out.push_str("Pairs Trading Strategy Results\n");
    out.push_str("==============================\n");
    out.push_str(&format!("Total Profit: ${:.2}\n", stats.total_profit));
    out.push_str(&format!("Number of Trades: {}\n", stats.trade_count));
    out.push_str(&format!(
        "Average Profit per Trade: ${:.2}\n",
        stats.average_profit_per_trade
    ));
    out.push_str(&format!("Win Ratio: {:.2}%\n", stats.win_ratio * 100.0));
    out.push_str(&format!(
        "Cumulative Percentage Profit: {:.2}%\n",
        stats.cumulative_percent_profit.unwrap_or(0.0)
    ));
    out
}

/// Writes the summary to any sink, stdout by default.
pub struct ConsoleReport<W: Write> {
    out: RefCell<W>,
}

impl ConsoleReport<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleReport<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> ReportPort for ConsoleReport<W> {
    fn write(&self, report: &BacktestReport) -> Result<(), PairsError> {
        let mut out = self.out.borrow_mut();
        out.write_all(format_summary(&report.statistics).as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
