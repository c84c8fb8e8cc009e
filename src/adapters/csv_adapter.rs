//! CSV file data adapter.
//!
//! Reads `<base_path>/<SYMBOL>.csv`, falling back to a case-insensitive match
//! on the file name (`spy.csv` serves `SPY`). The header must contain a `date` column
//! and a price column; adjusted close is preferred over raw close:
//!
//! ```text
//! Date,Open,High,Low,Close,Adj Close,Volume
//! 2010-01-04,112.37,113.39,111.51,113.33,90.79,118944600
//! ```
//!
//! Rows whose price cell is empty or `null` (market holidays in some exports)
//! are skipped.

use crate::domain::error::{AcquisitionError, PairsError};
use crate::domain::price::{PricePoint, PriceSeries};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs::{self, File};
use std::path::PathBuf;
use tracing::debug;

const PRICE_COLUMNS: [&str; 4] = ["adj close", "adj_close", "adjclose", "close"];

pub struct CsvAdapter {
    base_path: PathBuf,
}

struct Columns {
    date: usize,
    price: usize,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        let file_name = format!("{}.csv", symbol);
        let exact = self.base_path.join(&file_name);
        if exact.is_file() {
            return exact;
        }

        fs::read_dir(&self.base_path)
            .ok()
            .and_then(|entries| {
                entries.filter_map(Result::ok).map(|e| e.path()).find(|p| {
                    p.file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.eq_ignore_ascii_case(&file_name))
                })
            })
            .unwrap_or(exact)
    }

    fn open(&self, symbol: &str) -> Result<csv::Reader<File>, AcquisitionError> {
        let path = self.csv_path(symbol);
        let file = File::open(&path).map_err(|e| AcquisitionError::Unreachable {
            symbol: symbol.to_string(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        Ok(csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file))
    }

    fn locate_columns(
        symbol: &str,
        rdr: &mut csv::Reader<File>,
    ) -> Result<Columns, AcquisitionError> {
        let headers = rdr.headers().map_err(|e| malformed(symbol, format!("CSV header error: {}", e)))?;
        let names: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();

        let date = names
            .iter()
            .position(|h| h == "date")
            .ok_or_else(|| malformed(symbol, "missing date column".into()))?;
        let price = PRICE_COLUMNS
            .iter()
            .find_map(|wanted| names.iter().position(|h| h == wanted))
            .ok_or_else(|| malformed(symbol, "missing close column".into()))?;

        Ok(Columns { date, price })
    }

    /// Every priced row in the file, sorted by date.
    fn read_rows(&self, symbol: &str) -> Result<Vec<PricePoint>, AcquisitionError> {
        let mut rdr = self.open(symbol)?;
        let columns = Self::locate_columns(symbol, &mut rdr)?;
        let mut points = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| malformed(symbol, format!("CSV parse error: {}", e)))?;

            let date_str = record
                .get(columns.date)
                .ok_or_else(|| malformed(symbol, "missing date value".into()))?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
                .map_err(|e| malformed(symbol, format!("invalid date '{}': {}", date_str, e)))?;

            let price_str = record.get(columns.price).unwrap_or_default();
            if price_str.is_empty() || price_str.eq_ignore_ascii_case("null") {
                debug!(symbol, %date, "skipping row without a price");
                continue;
            }
            let price: f64 = price_str
                .parse()
                .map_err(|e| malformed(symbol, format!("invalid price '{}' on {}: {}", price_str, date, e)))?;

            points.push(PricePoint { date, price });
        }

        points.sort_by_key(|p| p.date);
        Ok(points)
    }
}

fn malformed(symbol: &str, reason: String) -> AcquisitionError {
    AcquisitionError::Malformed {
        symbol: symbol.to_string(),
        reason,
    }
}

impl DataPort for CsvAdapter {
    fn fetch_closes(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, PairsError> {
        let points: Vec<PricePoint> = self
            .read_rows(symbol)?
            .into_iter()
            .filter(|p| p.date >= start_date && p.date <= end_date)
            .collect();

        if points.is_empty() {
            return Err(AcquisitionError::NoData {
                symbol: symbol.to_string(),
                start: start_date,
                end: end_date,
            }
            .into());
        }

        Ok(PriceSeries::new(symbol, points)?)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, PairsError> {
        let points = self.read_rows(symbol)?;
        Ok(match (points.first(), points.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date, points.len())),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        fs::write(
            path.join("SPY.csv"),
            "Date,Open,High,Low,Close,Adj Close,Volume\n\
             2024-01-03,101.0,102.0,100.0,101.5,99.5,1000\n\
             2024-01-02,100.0,101.0,99.0,100.5,98.5,1000\n\
             2024-01-04,102.0,103.0,101.0,102.5,100.5,1000\n",
        )
        .unwrap();
        fs::write(
            path.join("SH.csv"),
            "date,close\n2024-01-02,50.0\n2024-01-03,null\n2024-01-04,49.0\n",
        )
        .unwrap();
        fs::write(path.join("EMPTY.csv"), "date,close\n").unwrap();
        fs::write(path.join("NODATE.csv"), "day,close\n2024-01-02,1.0\n").unwrap();
        fs::write(path.join("BADPX.csv"), "date,close\n2024-01-02,abc\n").unwrap();
        fs::write(path.join("DUP.csv"), "date,close\n2024-01-02,1.0\n2024-01-02,2.0\n").unwrap();

        (dir, path)
    }

    #[test]
    fn prefers_adjusted_close_and_sorts_by_date() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let series = adapter
            .fetch_closes("SPY", date(2024, 1, 1), date(2024, 1, 31))
            .unwrap();

        assert_eq!(series.symbol(), "SPY");
        assert_eq!(series.len(), 3);
        assert_eq!(series.points()[0].date, date(2024, 1, 2));
        assert_eq!(series.points()[0].price, 98.5);
        assert_eq!(series.points()[2].price, 100.5);
    }

    #[test]
    fn filters_inclusive_range() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let series = adapter
            .fetch_closes("SPY", date(2024, 1, 3), date(2024, 1, 4))
            .unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.first_date(), Some(date(2024, 1, 3)));
        assert_eq!(series.last_date(), Some(date(2024, 1, 4)));
    }

    #[test]
    fn skips_null_prices() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let series = adapter
            .fetch_closes("SH", date(2024, 1, 1), date(2024, 1, 31))
            .unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[1].date, date(2024, 1, 4));
    }

    #[test]
    fn lower_case_file_name_is_found() {
        let (_dir, path) = setup_test_data();
        fs::write(path.join("qqq.csv"), "date,close\n2024-01-02,400.0\n").unwrap();
        let adapter = CsvAdapter::new(path);

        let series = adapter
            .fetch_closes("QQQ", date(2024, 1, 1), date(2024, 1, 31))
            .unwrap();
        assert_eq!(series.symbol(), "QQQ");
        assert_eq!(series.len(), 1);
        assert_eq!(adapter.get_data_range("QQQ").unwrap().map(|r| r.2), Some(1));
    }

    #[test]
    fn missing_file_is_unreachable() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let err = adapter
            .fetch_closes("QQQ", date(2024, 1, 1), date(2024, 1, 31))
            .unwrap_err();
        assert!(matches!(
            err,
            PairsError::Acquisition(AcquisitionError::Unreachable { .. })
        ));
    }

    #[test]
    fn no_rows_in_range_is_no_data() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let err = adapter
            .fetch_closes("SPY", date(2023, 1, 1), date(2023, 12, 31))
            .unwrap_err();
        assert!(matches!(
            err,
            PairsError::Acquisition(AcquisitionError::NoData { .. })
        ));

        let err = adapter
            .fetch_closes("EMPTY", date(2024, 1, 1), date(2024, 1, 31))
            .unwrap_err();
        assert!(matches!(
            err,
            PairsError::Acquisition(AcquisitionError::NoData { .. })
        ));
    }

    #[test]
    fn missing_date_column_is_malformed() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let err = adapter
            .fetch_closes("NODATE", date(2024, 1, 1), date(2024, 1, 31))
            .unwrap_err();
        assert!(matches!(
            err,
            PairsError::Acquisition(AcquisitionError::Malformed { ref reason, .. }) if reason.contains("date column")
        ));
    }

    #[test]
    fn unparseable_price_is_malformed() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let err = adapter
            .fetch_closes("BADPX", date(2024, 1, 1), date(2024, 1, 31))
            .unwrap_err();
        assert!(matches!(
            err,
            PairsError::Acquisition(AcquisitionError::Malformed { .. })
        ));
    }

    #[test]
    fn duplicate_dates_are_rejected() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let err = adapter
            .fetch_closes("DUP", date(2024, 1, 1), date(2024, 1, 31))
            .unwrap_err();
        assert!(matches!(
            err,
            PairsError::Acquisition(AcquisitionError::Unordered { .. })
        ));
    }

    #[test]
    fn data_range_reports_span_and_count() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        assert_eq!(
            adapter.get_data_range("SPY").unwrap(),
            Some((date(2024, 1, 2), date(2024, 1, 4), 3))
        );
        assert_eq!(adapter.get_data_range("EMPTY").unwrap(), None);
    }
}
