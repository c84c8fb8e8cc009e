//! Price data access port trait.

use crate::domain::error::PairsError;
use crate::domain::price::PriceSeries;
use chrono::NaiveDate;

pub trait DataPort {
    /// Adjusted daily closes for `symbol` within `[start_date, end_date]`,
    /// ascending by date.
    fn fetch_closes(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, PairsError>;

    /// First date, last date and row count available for `symbol`.
    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, PairsError>;
}
