//! Buy-and-hold benchmark curve.
//!
//! Daily percentage changes of the benchmark close, summed cumulatively and
//! scaled to percent. The first day has no prior close, so the curve starts
//! on the second day.

use crate::domain::metrics::CurvePoint;
use crate::domain::price::PriceSeries;

pub fn cumulative_percent_returns(series: &PriceSeries) -> Vec<CurvePoint> {
    series
        .points()
        .windows(2)
        .scan(0.0_f64, |running, w| {
            *running += (w[1].price - w[0].price) / w[0].price;
            Some(CurvePoint {
                date: w[1].date,
                value: *running * 100.0,
            })
        })
        .collect()
}
