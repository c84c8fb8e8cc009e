#![allow(dead_code)]

use chrono::NaiveDate;
use pairtrader::domain::config::PairsConfig;
use pairtrader::domain::error::{AcquisitionError, PairsError};
use pairtrader::domain::price::{PricePoint, PriceSeries};
use pairtrader::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PricePoint>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_closes(mut self, symbol: &str, points: Vec<PricePoint>) -> Self {
        self.data.insert(symbol.to_string(), points);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }

    fn check(&self, symbol: &str) -> Result<(), PairsError> {
        match self.errors.get(symbol) {
            Some(reason) => Err(AcquisitionError::Unreachable {
                symbol: symbol.to_string(),
                reason: reason.clone(),
            }
            .into()),
            None => Ok(()),
        }
    }
}

impl DataPort for MockDataPort {
    fn fetch_closes(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, PairsError> {
        self.check(symbol)?;
        let points = self
            .data
            .get(symbol)
            .map(|points| {
                points
                    .iter()
                    .filter(|p| p.date >= start_date && p.date <= end_date)
                    .copied()
                    .collect()
            })
            .unwrap_or_default();
        Ok(PriceSeries::new(symbol, points)?)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, PairsError> {
        self.check(symbol)?;
        Ok(match self.data.get(symbol) {
            Some(points) if !points.is_empty() => {
                let min = points.iter().map(|p| p.date).min().unwrap();
                let max = points.iter().map(|p| p.date).max().unwrap();
                Some((min, max, points.len()))
            }
            _ => None,
        })
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Consecutive calendar days starting 2024-01-01, one per price.
pub fn closes(prices: &[f64]) -> Vec<PricePoint> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| PricePoint {
            date: date(2024, 1, 1) + chrono::Duration::days(i as i64),
            price,
        })
        .collect()
}

pub fn pair_port(long: &[f64], inverse: &[f64]) -> MockDataPort {
    MockDataPort::new()
        .with_closes("SPY", closes(long))
        .with_closes("SH", closes(inverse))
}

pub fn sample_config() -> PairsConfig {
    PairsConfig {
        long_symbol: "SPY".into(),
        inverse_symbol: "SH".into(),
        start_date: date(2024, 1, 1),
        end_date: date(2024, 12, 31),
        alpha: 1.05,
    }
}

pub fn csv_contents(points: &[PricePoint]) -> String {
    let mut out = String::from("Date,Open,High,Low,Close,Adj Close,Volume\n");
    for p in points {
        out.push_str(&format!(
            "{},{:.2},{:.2},{:.2},{:.2},{},1000\n",
            p.date, p.price, p.price, p.price, p.price, p.price
        ));
    }
    out
}
