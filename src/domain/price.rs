//! Daily close series and the aligned two-instrument frame.
//!
//! A [`PriceSeries`] holds one instrument's closes with strictly ascending,
//! unique dates. An [`AlignedPriceFrame`] pairs the long and inverse series on
//! one shared date index, and hands out [`DailyObservation`]s for the
//! simulation to fold over.

use crate::domain::error::AcquisitionError;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, rejecting unordered or duplicate dates and prices that
    /// are not finite and strictly positive.
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Result<Self, AcquisitionError> {
        let symbol = symbol.into();

        for point in &points {
            if !point.price.is_finite() || point.price <= 0.0 {
                return Err(AcquisitionError::InvalidPrice {
                    symbol,
                    date: point.date,
                    price: point.price,
                });
            }
        }

        if let Some(w) = points.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(AcquisitionError::Unordered {
                symbol,
                date: w[1].date,
            });
        }

        Ok(Self { symbol, points })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

/// How two series with differing date sets are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Every date must appear in both series.
    #[default]
    Strict,
    /// Keep only dates present in both series.
    Intersect,
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(Alignment::Strict),
            "intersect" => Ok(Alignment::Intersect),
            other => Err(format!("unknown alignment '{other}' (expected strict or intersect)")),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alignment::Strict => write!(f, "strict"),
            Alignment::Intersect => write!(f, "intersect"),
        }
    }
}

/// Prices of both instruments on one day and the day before.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyObservation {
    pub date: NaiveDate,
    pub long_today: f64,
    pub long_yesterday: f64,
    pub inv_today: f64,
    pub inv_yesterday: f64,
}

/// Two price series on an identical date index.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPriceFrame {
    long_symbol: String,
    inverse_symbol: String,
    dates: Vec<NaiveDate>,
    long: Vec<f64>,
    inverse: Vec<f64>,
}

impl AlignedPriceFrame {
    pub fn align(
        long: &PriceSeries,
        inverse: &PriceSeries,
        alignment: Alignment,
    ) -> Result<Self, AcquisitionError> {
        let inverse_by_date: BTreeMap<NaiveDate, f64> =
            inverse.points().iter().map(|p| (p.date, p.price)).collect();

        let mut dates = Vec::with_capacity(long.len());
        let mut long_prices = Vec::with_capacity(long.len());
        let mut inverse_prices = Vec::with_capacity(long.len());

        for point in long.points() {
            match inverse_by_date.get(&point.date) {
                Some(&inv) => {
                    dates.push(point.date);
                    long_prices.push(point.price);
                    inverse_prices.push(inv);
                }
                None if alignment == Alignment::Strict => {
                    return Err(AcquisitionError::Misaligned {
                        long: long.symbol().to_string(),
                        inverse: inverse.symbol().to_string(),
                        reason: format!("{} has no price for {}", inverse.symbol(), point.date),
                    });
                }
                None => {}
            }
        }

        if alignment == Alignment::Strict && inverse.len() != dates.len() {
            let missing = inverse
                .points()
                .iter()
                .find(|p| dates.binary_search(&p.date).is_err())
                .map(|p| p.date);
            let reason = match missing {
                Some(d) => format!("{} has no price for {}", long.symbol(), d),
                None => "series lengths differ".to_string(),
            };
            return Err(AcquisitionError::Misaligned {
                long: long.symbol().to_string(),
                inverse: inverse.symbol().to_string(),
                reason,
            });
        }

        if dates.is_empty() {
            return Err(AcquisitionError::NoOverlap {
                long: long.symbol().to_string(),
                inverse: inverse.symbol().to_string(),
            });
        }

        let dropped = long.len() + inverse.len() - 2 * dates.len();
        if dropped > 0 {
            warn!(
                dropped,
                kept = dates.len(),
                "dropped rows not shared by {} and {}",
                long.symbol(),
                inverse.symbol()
            );
        }

        Ok(Self {
            long_symbol: long.symbol().to_string(),
            inverse_symbol: inverse.symbol().to_string(),
            dates,
            long: long_prices,
            inverse: inverse_prices,
        })
    }

    pub fn long_symbol(&self) -> &str {
        &self.long_symbol
    }

    pub fn inverse_symbol(&self) -> &str {
        &self.inverse_symbol
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn long_prices(&self) -> &[f64] {
        &self.long
    }

    pub fn inverse_prices(&self) -> &[f64] {
        &self.inverse
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Observations for indices `1..len`, in date order. Day 0 has no prior
    /// day and never yields an observation.
    pub fn observations(&self) -> impl Iterator<Item = DailyObservation> + '_ {
        (1..self.len()).map(move |i| DailyObservation {
            date: self.dates[i],
            long_today: self.long[i],
            long_yesterday: self.long[i - 1],
            inv_today: self.inverse[i],
            inv_yesterday: self.inverse[i - 1],
        })
    }

    /// The long instrument as a standalone series, used as the benchmark.
    pub fn long_series(&self) -> PriceSeries {
        PriceSeries {
            symbol: self.long_symbol.clone(),
            points: self
                .dates
                .iter()
                .zip(&self.long)
                .map(|(&date, &price)| PricePoint { date, price })
                .collect(),
        }
    }
}
