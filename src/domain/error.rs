//! Domain error types.

use chrono::NaiveDate;

/// Failure to produce an aligned price frame. Always fatal to a run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AcquisitionError {
    #[error("data source unreachable for {symbol}: {reason}")]
    Unreachable { symbol: String, reason: String },

    #[error("malformed price data for {symbol}: {reason}")]
    Malformed { symbol: String, reason: String },

    #[error("no data for {symbol} between {start} and {end}")]
    NoData {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("invalid price {price} for {symbol} on {date}")]
    InvalidPrice {
        symbol: String,
        date: NaiveDate,
        price: f64,
    },

    #[error("dates for {symbol} are not strictly ascending at {date}")]
    Unordered { symbol: String, date: NaiveDate },

    #[error("{long} and {inverse} are misaligned: {reason}")]
    Misaligned {
        long: String,
        inverse: String,
        reason: String,
    },

    #[error("{long} and {inverse} share no trading dates")]
    NoOverlap { long: String, inverse: String },
}

/// Top-level error type for pairtrader.
#[derive(Debug, thiserror::Error)]
pub enum PairsError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PairsError> for std::process::ExitCode {
    fn from(err: &PairsError) -> Self {
        let code: u8 = match err {
            PairsError::Io(_) | PairsError::Report { .. } => 1,
            PairsError::ConfigParse { .. }
            | PairsError::ConfigMissing { .. }
            | PairsError::ConfigInvalid { .. } => 2,
            PairsError::Acquisition(_) => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::ExitCode;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn no_data_message_names_range() {
        let err = AcquisitionError::NoData {
            symbol: "SPY".into(),
            start: date(2010, 1, 1),
            end: date(2021, 12, 31),
        };
        assert_eq!(
            err.to_string(),
            "no data for SPY between 2010-01-01 and 2021-12-31"
        );
    }

    #[test]
    fn acquisition_error_converts_transparently() {
        let err: PairsError = AcquisitionError::NoOverlap {
            long: "SPY".into(),
            inverse: "SH".into(),
        }
        .into();
        assert_eq!(err.to_string(), "SPY and SH share no trading dates");
    }

    #[test]
    fn exit_codes_by_category() {
        let config = PairsError::ConfigMissing {
            section: "backtest".into(),
            key: "alpha".into(),
        };
        let acquisition = PairsError::from(AcquisitionError::Unreachable {
            symbol: "SH".into(),
            reason: "no such file".into(),
        });
        let report = PairsError::Report {
            reason: "disk full".into(),
        };
        let code = |e: &PairsError| format!("{:?}", ExitCode::from(e));
        assert_eq!(code(&config), format!("{:?}", ExitCode::from(2)));
        assert_eq!(code(&acquisition), format!("{:?}", ExitCode::from(5)));
        assert_eq!(code(&report), format!("{:?}", ExitCode::from(1)));
    }
}
