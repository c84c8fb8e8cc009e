//! Configuration validation.
//!
//! Validates all config fields before a backtest runs.

use crate::domain::config::parse_symbols;
use crate::domain::error::PairsError;
use crate::domain::price::Alignment;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), PairsError> {
    validate_symbols(config)?;
    validate_dates(config)?;
    validate_alpha(config)?;
    Ok(())
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), PairsError> {
    validate_alignment(config)?;
    validate_non_blank(config, "data", "dir")?;
    Ok(())
}

pub fn validate_report_config(config: &dyn ConfigPort) -> Result<(), PairsError> {
    validate_non_blank(config, "report", "chart_path")
}

pub fn validate_all(config: &dyn ConfigPort) -> Result<(), PairsError> {
    validate_all_with_alpha(config, None)
}

/// Like [`validate_all`], but an `alpha_override` replaces the INI `alpha`,
/// which is then not checked at all.
pub fn validate_all_with_alpha(
    config: &dyn ConfigPort,
    alpha_override: Option<f64>,
) -> Result<(), PairsError> {
    validate_symbols(config)?;
    validate_dates(config)?;
    match alpha_override {
        Some(alpha) => check_alpha(Some(alpha))?,
        None => validate_alpha(config)?,
    }
    validate_data_config(config)?;
    validate_report_config(config)?;
    Ok(())
}

fn validate_symbols(config: &dyn ConfigPort) -> Result<(), PairsError> {
    if let Some(list) = config.get_string("backtest", "symbols") {
        return parse_symbols(&list)
            .map(|_| ())
            .map_err(|e| PairsError::ConfigInvalid {
                section: "backtest".to_string(),
                key: "symbols".to_string(),
                reason: e.to_string(),
            });
    }

    let long = non_blank(config.get_string("backtest", "long_symbol"));
    let inverse = non_blank(config.get_string("backtest", "inverse_symbol"));

    match (long, inverse) {
        (None, _) => Err(PairsError::ConfigMissing {
            section: "backtest".to_string(),
            key: "symbols".to_string(),
        }),
        (Some(_), None) => Err(PairsError::ConfigMissing {
            section: "backtest".to_string(),
            key: "inverse_symbol".to_string(),
        }),
        (Some(l), Some(i)) if l.eq_ignore_ascii_case(&i) => Err(PairsError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "inverse_symbol".to_string(),
            reason: "long and inverse symbols must differ".to_string(),
        }),
        _ => Ok(()),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), PairsError> {
    let start_str = config.get_string("backtest", "start_date");
    let end_str = config.get_string("backtest", "end_date");

    let start_date = parse_date(start_str.as_deref(), "start_date")?;
    let end_date = parse_date(end_str.as_deref(), "end_date")?;

    if start_date > end_date {
        return Err(PairsError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "start_date".to_string(),
            reason: "start_date must not be after end_date".to_string(),
        });
    }
    Ok(())
}

pub(crate) fn parse_date(value: Option<&str>, field: &str) -> Result<NaiveDate, PairsError> {
    match value {
        None => Err(PairsError::ConfigMissing {
            section: "backtest".to_string(),
            key: field.to_string(),
        }),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            PairsError::ConfigInvalid {
                section: "backtest".to_string(),
                key: field.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", field),
            }
        }),
    }
}

fn validate_alpha(config: &dyn ConfigPort) -> Result<(), PairsError> {
    let Some(raw) = config.get_string("backtest", "alpha") else {
        return Ok(());
    };
    check_alpha(raw.trim().parse::<f64>().ok())
}

/// `alpha` must be a finite, strictly positive number.
pub(crate) fn check_alpha(value: Option<f64>) -> Result<(), PairsError> {
    match value {
        Some(a) if a.is_finite() && a > 0.0 => Ok(()),
        _ => Err(PairsError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "alpha".to_string(),
            reason: "alpha must be a positive number".to_string(),
        }),
    }
}

fn validate_alignment(config: &dyn ConfigPort) -> Result<(), PairsError> {
    match config.get_string("data", "alignment") {
        None => Ok(()),
        Some(s) => s
            .parse::<Alignment>()
            .map(|_| ())
            .map_err(|reason| PairsError::ConfigInvalid {
                section: "data".to_string(),
                key: "alignment".to_string(),
                reason,
            }),
    }
}

fn validate_non_blank(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), PairsError> {
    match config.get_string(section, key) {
        Some(s) if s.trim().is_empty() => Err(PairsError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("{} must not be empty", key),
        }),
        _ => Ok(()),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
