//! Backtest parameters.

use chrono::NaiveDate;

pub const DEFAULT_ALPHA: f64 = 1.05;

#[derive(Debug, Clone, PartialEq)]
pub struct PairsConfig {
    pub long_symbol: String,
    pub inverse_symbol: String,
    /// Inclusive.
    pub start_date: NaiveDate,
    /// Inclusive.
    pub end_date: NaiveDate,
    /// Exit once `alpha * inverse_price < entry_price`.
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SymbolListError {
    #[error("empty token in symbol list")]
    EmptyToken,

    #[error("expected exactly two symbols (long, inverse), got {0}")]
    WrongCount(usize),

    #[error("long and inverse symbols must differ: {0}")]
    Duplicate(String),
}

/// Parse `"SPY, SH"` into `("SPY", "SH")`: long first, inverse second.
pub fn parse_symbols(input: &str) -> Result<(String, String), SymbolListError> {
    let mut symbols = Vec::new();
    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(SymbolListError::EmptyToken);
        }
        symbols.push(trimmed.to_uppercase());
    }

    match symbols.as_slice() {
        [long, inverse] if long == inverse => Err(SymbolListError::Duplicate(long.clone())),
        [long, inverse] => Ok((long.clone(), inverse.clone())),
        _ => Err(SymbolListError::WrongCount(symbols.len())),
    }
}
