//! Fetch both instruments and align them on one date index.

use crate::domain::config::PairsConfig;
use crate::domain::error::{AcquisitionError, PairsError};
use crate::domain::price::{AlignedPriceFrame, Alignment, PriceSeries};
use crate::ports::data_port::DataPort;
use tracing::info;

pub fn fetch_aligned(
    data_port: &dyn DataPort,
    config: &PairsConfig,
    alignment: Alignment,
) -> Result<AlignedPriceFrame, PairsError> {
    let long = fetch_non_empty(data_port, &config.long_symbol, config)?;
    let inverse = fetch_non_empty(data_port, &config.inverse_symbol, config)?;

    let frame = AlignedPriceFrame::align(&long, &inverse, alignment)?;
    info!(
        rows = frame.len(),
        %alignment,
        "aligned {} and {}",
        frame.long_symbol(),
        frame.inverse_symbol()
    );
    Ok(frame)
}

fn fetch_non_empty(
    data_port: &dyn DataPort,
    symbol: &str,
    config: &PairsConfig,
) -> Result<PriceSeries, PairsError> {
    let series = data_port.fetch_closes(symbol, config.start_date, config.end_date)?;
    if series.is_empty() {
        return Err(AcquisitionError::NoData {
            symbol: symbol.to_string(),
            start: config.start_date,
            end: config.end_date,
        }
        .into());
    }
    info!(
        symbol,
        rows = series.len(),
        first = ?series.first_date(),
        last = ?series.last_date(),
        "fetched closes"
    );
    Ok(series)
}
