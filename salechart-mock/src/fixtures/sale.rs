use chrono::{DateTime, TimeDelta};
use rust_decimal::Decimal;
use salechart_core::{
    ChartError, RaisedObservation, RawObservation, RawStatus, SaleStatus, Timestamp,
    parse_observations,
};

/// 2024-03-01T12:00:00Z
pub const SALE_BEGIN_MS: i64 = 1_709_294_400_000;
/// Six hours into the sale.
pub const SALE_NOW_MS: i64 = SALE_BEGIN_MS + 6 * 3_600_000;

const HISTORY_JSON: &str = r#"[
    {"time": "2024-03-01T12:00:00Z", "totalAccounted": 0},
    {"time": "2024-03-01T12:20:00Z", "totalAccounted": "1500000000000000000000"},
    {"time": "2024-03-01T13:05:30Z", "totalAccounted": "4200000000000000000000"},
    {"time": 1709302200000, "totalAccounted": "6875500000000000000000"},
    {"time": "2024-03-01T15:45:12Z", "totalAccounted": "9100000000000000000000"},
    {"time": "2024-03-01T17:52:40Z", "totalAccounted": "11230250000000000000000"}
]"#;

const STATUS_JSON: &str = r#"{"totalAccounted": "11230250000000000000000", "block": 19350000}"#;

/// One ether in wei.
pub fn wei_per_ether() -> Decimal {
    Decimal::from(1_000_000_000_000_000_000i64)
}

pub fn begin() -> Timestamp {
    DateTime::from_timestamp_millis(SALE_BEGIN_MS).unwrap_or_default()
}

pub fn now() -> Timestamp {
    begin() + TimeDelta::hours(6)
}

pub fn history() -> Result<Vec<RaisedObservation>, ChartError> {
    let raw: Vec<RawObservation> = serde_json::from_str(HISTORY_JSON)
        .map_err(|e| ChartError::data(format!("history fixture: {e}")))?;
    parse_observations(raw)
}

pub fn status() -> Result<SaleStatus, ChartError> {
    let raw: RawStatus = serde_json::from_str(STATUS_JSON)
        .map_err(|e| ChartError::data(format!("status fixture: {e}")))?;
    SaleStatus::try_from(raw)
}
