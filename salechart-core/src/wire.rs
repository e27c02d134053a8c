//! Backend payload shapes and their conversion into domain types.
//!
//! Amounts arrive as decimal strings (wei values overflow JSON doubles) or as
//! plain unsigned integers. Timestamps arrive as RFC 3339 strings or epoch
//! milliseconds.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Amount, ChartError, RaisedObservation, SaleStatus, Timestamp};

/// Amount as sent by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    /// Unsigned integer in base units.
    Integer(u64),
    /// Decimal string in base units.
    Text(String),
}

/// Timestamp as sent by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTime {
    /// Milliseconds since the Unix epoch.
    Millis(i64),
    /// RFC 3339 date-time string.
    Text(String),
}

/// One entry of the backend's chart-data response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawObservation {
    /// Observation instant.
    pub time: RawTime,
    /// Cumulative amount accounted at `time`.
    pub total_accounted: RawAmount,
}

/// The backend's status response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStatus {
    /// Monotonic total accounted so far.
    pub total_accounted: RawAmount,
    /// Block number the status refers to.
    #[serde(default)]
    pub block: Option<u64>,
}

impl RawAmount {
    /// Parse into a non-negative base-unit amount.
    ///
    /// # Errors
    /// Returns `ChartError::Data` for unparsable or negative values.
    pub fn parse(&self) -> Result<Amount, ChartError> {
        let value = match self {
            RawAmount::Integer(v) => Decimal::from(*v),
            RawAmount::Text(s) => Decimal::from_str(s.trim())
                .map_err(|e| ChartError::data(format!("invalid amount {s:?}: {e}")))?,
        };
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ChartError::data(format!("negative amount {value}")));
        }
        Ok(value)
    }
}

impl RawTime {
    /// Parse into a UTC instant.
    ///
    /// # Errors
    /// Returns `ChartError::Data` for unparsable or out-of-range values.
    pub fn parse(&self) -> Result<Timestamp, ChartError> {
        match self {
            RawTime::Millis(ms) => DateTime::from_timestamp_millis(*ms)
                .ok_or_else(|| ChartError::data(format!("timestamp {ms}ms out of range"))),
            RawTime::Text(s) => DateTime::parse_from_rfc3339(s.trim())
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| ChartError::data(format!("invalid timestamp {s:?}: {e}"))),
        }
    }
}

impl TryFrom<RawObservation> for RaisedObservation {
    type Error = ChartError;

    fn try_from(raw: RawObservation) -> Result<Self, Self::Error> {
        Ok(Self {
            time: raw.time.parse()?,
            raised: raw.total_accounted.parse()?,
        })
    }
}

impl TryFrom<RawStatus> for SaleStatus {
    type Error = ChartError;

    fn try_from(raw: RawStatus) -> Result<Self, Self::Error> {
        Ok(Self {
            total_accounted: raw.total_accounted.parse()?,
            block: raw.block,
        })
    }
}

/// Convert a full chart-data response, failing on the first malformed entry.
///
/// # Errors
/// Returns `ChartError::Data` naming the offending amount or timestamp.
pub fn parse_observations<I>(raw: I) -> Result<Vec<RaisedObservation>, ChartError>
where
    I: IntoIterator<Item = RawObservation>,
{
    raw.into_iter().map(RaisedObservation::try_from).collect()
}
