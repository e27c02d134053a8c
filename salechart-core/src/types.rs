//! Domain types for the sale chart plus re-exports from `salechart-types`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use salechart_types::{
    ChartConfig, ChartError, DEFAULT_NUM_TICKS, DisplayUnits, MAX_DISPLAY_DECIMALS, PollConfig,
};

/// Arbitrary-precision amount in base units (e.g. wei).
pub type Amount = Decimal;

/// Instant on the chart's time axis.
pub type Timestamp = DateTime<Utc>;

/// Domain over which resampling occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "UncheckedWindow")]
pub struct AuctionWindow {
    begin_time: Timestamp,
    now: Timestamp,
}

#[derive(Deserialize)]
struct UncheckedWindow {
    begin_time: Timestamp,
    now: Timestamp,
}

impl TryFrom<UncheckedWindow> for AuctionWindow {
    type Error = ChartError;

    fn try_from(w: UncheckedWindow) -> Result<Self, Self::Error> {
        Self::new(w.begin_time, w.now)
    }
}

impl AuctionWindow {
    /// Build a window from the auction start and the current instant.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `begin_time` is after `now`.
    pub fn new(begin_time: Timestamp, now: Timestamp) -> Result<Self, ChartError> {
        if begin_time > now {
            return Err(ChartError::InvalidArg(format!(
                "auction window begins at {begin_time} after now {now}"
            )));
        }
        Ok(Self { begin_time, now })
    }

    /// Auction start.
    #[must_use]
    pub const fn begin_time(&self) -> Timestamp {
        self.begin_time
    }

    /// Current instant (right edge of the sampled domain).
    #[must_use]
    pub const fn now(&self) -> Timestamp {
        self.now
    }

    /// Window length in whole milliseconds.
    #[must_use]
    pub fn span_ms(&self) -> i64 {
        (self.now - self.begin_time).num_milliseconds()
    }
}

/// One cumulative raised sample reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RaisedObservation {
    /// Instant the cumulative amount was observed.
    pub time: Timestamp,
    /// Cumulative amount raised up to `time`, in base units.
    pub raised: Amount,
}

impl RaisedObservation {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(time: Timestamp, raised: Amount) -> Self {
        Self { time, raised }
    }
}

/// Raw output unit of the resampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Sample instant.
    pub time: Timestamp,
    /// Auction target at `time`, in base units.
    pub target: Amount,
    /// Backward-filled raised amount at `time`, in base units.
    pub raised: Amount,
}

/// Display-ready point: epoch milliseconds and display-unit numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    /// Epoch milliseconds.
    pub time: i64,
    /// Target in display units.
    pub target: f64,
    /// Raised amount in display units.
    pub raised: f64,
}

/// Aggregate sale status returned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleStatus {
    /// Monotonic counter of everything accounted so far; a change means new purchases.
    pub total_accounted: Amount,
    /// Block the status was computed at, when the backend reports it.
    pub block: Option<u64>,
}
