use rust_decimal::Decimal;

use crate::types::{Amount, RaisedObservation, Timestamp};

/// Raised observations held in descending time order for backward-fill lookup.
///
/// - Input order does not matter; the series is sorted once on construction.
/// - Entries sharing a timestamp are ordered by descending `raised`, so the
///   larger amount wins a lookup at that instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservationSeries {
    desc: Vec<RaisedObservation>,
}

impl ObservationSeries {
    /// Sort `observations` newest first.
    #[must_use]
    pub fn new(mut observations: Vec<RaisedObservation>) -> Self {
        observations.sort_by(|a, b| b.time.cmp(&a.time).then(b.raised.cmp(&a.raised)));
        Self { desc: observations }
    }

    /// Raised amount of the latest observation at or before `t`; zero if none qualifies.
    #[must_use]
    pub fn raised_at(&self, t: Timestamp) -> Amount {
        let idx = self.desc.partition_point(|o| o.time > t);
        self.desc.get(idx).map_or(Decimal::ZERO, |o| o.raised)
    }

    /// Raised amount of the most recent observation; zero for an empty series.
    #[must_use]
    pub fn latest(&self) -> Amount {
        self.desc.first().map_or(Decimal::ZERO, |o| o.raised)
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.desc.len()
    }

    /// True when no observation is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.desc.is_empty()
    }

    /// Observations, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &RaisedObservation> {
        self.desc.iter()
    }
}

impl From<Vec<RaisedObservation>> for ObservationSeries {
    fn from(observations: Vec<RaisedObservation>) -> Self {
        Self::new(observations)
    }
}

impl FromIterator<RaisedObservation> for ObservationSeries {
    fn from_iter<I: IntoIterator<Item = RaisedObservation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
