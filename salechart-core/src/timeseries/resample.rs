use std::cmp::Reverse;
use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::curve::AuctionCurve;
use crate::timeseries::format::format_point;
use crate::timeseries::lookup::ObservationSeries;
use crate::timeseries::util::{offset_ms, uniform_time};
use crate::types::{
    Amount, AuctionWindow, ChartError, ChartPoint, DEFAULT_NUM_TICKS, DisplayUnits, PlotPoint,
};

/// Merged, time-ordered chart dataset in base units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartDataset {
    points: Vec<ChartPoint>,
}

impl ChartDataset {
    /// Points in non-decreasing time order.
    #[must_use]
    pub fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the dataset holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consume the dataset and return its points.
    #[must_use]
    pub fn into_points(self) -> Vec<ChartPoint> {
        self.points
    }

    /// Convert every point to display units and epoch milliseconds.
    #[must_use]
    pub fn to_plot(&self, units: &DisplayUnits) -> Vec<PlotPoint> {
        self.points.iter().map(|p| format_point(p, units)).collect()
    }
}

/// Target sample `i` of `ticks` between `begin_target` and `begin_target - drop`.
fn target_step(begin_target: Amount, drop: Amount, i: u32, ticks: NonZeroU32) -> Amount {
    let i = Decimal::from(i);
    let n = Decimal::from(ticks.get());
    // Multiplying first keeps the last step exactly on the end target.
    let delta = drop
        .checked_mul(i)
        .and_then(|d| d.checked_div(n))
        .or_else(|| drop.checked_div(n).and_then(|step| step.checked_mul(i)))
        .unwrap_or(drop);
    begin_target.checked_sub(delta).unwrap_or(begin_target)
}

/// Samples stepped uniformly in the target domain.
///
/// Emits `ticks + 1` points with targets evenly spaced from
/// `target_at(begin_time)` down to `target_at(now)`, each placed at
/// `time_at(target)` and carrying the backward-filled raised amount.
pub fn target_domain_pass<C>(
    window: &AuctionWindow,
    curve: &C,
    series: &ObservationSeries,
    ticks: NonZeroU32,
) -> Vec<ChartPoint>
where
    C: AuctionCurve + ?Sized,
{
    let begin_target = curve.target_at(window.begin_time());
    let now_target = curve.target_at(window.now());
    let drop = begin_target.checked_sub(now_target).unwrap_or(Decimal::ZERO);

    (0..=ticks.get())
        .map(|i| {
            let target = target_step(begin_target, drop, i, ticks);
            let time = curve.time_at(target);
            ChartPoint {
                time,
                target,
                raised: series.raised_at(time),
            }
        })
        .collect()
}

/// Samples stepped uniformly in the time domain.
///
/// Emits `ticks + 1` points at `begin_time + floor(span_ms * i / ticks)`
/// milliseconds, so the last one sits exactly on `now`.
pub fn time_domain_pass<C>(
    window: &AuctionWindow,
    curve: &C,
    series: &ObservationSeries,
    ticks: NonZeroU32,
) -> Vec<ChartPoint>
where
    C: AuctionCurve + ?Sized,
{
    let span = window.span_ms();
    (0..=ticks.get())
        .map(|i| {
            let time = uniform_time(window.begin_time(), span, i, ticks.get());
            ChartPoint {
                time,
                target: curve.target_at(time),
                raised: series.raised_at(time),
            }
        })
        .collect()
}

/// Point one time step past `now` carrying the current target and the latest raised amount.
///
/// The raised value is the most recent observation rather than a lookup, so the
/// raised line reaches the right edge of the chart. An empty series yields zero.
pub fn trailing_anchor<C>(
    window: &AuctionWindow,
    curve: &C,
    series: &ObservationSeries,
    ticks: NonZeroU32,
) -> ChartPoint
where
    C: AuctionCurve + ?Sized,
{
    let interval_ms = window.span_ms() / i64::from(ticks.get());
    ChartPoint {
        time: offset_ms(window.now(), interval_ms),
        target: curve.target_at(window.now()),
        raised: series.latest(),
    }
}

/// Build the full chart dataset for one refresh.
///
/// Concatenates both passes without de-duplication and sorts them by time.
/// Samples sharing a millisecond are ordered by descending target, since
/// `time_at` rounds to whole milliseconds. The trailing anchor goes after every
/// sample at or before its time. The result always holds `2 * (ticks + 1) + 1`
/// points.
pub fn recompute<C>(
    window: &AuctionWindow,
    curve: &C,
    series: &ObservationSeries,
    ticks: NonZeroU32,
) -> ChartDataset
where
    C: AuctionCurve + ?Sized,
{
    let capacity = 2 * (ticks.get() as usize + 1) + 1;
    let mut points = Vec::with_capacity(capacity);
    points.extend(target_domain_pass(window, curve, series, ticks));
    points.extend(time_domain_pass(window, curve, series, ticks));
    points.sort_by_key(|p| (p.time, Reverse(p.target)));
    let anchor = trailing_anchor(window, curve, series, ticks);
    let at = points.partition_point(|p| p.time <= anchor.time);
    points.insert(at, anchor);

    #[cfg(feature = "tracing")]
    tracing::trace!(
        points = points.len(),
        observations = series.len(),
        span_ms = window.span_ms(),
        "recomputed chart dataset"
    );

    ChartDataset { points }
}

/// Dual-domain resampler with a fixed resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resampler {
    ticks: NonZeroU32,
}

impl Default for Resampler {
    fn default() -> Self {
        Self {
            ticks: NonZeroU32::new(DEFAULT_NUM_TICKS).unwrap_or(NonZeroU32::MIN),
        }
    }
}

impl Resampler {
    /// Build a resampler with `num_ticks` uniform intervals per domain.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `num_ticks` is zero.
    pub fn new(num_ticks: u32) -> Result<Self, ChartError> {
        NonZeroU32::new(num_ticks)
            .map(|ticks| Self { ticks })
            .ok_or_else(|| ChartError::InvalidArg("num_ticks must be positive".into()))
    }

    /// Configured resolution.
    #[must_use]
    pub const fn ticks(&self) -> NonZeroU32 {
        self.ticks
    }

    /// Number of points every dataset produced by this resampler holds.
    #[must_use]
    pub const fn output_len(&self) -> usize {
        2 * (self.ticks.get() as usize + 1) + 1
    }

    /// See [`recompute`].
    pub fn recompute<C>(
        &self,
        window: &AuctionWindow,
        curve: &C,
        series: &ObservationSeries,
    ) -> ChartDataset
    where
        C: AuctionCurve + ?Sized,
    {
        recompute(window, curve, series, self.ticks)
    }
}
