//! Conversion of raw chart points to display units.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{Amount, ChartPoint, DisplayUnits, MAX_DISPLAY_DECIMALS, PlotPoint};

/// Shift a base-unit amount into display units (divide by `10^decimals`).
///
/// `decimals` above 28 is clamped.
#[must_use]
pub fn to_display_units(amount: Amount, decimals: u32) -> Decimal {
    let factor = Decimal::new(1, decimals.min(MAX_DISPLAY_DECIMALS));
    amount.checked_mul(factor).unwrap_or(amount)
}

/// Format one point for plotting.
///
/// ```
/// use chrono::DateTime;
/// use rust_decimal::Decimal;
/// use salechart_core::{ChartPoint, DisplayUnits, format_point};
///
/// let p = ChartPoint {
///     time: DateTime::from_timestamp_millis(1_500).unwrap(),
///     target: Decimal::from(2_500_000_000_000_000_000i64),
///     raised: Decimal::from(1_250_000_000_000_000_000i64),
/// };
/// let out = format_point(&p, &DisplayUnits::default());
/// assert_eq!(out.time, 1_500);
/// assert_eq!(out.target, 3.0);
/// assert_eq!(out.raised, 1.25);
/// ```
#[must_use]
pub fn format_point(point: &ChartPoint, units: &DisplayUnits) -> PlotPoint {
    let mut target = to_display_units(point.target, units.decimals);
    if units.round_target {
        target = target.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    }
    let raised = to_display_units(point.raised, units.decimals);
    PlotPoint {
        time: point.time.timestamp_millis(),
        target: target.to_f64().unwrap_or_default(),
        raised: raised.to_f64().unwrap_or_default(),
    }
}
