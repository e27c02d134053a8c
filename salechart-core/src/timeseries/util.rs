//! Millisecond arithmetic shared by curves and the resampler.

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::types::{Amount, Timestamp};

/// Shift `base` by `ms` milliseconds, saturating at the representable range.
#[must_use]
pub fn offset_ms(base: Timestamp, ms: i64) -> Timestamp {
    TimeDelta::try_milliseconds(ms)
        .and_then(|d| base.checked_add_signed(d))
        .unwrap_or(if ms < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

/// Seconds elapsed from `begin` to `t` with millisecond precision; negative before `begin`.
#[must_use]
pub fn elapsed_secs(begin: Timestamp, t: Timestamp) -> Amount {
    Decimal::new((t - begin).num_milliseconds(), 3)
}

/// Convert fractional seconds to whole milliseconds, rounding half away from zero.
#[must_use]
pub fn secs_to_ms(secs: Amount) -> i64 {
    let saturated = if secs.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    };
    secs.checked_mul(Decimal::ONE_THOUSAND)
        .map(|ms| ms.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero))
        .and_then(|ms| ms.to_i64())
        .unwrap_or(saturated)
}

/// `begin + floor(span_ms * step / ticks)` milliseconds.
#[must_use]
pub fn uniform_time(begin: Timestamp, span_ms: i64, step: u32, ticks: u32) -> Timestamp {
    let offset = i128::from(span_ms) * i128::from(step) / i128::from(ticks.max(1));
    offset_ms(begin, i64::try_from(offset).unwrap_or(i64::MAX))
}
