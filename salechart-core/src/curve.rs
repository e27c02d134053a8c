//! Auction curve model: a declining target and its exact inverse.
//!
//! The resampler treats curves as black boxes and only evaluates them at
//! chosen sample points. Implementations must honour two preconditions that
//! are not checked at runtime:
//!
//! - `target_at` is non-increasing in time over the auction window.
//! - `time_at` is its right inverse on the window; when several instants map to
//!   the same target, the earliest one is returned.
//!
//! A curve violating either produces a non-monotonic dataset, not an error.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::timeseries::util::{elapsed_secs, offset_ms, secs_to_ms};
use crate::types::{Amount, AuctionWindow, ChartError, Timestamp};

/// Declining target curve paired with its inverse.
pub trait AuctionCurve: Send + Sync {
    /// Target value of the auction at instant `t`.
    fn target_at(&self, t: Timestamp) -> Amount;

    /// Earliest instant at which the curve reaches `target`.
    fn time_at(&self, target: Amount) -> Timestamp;
}

impl<C: AuctionCurve + ?Sized> AuctionCurve for &C {
    fn target_at(&self, t: Timestamp) -> Amount {
        (**self).target_at(t)
    }

    fn time_at(&self, target: Amount) -> Timestamp {
        (**self).time_at(target)
    }
}

impl<C: AuctionCurve + ?Sized> AuctionCurve for std::sync::Arc<C> {
    fn target_at(&self, t: Timestamp) -> Amount {
        (**self).target_at(t)
    }

    fn time_at(&self, target: Amount) -> Timestamp {
        (**self).time_at(target)
    }
}

/// Straight-line decline from `start_target`, bounded below by `floor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearCurve {
    begin: Timestamp,
    start_target: Amount,
    decline_per_sec: Amount,
    floor: Amount,
}

impl LinearCurve {
    /// Build a curve starting at `start_target` and losing `decline_per_sec` every second.
    ///
    /// The floor defaults to zero.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `decline_per_sec` is not strictly positive or
    /// `start_target` is negative.
    pub fn new(
        begin: Timestamp,
        start_target: Amount,
        decline_per_sec: Amount,
    ) -> Result<Self, ChartError> {
        if decline_per_sec <= Decimal::ZERO {
            return Err(ChartError::InvalidArg(
                "linear curve decline must be positive".into(),
            ));
        }
        if start_target.is_sign_negative() {
            return Err(ChartError::InvalidArg(
                "linear curve start target must be non-negative".into(),
            ));
        }
        Ok(Self {
            begin,
            start_target,
            decline_per_sec,
            floor: Decimal::ZERO,
        })
    }

    /// Replace the lower bound; values above `start_target` are clamped to it.
    #[must_use]
    pub fn with_floor(self, floor: Amount) -> Self {
        Self {
            floor: floor.min(self.start_target),
            ..self
        }
    }
}

impl AuctionCurve for LinearCurve {
    fn target_at(&self, t: Timestamp) -> Amount {
        let elapsed = elapsed_secs(self.begin, t).max(Decimal::ZERO);
        self.decline_per_sec
            .checked_mul(elapsed)
            .and_then(|drop| self.start_target.checked_sub(drop))
            .map_or(self.floor, |v| v.max(self.floor))
    }

    fn time_at(&self, target: Amount) -> Timestamp {
        if target >= self.start_target {
            return self.begin;
        }
        let target = target.max(self.floor);
        let ms = (self.start_target - target)
            .checked_div(self.decline_per_sec)
            .map_or(i64::MAX, secs_to_ms);
        offset_ms(self.begin, ms)
    }
}

/// Second-price auction shape: `scale * (numerator / (elapsed + offset) - tail)`, floored at zero.
///
/// Elapsed time and `offset_secs` are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HyperbolicCurve {
    begin: Timestamp,
    numerator: Amount,
    offset_secs: Amount,
    tail: Amount,
    scale: Amount,
}

impl HyperbolicCurve {
    /// Build a hyperbolic curve anchored at `begin`.
    ///
    /// # Errors
    /// Returns `InvalidArg` unless every parameter is strictly positive.
    pub fn new(
        begin: Timestamp,
        numerator: Amount,
        offset_secs: Amount,
        tail: Amount,
        scale: Amount,
    ) -> Result<Self, ChartError> {
        for (name, v) in [
            ("numerator", numerator),
            ("offset_secs", offset_secs),
            ("tail", tail),
            ("scale", scale),
        ] {
            if v <= Decimal::ZERO {
                return Err(ChartError::InvalidArg(format!(
                    "hyperbolic curve {name} must be positive, got {v}"
                )));
            }
        }
        Ok(Self {
            begin,
            numerator,
            offset_secs,
            tail,
            scale,
        })
    }

    /// Instant at which the curve first reaches zero.
    #[must_use]
    pub fn exhausted_at(&self) -> Timestamp {
        self.time_at(Decimal::ZERO)
    }

    fn unit_value(&self, elapsed: Amount) -> Option<Amount> {
        let denom = elapsed.checked_add(self.offset_secs)?;
        self.numerator.checked_div(denom)?.checked_sub(self.tail)
    }
}

impl AuctionCurve for HyperbolicCurve {
    fn target_at(&self, t: Timestamp) -> Amount {
        let elapsed = elapsed_secs(self.begin, t).max(Decimal::ZERO);
        self.unit_value(elapsed)
            .and_then(|unit| unit.checked_mul(self.scale))
            .map_or(Decimal::ZERO, |v| v.max(Decimal::ZERO))
    }

    fn time_at(&self, target: Amount) -> Timestamp {
        let target = target.max(Decimal::ZERO);
        let elapsed = target
            .checked_div(self.scale)
            .and_then(|unit| unit.checked_add(self.tail))
            .and_then(|denom| self.numerator.checked_div(denom))
            .and_then(|v| v.checked_sub(self.offset_secs));
        match elapsed {
            Some(e) if e > Decimal::ZERO => offset_ms(self.begin, secs_to_ms(e)),
            _ => self.begin,
        }
    }
}

/// Source of the auction window and curve for each resampling run.
pub trait AuctionProvider: Send + Sync {
    /// Current window; `now` may move between calls.
    ///
    /// # Errors
    /// Returns an error when the provider cannot produce a valid window.
    fn window(&self) -> Result<AuctionWindow, ChartError>;

    /// Curve evaluated by the resampler.
    fn curve(&self) -> &dyn AuctionCurve;
}

/// Auction whose `now` is the wall clock, clamped into `[begin, end]`.
#[derive(Debug, Clone)]
pub struct ClockAuction<C> {
    begin: Timestamp,
    end: Option<Timestamp>,
    curve: C,
}

impl<C: AuctionCurve> ClockAuction<C> {
    /// Build an open-ended auction that started at `begin`.
    #[must_use]
    pub const fn new(begin: Timestamp, curve: C) -> Self {
        Self {
            begin,
            end: None,
            curve,
        }
    }

    /// Stop advancing `now` once the sale has ended.
    #[must_use]
    pub const fn with_end(mut self, end: Timestamp) -> Self {
        self.end = Some(end);
        self
    }
}

impl<C: AuctionCurve> AuctionProvider for ClockAuction<C> {
    fn window(&self) -> Result<AuctionWindow, ChartError> {
        let mut now = Utc::now().max(self.begin);
        if let Some(end) = self.end {
            now = now.min(end.max(self.begin));
        }
        AuctionWindow::new(self.begin, now)
    }

    fn curve(&self) -> &dyn AuctionCurve {
        &self.curve
    }
}
