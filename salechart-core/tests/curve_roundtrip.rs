use chrono::{DateTime, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use salechart_core::{AuctionCurve, AuctionProvider, ClockAuction, HyperbolicCurve, LinearCurve};

fn ts(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap()
}

const BEGIN_MS: i64 = 1_700_000_000_000;

fn arb_linear() -> impl Strategy<Value = LinearCurve> {
    (1i64..1_000_000_000i64, 1i64..10_000_000i64).prop_map(|(start, decline_milli)| {
        LinearCurve::new(ts(BEGIN_MS), Decimal::from(start), Decimal::new(decline_milli, 3)).unwrap()
    })
}

fn arb_hyperbolic() -> impl Strategy<Value = HyperbolicCurve> {
    (1_000i64..1_000_000i64, 1i64..1_000i64, 1i64..100i64, 1i64..1_000i64).prop_map(
        |(numerator, offset, tail_centi, scale)| {
            HyperbolicCurve::new(
                ts(BEGIN_MS),
                Decimal::from(numerator),
                Decimal::from(offset),
                Decimal::new(tail_centi, 2),
                Decimal::from(scale),
            )
            .unwrap()
        },
    )
}

proptest! {
    #[test]
    fn linear_time_target_time_is_exact(curve in arb_linear(), elapsed in 0i64..3_600_000i64) {
        let t = ts(BEGIN_MS + elapsed);
        let target = curve.target_at(t);
        prop_assume!(target > Decimal::ZERO);
        prop_assert_eq!(curve.time_at(target), t);
    }

    #[test]
    fn linear_is_non_increasing(curve in arb_linear(), a in -1_000i64..3_600_000i64, b in -1_000i64..3_600_000i64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(curve.target_at(ts(BEGIN_MS + lo)) >= curve.target_at(ts(BEGIN_MS + hi)));
    }

    #[test]
    fn hyperbolic_round_trip_within_a_millisecond(curve in arb_hyperbolic(), elapsed in 0i64..3_600_000i64) {
        let t = ts(BEGIN_MS + elapsed);
        let target = curve.target_at(t);
        prop_assume!(target > Decimal::ZERO);
        let back = curve.time_at(target);
        prop_assert!((back - t).num_milliseconds().abs() <= 1, "{} vs {}", back, t);
    }

    #[test]
    fn hyperbolic_is_non_increasing(curve in arb_hyperbolic(), a in 0i64..3_600_000i64, b in 0i64..3_600_000i64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(curve.target_at(ts(BEGIN_MS + lo)) >= curve.target_at(ts(BEGIN_MS + hi)));
    }
}

#[test]
fn linear_clamps_before_begin_and_at_floor() {
    let curve = LinearCurve::new(ts(0), Decimal::from(100), Decimal::from(10))
        .unwrap()
        .with_floor(Decimal::from(20));
    assert_eq!(curve.target_at(ts(-5_000)), Decimal::from(100));
    assert_eq!(curve.target_at(ts(5_000)), Decimal::from(50));
    assert_eq!(curve.target_at(ts(60_000)), Decimal::from(20));
    // Earliest instant the floor is reached.
    assert_eq!(curve.time_at(Decimal::from(20)), ts(8_000));
    assert_eq!(curve.time_at(Decimal::ZERO), ts(8_000));
    assert_eq!(curve.time_at(Decimal::from(150)), ts(0));
}

#[test]
fn linear_floor_never_exceeds_start() {
    let curve = LinearCurve::new(ts(0), Decimal::from(10), Decimal::ONE)
        .unwrap()
        .with_floor(Decimal::from(50));
    assert_eq!(curve.target_at(ts(0)), Decimal::from(10));
    assert_eq!(curve.target_at(ts(100_000)), Decimal::from(10));
}

#[test]
fn linear_rejects_bad_parameters() {
    assert!(LinearCurve::new(ts(0), Decimal::from(10), Decimal::ZERO).is_err());
    assert!(LinearCurve::new(ts(0), Decimal::from(10), Decimal::from(-1)).is_err());
    assert!(LinearCurve::new(ts(0), Decimal::from(-10), Decimal::ONE).is_err());
}

#[test]
fn hyperbolic_reaches_zero_and_stays() {
    // 1000 / (e + 10) - 1 hits zero at e = 990 seconds.
    let curve = HyperbolicCurve::new(
        ts(0),
        Decimal::from(1_000),
        Decimal::from(10),
        Decimal::ONE,
        Decimal::from(2),
    )
    .unwrap();
    assert_eq!(curve.target_at(ts(0)), Decimal::from(198));
    assert_eq!(curve.exhausted_at(), ts(990_000));
    assert_eq!(curve.target_at(ts(990_000)), Decimal::ZERO);
    assert_eq!(curve.target_at(ts(2_000_000)), Decimal::ZERO);
    assert_eq!(curve.time_at(Decimal::from(500)), ts(0));
}

#[test]
fn hyperbolic_rejects_non_positive_parameters() {
    let one = Decimal::ONE;
    assert!(HyperbolicCurve::new(ts(0), Decimal::ZERO, one, one, one).is_err());
    assert!(HyperbolicCurve::new(ts(0), one, Decimal::ZERO, one, one).is_err());
    assert!(HyperbolicCurve::new(ts(0), one, one, Decimal::ZERO, one).is_err());
    assert!(HyperbolicCurve::new(ts(0), one, one, one, Decimal::from(-3)).is_err());
}

#[test]
fn clock_auction_clamps_now_into_sale() {
    let curve = LinearCurve::new(ts(0), Decimal::from(100), Decimal::ONE).unwrap();

    let ended = ClockAuction::new(ts(0), curve).with_end(ts(5_000));
    let window = ended.window().unwrap();
    assert_eq!(window.begin_time(), ts(0));
    assert_eq!(window.now(), ts(5_000));
    assert_eq!(ended.curve().target_at(window.now()), Decimal::from(95));

    let future = Utc::now() + chrono::TimeDelta::days(1);
    let not_started = ClockAuction::new(future, curve);
    let window = not_started.window().unwrap();
    assert_eq!(window.span_ms(), 0);
}
