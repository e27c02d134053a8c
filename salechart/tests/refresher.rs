mod helpers;

use std::sync::Arc;
use std::time::Duration;

use futures::channel::mpsc;
use helpers::*;
use rust_decimal::Decimal;
use salechart::{ChartError, PollConfig, SaleChart, Trigger};
use salechart_mock::{DynamicMockConnector, MockBehavior};

async fn next_total(rx: &mut tokio::sync::watch::Receiver<salechart::ChartView>) -> Option<Decimal> {
    tokio::time::timeout(Duration::from_secs(2), rx.changed())
        .await
        .expect("no view published in time")
        .expect("chart dropped");
    rx.borrow_and_update().total_accounted
}

#[tokio::test(flavor = "multi_thread")]
async fn refresher_publishes_on_start_and_on_block_triggers() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("P0");
    ctl.set_status_behavior(MockBehavior::Return(status(50))).await;
    ctl.set_history_behavior(MockBehavior::Return(scenario_history()))
        .await;
    let chart = Arc::new(scenario_chart(conn));
    let mut rx = chart.subscribe();

    let (tx, triggers) = mpsc::unbounded::<Trigger>();
    let handle = chart.spawn_refresher(triggers);
    assert_eq!(next_total(&mut rx).await, Some(Decimal::from(50)));

    ctl.set_status_behavior(MockBehavior::Return(status(90))).await;
    tx.unbounded_send(Trigger::Block(18_000_001)).unwrap();
    assert_eq!(next_total(&mut rx).await, Some(Decimal::from(90)));

    handle.stop().await;
    assert!(tx.unbounded_send(Trigger::Block(18_000_002)).is_err());
}

#[tokio::test(flavor = "multi_thread")]
async fn refresher_survives_failed_refreshes() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("P0");
    ctl.set_status_behavior(MockBehavior::Fail(ChartError::Other("flaky".into())))
        .await;
    let chart = Arc::new(scenario_chart(conn));
    let mut rx = chart.subscribe();

    let (tx, triggers) = mpsc::unbounded::<Trigger>();
    let handle = chart.spawn_refresher(triggers);

    // Wait for the initial attempt to fail.
    tokio::time::timeout(Duration::from_secs(2), async {
        while ctl.status_calls().await == 0 {
            tokio::task::yield_now().await;
        }
    })
    .await
    .unwrap();
    assert!(chart.current().loading);

    ctl.set_status_behavior(MockBehavior::Return(status(90))).await;
    ctl.set_history_behavior(MockBehavior::Return(scenario_history()))
        .await;
    tx.unbounded_send(Trigger::Ready).unwrap();
    assert_eq!(next_total(&mut rx).await, Some(Decimal::from(90)));
    assert!(!handle.is_finished());
    handle.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_history_fetch_keeps_view_until_next_trigger() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("P0");
    ctl.set_status_behavior(MockBehavior::Return(status(50))).await;
    ctl.set_history_behavior(MockBehavior::Return(scenario_history()))
        .await;
    let chart = Arc::new(scenario_chart(conn));
    let mut rx = chart.subscribe();

    let (tx, triggers) = mpsc::unbounded::<Trigger>();
    let handle = chart.spawn_refresher(triggers);
    assert_eq!(next_total(&mut rx).await, Some(Decimal::from(50)));
    let published = chart.current();

    ctl.set_status_behavior(MockBehavior::Return(status(70))).await;
    ctl.set_history_behavior(MockBehavior::Fail(ChartError::Other("history down".into())))
        .await;
    tx.unbounded_send(Trigger::Block(18_000_001)).unwrap();
    tokio::time::timeout(Duration::from_secs(2), async {
        while ctl.history_calls().await < 2 {
            tokio::task::yield_now().await;
        }
    })
    .await
    .unwrap();
    assert_eq!(chart.current(), published);
    assert!(!handle.is_finished());

    ctl.set_history_behavior(MockBehavior::Return(scenario_history()))
        .await;
    tx.unbounded_send(Trigger::Block(18_000_002)).unwrap();
    assert_eq!(next_total(&mut rx).await, Some(Decimal::from(70)));
    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn poll_timer_refreshes_without_triggers() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("P0");
    ctl.set_status_behavior(MockBehavior::Return(status(10))).await;
    ctl.set_history_behavior(MockBehavior::Return(scenario_history()))
        .await;
    let chart = Arc::new(
        SaleChart::builder()
            .with_connector(conn)
            .auction(scenario_auction())
            .num_ticks(2)
            .poll(PollConfig {
                interval_ms: 1_000,
                jitter_percent: 0,
            })
            .build()
            .unwrap(),
    );
    let mut rx = chart.subscribe();

    let handle = chart.spawn_refresher(futures::stream::pending::<Trigger>());
    assert_eq!(next_total(&mut rx).await, Some(Decimal::from(10)));

    ctl.set_status_behavior(MockBehavior::Return(status(20))).await;
    assert_eq!(next_total(&mut rx).await, Some(Decimal::from(20)));
    assert!(ctl.status_calls().await >= 2);

    handle.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn refresher_ends_when_triggers_run_out_without_polling() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("P0");
    ctl.set_status_behavior(MockBehavior::Return(status(5))).await;
    ctl.set_history_behavior(MockBehavior::Return(scenario_history()))
        .await;
    let chart = Arc::new(scenario_chart(conn));

    let handle = chart.spawn_refresher(futures::stream::iter([
        Trigger::Block(1),
        Trigger::Block(2),
    ]));
    tokio::time::timeout(Duration::from_secs(2), async {
        while !handle.is_finished() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("refresher did not finish after its triggers ended");

    // Initial refresh plus one per trigger; only the first rebuilt.
    assert_eq!(ctl.status_calls().await, 3);
    assert_eq!(ctl.history_calls().await, 1);
    assert_eq!(chart.current().total_accounted, Some(Decimal::from(5)));
}

#[tokio::test(flavor = "multi_thread")]
async fn dropping_handle_stops_refresher() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("P0");
    ctl.set_status_behavior(MockBehavior::Return(status(5))).await;
    ctl.set_history_behavior(MockBehavior::Return(scenario_history()))
        .await;
    let chart = Arc::new(scenario_chart(conn));
    let mut rx = chart.subscribe();

    let (tx, triggers) = mpsc::unbounded::<Trigger>();
    let handle = chart.spawn_refresher(triggers);
    next_total(&mut rx).await;
    drop(handle);

    tokio::time::timeout(Duration::from_secs(2), async {
        while !tx.is_closed() || Arc::strong_count(&chart) > 1 {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("refresher still alive after handle drop");
}
