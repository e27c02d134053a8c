#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use salechart::{
    ChartError, DisplayUnits, LinearCurve, RaisedObservation, SaleChart, SaleConnector,
    SaleStatus, StatusProvider,
};
use salechart_mock::FixedAuction;

/// Millisecond timestamp helper.
pub fn ts(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap()
}

pub fn status(total: i64) -> SaleStatus {
    SaleStatus {
        total_accounted: Decimal::from(total),
        block: None,
    }
}

pub fn obs(ms: i64, raised: i64) -> RaisedObservation {
    RaisedObservation::new(ts(ms), Decimal::from(raised))
}

/// Three purchases at 0, 500 and 1000 ms reaching 90.
pub fn scenario_history() -> Vec<RaisedObservation> {
    vec![obs(1000, 90), obs(0, 0), obs(500, 50)]
}

/// `100 - t/10` over `[0, 1000]` ms.
pub fn scenario_auction() -> Arc<FixedAuction<LinearCurve>> {
    let curve = LinearCurve::new(ts(0), Decimal::from(100), Decimal::from(100)).unwrap();
    Arc::new(FixedAuction::new(ts(0), ts(1000), curve).unwrap())
}

/// Base units shown as-is so plotted values match the scenario numbers.
pub const RAW_UNITS: DisplayUnits = DisplayUnits {
    decimals: 0,
    round_target: false,
};

/// Two-tick chart over the scenario auction.
pub fn scenario_chart(connector: Arc<dyn SaleConnector>) -> SaleChart {
    SaleChart::builder()
        .with_connector(connector)
        .auction(scenario_auction())
        .num_ticks(2)
        .display(RAW_UNITS)
        .build()
        .unwrap()
}

/// Connector exposing only the status capability.
pub struct StatusOnly(pub SaleStatus);

impl SaleConnector for StatusOnly {
    fn name(&self) -> &'static str {
        "status-only"
    }

    fn as_status_provider(&self) -> Option<&dyn StatusProvider> {
        Some(self as &dyn StatusProvider)
    }
}

#[async_trait]
impl StatusProvider for StatusOnly {
    async fn status(&self) -> Result<SaleStatus, ChartError> {
        Ok(self.0)
    }
}
