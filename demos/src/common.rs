use std::sync::Arc;

use salechart::{AuctionProvider, PlotPoint, SaleConnector};
use salechart_mock::{FixedAuction, MockConnector};

/// Return the sale backend for demos.
#[must_use]
pub fn get_connector() -> Arc<dyn SaleConnector> {
    Arc::new(MockConnector::new())
}

/// Return the auction for demos; `SALECHART_DEMO_CURVE=linear` swaps the curve.
///
/// # Errors
/// Propagates curve construction errors.
pub fn get_auction() -> Result<Arc<dyn AuctionProvider>, salechart::ChartError> {
    if std::env::var("SALECHART_DEMO_CURVE").is_ok_and(|v| v.eq_ignore_ascii_case("linear")) {
        println!("--- (Using linear curve) ---");
        Ok(Arc::new(FixedAuction::linear_fixture()?))
    } else {
        Ok(Arc::new(FixedAuction::hyperbolic_fixture()?))
    }
}

/// One-line summary of a published dataset.
#[must_use]
pub fn summarize(points: &[PlotPoint]) -> String {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => format!(
            "{} points, target {:.0} -> {:.0} ether, raised {:.2} ether at {}",
            points.len(),
            first.target,
            last.target,
            last.raised,
            last.time
        ),
        _ => "0 points".to_string(),
    }
}
