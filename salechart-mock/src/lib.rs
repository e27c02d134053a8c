//! Deterministic mock backend and auctions for salechart tests and demos.
#![warn(missing_docs)]

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use salechart_core::{
    AuctionCurve, AuctionProvider, AuctionWindow, ChartError, HistoryProvider, HyperbolicCurve,
    LinearCurve, RaisedObservation, SaleConnector, SaleStatus, StatusProvider, Timestamp,
};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};
pub use fixtures::sale::{SALE_BEGIN_MS, SALE_NOW_MS};

/// Mock connector for CI-safe demos. Serves a fixed six-hour sale history.
pub struct MockConnector {
    empty: bool,
    latency: Option<Duration>,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Connector serving the bundled history and status.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            empty: false,
            latency: None,
        }
    }

    /// Connector for a sale nobody has bought into yet: no history, zero total.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            empty: true,
            latency: None,
        }
    }

    /// Delay every response; the orchestrator may time out depending on config.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    async fn simulate_latency(&self) {
        if let Some(d) = self.latency {
            tokio::time::sleep(d).await;
        }
    }
}

impl SaleConnector for MockConnector {
    fn name(&self) -> &'static str {
        "salechart-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_status_provider(&self) -> Option<&dyn StatusProvider> {
        Some(self as &dyn StatusProvider)
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        Some(self as &dyn HistoryProvider)
    }
}

#[async_trait]
impl StatusProvider for MockConnector {
    async fn status(&self) -> Result<SaleStatus, ChartError> {
        self.simulate_latency().await;
        if self.empty {
            return Ok(SaleStatus {
                total_accounted: Decimal::ZERO,
                block: None,
            });
        }
        fixtures::sale::status()
    }
}

#[async_trait]
impl HistoryProvider for MockConnector {
    async fn chart_data(&self) -> Result<Vec<RaisedObservation>, ChartError> {
        self.simulate_latency().await;
        if self.empty {
            return Ok(Vec::new());
        }
        fixtures::sale::history()
    }
}

/// Auction with a frozen `now`, so every refresh resamples the same window.
#[derive(Debug, Clone)]
pub struct FixedAuction<C> {
    window: AuctionWindow,
    curve: C,
}

impl<C: AuctionCurve> FixedAuction<C> {
    /// Build an auction spanning `[begin, now]`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `begin` is after `now`.
    pub fn new(begin: Timestamp, now: Timestamp, curve: C) -> Result<Self, ChartError> {
        Ok(Self {
            window: AuctionWindow::new(begin, now)?,
            curve,
        })
    }

    /// Curve driving this auction.
    pub const fn curve_ref(&self) -> &C {
        &self.curve
    }
}

impl FixedAuction<LinearCurve> {
    /// 100 000 ether falling by 4 ether per second, six hours in.
    ///
    /// # Errors
    /// Never fails for the bundled parameters; the `Result` mirrors the curve constructor.
    pub fn linear_fixture() -> Result<Self, ChartError> {
        let wei = fixtures::sale::wei_per_ether();
        let curve = LinearCurve::new(
            fixtures::sale::begin(),
            Decimal::from(100_000) * wei,
            Decimal::from(4) * wei,
        )?;
        Self::new(fixtures::sale::begin(), fixtures::sale::now(), curve)
    }
}

impl FixedAuction<HyperbolicCurve> {
    /// Second-price shape `1e18 * (360e6 / (elapsed + 3600) - 10)`, six hours in.
    ///
    /// # Errors
    /// Never fails for the bundled parameters; the `Result` mirrors the curve constructor.
    pub fn hyperbolic_fixture() -> Result<Self, ChartError> {
        let curve = HyperbolicCurve::new(
            fixtures::sale::begin(),
            Decimal::from(360_000_000),
            Decimal::from(3_600),
            Decimal::from(10),
            fixtures::sale::wei_per_ether(),
        )?;
        Self::new(fixtures::sale::begin(), fixtures::sale::now(), curve)
    }
}

impl<C: AuctionCurve> AuctionProvider for FixedAuction<C> {
    fn window(&self) -> Result<AuctionWindow, ChartError> {
        Ok(self.window)
    }

    fn curve(&self) -> &dyn AuctionCurve {
        &self.curve
    }
}
