use std::sync::Arc;
use std::time::Duration;

use salechart_core::{
    AuctionProvider, ChartConfig, ChartError, DisplayUnits, PollConfig, Resampler, SaleConnector,
};
use tokio::sync::{Mutex, watch};

use crate::chart::gate::ChangeGate;
use crate::view::ChartView;

/// Orchestrator that refreshes and publishes the sale chart.
pub struct SaleChart {
    pub(crate) connector: Arc<dyn SaleConnector>,
    pub(crate) auction: Arc<dyn AuctionProvider>,
    pub(crate) cfg: ChartConfig,
    pub(crate) resampler: Resampler,
    pub(crate) gate: ChangeGate,
    pub(crate) in_flight: Mutex<()>,
    pub(crate) view_tx: watch::Sender<ChartView>,
}

/// Builder for constructing a `SaleChart` with custom configuration.
pub struct SaleChartBuilder {
    connector: Option<Arc<dyn SaleConnector>>,
    auction: Option<Arc<dyn AuctionProvider>>,
    cfg: ChartConfig,
}

impl Default for SaleChartBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SaleChartBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Defaults: 200 ticks per domain, wei → ether display with an integer
    /// target, 5s provider timeout, no polling timer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connector: None,
            auction: None,
            cfg: ChartConfig::default(),
        }
    }

    /// Register the sale backend. A later call replaces the earlier connector.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn SaleConnector>) -> Self {
        self.connector = Some(c);
        self
    }

    /// Register the auction supplying the window and the target curve.
    #[must_use]
    pub fn auction(mut self, a: Arc<dyn AuctionProvider>) -> Self {
        self.auction = Some(a);
        self
    }

    /// Replace the whole configuration, e.g. one loaded from a file.
    #[must_use]
    pub fn config(mut self, cfg: ChartConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the number of uniform intervals per resampling domain.
    ///
    /// Every published dataset holds `2 * (num_ticks + 1) + 1` points.
    #[must_use]
    pub const fn num_ticks(mut self, n: u32) -> Self {
        self.cfg.num_ticks = n;
        self
    }

    /// Set the display-unit conversion applied before publishing.
    #[must_use]
    pub const fn display(mut self, units: DisplayUnits) -> Self {
        self.cfg.display = units;
        self
    }

    /// Set the per-call timeout for connector requests.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Enable the refresher's polling timer.
    ///
    /// The timer restarts after every refresh, so it only fires when no
    /// external trigger arrived within the interval.
    #[must_use]
    pub const fn poll(mut self, poll: PollConfig) -> Self {
        self.cfg.poll = Some(poll);
        self
    }

    /// Build the `SaleChart` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the configuration is out of range or if no
    /// connector or auction has been registered.
    pub fn build(self) -> Result<SaleChart, ChartError> {
        self.cfg.validate()?;
        let connector = self.connector.ok_or_else(|| {
            ChartError::InvalidArg(
                "no connector registered; add one via with_connector(...)".to_string(),
            )
        })?;
        let auction = self.auction.ok_or_else(|| {
            ChartError::InvalidArg("no auction registered; add one via auction(...)".to_string())
        })?;
        let resampler = Resampler::new(self.cfg.num_ticks)?;
        let (view_tx, _) = watch::channel(ChartView::loading());

        Ok(SaleChart {
            connector,
            auction,
            cfg: self.cfg,
            resampler,
            gate: ChangeGate::new(),
            in_flight: Mutex::new(()),
            view_tx,
        })
    }
}

impl SaleChart {
    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "salechart::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, ChartError>
    where
        Fut: core::future::Future<Output = Result<T, ChartError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(ChartError::provider_timeout(connector_name, capability)))
    }

    /// Start building a new `SaleChart`.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use salechart::SaleChart;
    /// use salechart_mock::{FixedAuction, MockConnector};
    ///
    /// let chart = SaleChart::builder()
    ///     .with_connector(Arc::new(MockConnector::new()))
    ///     .auction(Arc::new(FixedAuction::hyperbolic_fixture()?))
    ///     .num_ticks(100)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> SaleChartBuilder {
        SaleChartBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ChartConfig {
        &self.cfg
    }

    /// Name of the registered connector.
    #[must_use]
    pub fn connector_name(&self) -> &'static str {
        self.connector.name()
    }

    /// Observe published views. The receiver starts at the current view.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ChartView> {
        self.view_tx.subscribe()
    }

    /// Snapshot of the currently published view.
    #[must_use]
    pub fn current(&self) -> ChartView {
        self.view_tx.borrow().clone()
    }
}
