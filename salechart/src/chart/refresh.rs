use std::sync::Arc;

use salechart_core::{ChartError, ObservationSeries, PlotPoint, RaisedObservation, SaleStatus};

use crate::view::{ChartView, RefreshOutcome};
use crate::SaleChart;

impl SaleChart {
    /// Fetch the sale status and, when the total accounted amount moved,
    /// rebuild and publish the chart.
    ///
    /// Behavior:
    /// - At most one refresh runs at a time; an overlapping call returns
    ///   `Skipped` immediately without contacting the backend.
    /// - The first status always triggers a build. Afterwards an unchanged
    ///   total returns `Unchanged` without fetching the history.
    /// - The new view replaces the old one in a single `watch` update, with
    ///   `loading` cleared.
    ///
    /// # Errors
    /// Returns the connector error (tagged with the connector name), a
    /// `ProviderTimeout`, `Unsupported` when the connector lacks a capability,
    /// or the auction's window error. The previously published view stays in
    /// place and the next call retries the build.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "salechart::refresh",
            skip(self),
            fields(connector = self.connector.name()),
        )
    )]
    pub async fn refresh(&self) -> Result<RefreshOutcome, ChartError> {
        let Ok(_guard) = self.in_flight.try_lock() else {
            #[cfg(feature = "tracing")]
            tracing::debug!("refresh already in flight; skipping");
            return Ok(RefreshOutcome::Skipped);
        };

        let status = self.fetch_status().await?;
        let total = status.total_accounted;
        if !self.gate.changed(total).await {
            #[cfg(feature = "tracing")]
            tracing::debug!(total_accounted = %total, "total accounted unchanged");
            return Ok(RefreshOutcome::Unchanged);
        }

        let observations = self.fetch_history().await?;
        let data = self.build_plot(observations)?;
        let points = data.len();

        self.view_tx.send_replace(ChartView {
            loading: false,
            data,
            total_accounted: Some(total),
        });
        self.gate.commit(total).await;

        #[cfg(feature = "tracing")]
        tracing::info!(
            points,
            total_accounted = %total,
            block = ?status.block,
            "published chart dataset"
        );

        Ok(RefreshOutcome::Published {
            points,
            total_accounted: total,
        })
    }

    /// Forget the last published total so the next refresh rebuilds
    /// regardless of the status. The published view is left untouched.
    pub async fn invalidate(&self) {
        self.gate.reset().await;
    }

    fn build_plot(&self, observations: Vec<RaisedObservation>) -> Result<Arc<[PlotPoint]>, ChartError> {
        let window = self.auction.window()?;
        let series = ObservationSeries::new(observations);
        let dataset = self
            .resampler
            .recompute(&window, self.auction.curve(), &series);
        Ok(dataset.to_plot(&self.cfg.display).into())
    }

    async fn fetch_status(&self) -> Result<SaleStatus, ChartError> {
        let name = self.connector.name();
        let sp = self
            .connector
            .as_status_provider()
            .ok_or_else(|| ChartError::unsupported("status"))?;
        Self::provider_call_with_timeout(name, "status", self.cfg.provider_timeout, sp.status())
            .await
            .map_err(|e| e.tagged(name))
    }

    async fn fetch_history(&self) -> Result<Vec<RaisedObservation>, ChartError> {
        let name = self.connector.name();
        let hp = self
            .connector
            .as_history_provider()
            .ok_or_else(|| ChartError::unsupported("chart-data"))?;
        Self::provider_call_with_timeout(
            name,
            "chart-data",
            self.cfg.provider_timeout,
            hp.chart_data(),
        )
        .await
        .map_err(|e| e.tagged(name))
    }
}
