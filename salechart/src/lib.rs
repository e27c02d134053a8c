//! salechart refreshes and publishes a token-sale progress chart.
//!
//! Overview
//! - Asks a `SaleConnector` for the sale status and rebuilds the chart only
//!   when the total accounted amount moves.
//! - Resamples the raised history against the auction curve with the
//!   dual-domain resampler from `salechart_core`.
//! - Publishes display-ready points through a `tokio::sync::watch` channel so
//!   observers never see a half-built dataset.
//!
//! Key behaviors
//! - Single flight: overlapping refreshes are skipped, not queued.
//! - Failures leave the last published view in place and are retried on the
//!   next trigger.
//! - Every connector call is bounded by `provider_timeout`.
//! - The refresher task reacts to a caller-supplied stream of `Trigger`s and,
//!   optionally, to a jittered polling timer.
//!
//! Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use salechart::{SaleChart, Trigger};
//! use salechart_mock::{FixedAuction, MockConnector};
//!
//! let chart = Arc::new(
//!     SaleChart::builder()
//!         .with_connector(Arc::new(MockConnector::new()))
//!         .auction(Arc::new(FixedAuction::hyperbolic_fixture()?))
//!         .build()?,
//! );
//! let outcome = chart.refresh().await?;
//! let view = chart.current();
//! assert!(!view.loading);
//!
//! let handle = chart.spawn_refresher(futures::stream::iter([Trigger::Block(1)]));
//! handle.stop().await;
//! ```
#![warn(missing_docs)]

mod chart;
pub(crate) mod core;
mod view;

pub use chart::refresher::Trigger;
pub use core::{SaleChart, SaleChartBuilder};
pub use view::{ChartView, RefreshOutcome};

// Re-export core types for convenience
pub use salechart_core::{
    Amount, AuctionCurve, AuctionProvider, AuctionWindow, ChartConfig, ChartDataset, ChartError,
    ChartPoint, ClockAuction, DisplayUnits, HistoryProvider, HyperbolicCurve, LinearCurve,
    ObservationSeries, PlotPoint, PollConfig, RaisedObservation, RefreshHandle, Resampler,
    SaleConnector, SaleStatus, StatusProvider, Timestamp,
};
