//! salechart-core
//!
//! Core types, traits, and the chart-construction algorithm shared across the
//! salechart workspace.
//!
//! - `types`: amounts, timestamps, auction window, observations and chart points.
//! - `curve`: the `AuctionCurve` trait, bundled curves and the `AuctionProvider` seam.
//! - `connector`: the `SaleConnector` trait and its capability provider traits.
//! - `timeseries`: backward-fill lookup, dual-domain resampling and display formatting.
//! - `wire`: backend payload shapes and their conversion into domain types.
//!
//! Async runtime (Tokio)
//! ---------------------
//! The resampler itself is synchronous. `stream::RefreshHandle` wraps a
//! `tokio::task::JoinHandle<()>` and a `tokio::sync::oneshot::Sender<()>` for
//! cooperative shutdown, so code that spawns refreshers must run under a Tokio
//! 1.x runtime.
#![warn(missing_docs)]

/// Connector capability traits and the primary `SaleConnector` interface.
pub mod connector;
/// Auction curve model and auction parameter providers.
pub mod curve;
/// Refresh-task handle utilities.
pub mod stream;
/// Time-series utilities for lookup, resampling, and formatting.
pub mod timeseries;
pub mod types;
pub mod wire;

pub use connector::{HistoryProvider, SaleConnector, StatusProvider};
pub use curve::{AuctionCurve, AuctionProvider, ClockAuction, HyperbolicCurve, LinearCurve};
pub use stream::RefreshHandle;
pub use timeseries::format::{format_point, to_display_units};
pub use timeseries::lookup::ObservationSeries;
pub use timeseries::resample::{
    ChartDataset, Resampler, recompute, target_domain_pass, time_domain_pass, trailing_anchor,
};
pub use types::*;
pub use wire::{RawAmount, RawObservation, RawStatus, RawTime, parse_observations};

pub use rust_decimal::Decimal;
