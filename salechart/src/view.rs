use std::sync::Arc;

use salechart_core::{Amount, PlotPoint};

/// Value published to chart observers.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    /// True until the first dataset has been published.
    pub loading: bool,
    /// Display-ready points in time order.
    pub data: Arc<[PlotPoint]>,
    /// Total accounted amount the dataset was built for, in base units.
    pub total_accounted: Option<Amount>,
}

impl ChartView {
    /// Initial view: loading, no points.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            loading: true,
            data: Arc::from(Vec::new()),
            total_accounted: None,
        }
    }
}

impl Default for ChartView {
    fn default() -> Self {
        Self::loading()
    }
}

/// Result of a single `SaleChart::refresh` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new dataset was built and published.
    Published {
        /// Number of points in the published dataset.
        points: usize,
        /// Total accounted amount the dataset was built for.
        total_accounted: Amount,
    },
    /// The total accounted amount has not moved since the last publish.
    Unchanged,
    /// Another refresh was already running; this one did nothing.
    Skipped,
}
