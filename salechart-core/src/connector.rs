use async_trait::async_trait;

use crate::types::{ChartError, RaisedObservation, SaleStatus};

/// Focused role trait for backends that report the aggregate sale status.
#[async_trait]
pub trait StatusProvider: Send + Sync {
    /// Fetch the current aggregate status.
    async fn status(&self) -> Result<SaleStatus, ChartError>;
}

/// Focused role trait for backends that serve the raised history.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Fetch every cumulative raised observation, in any order.
    async fn chart_data(&self) -> Result<Vec<RaisedObservation>, ChartError>;
}

/// Main connector trait implemented by sale backends. Exposes capability discovery.
pub trait SaleConnector: Send + Sync {
    /// Stable connector name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Human-readable vendor or deployment label.
    fn vendor(&self) -> &'static str {
        self.name()
    }

    /// If implemented, returns a trait object for status polling.
    fn as_status_provider(&self) -> Option<&dyn StatusProvider> {
        None
    }

    /// If implemented, returns a trait object for the raised history.
    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        None
    }
}
