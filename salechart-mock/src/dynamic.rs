use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use salechart_core::{
    ChartError, HistoryProvider, RaisedObservation, SaleConnector, SaleStatus, StatusProvider,
};

/// Instruction for how a method should behave on its next calls.
#[derive(Debug, Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(ChartError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    status_rule: Option<MockBehavior<SaleStatus>>,
    history_rule: Option<MockBehavior<Vec<RaisedObservation>>>,
    status_calls: usize,
    history_calls: usize,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `status` calls.
    pub async fn set_status_behavior(&self, behavior: MockBehavior<SaleStatus>) {
        self.state.lock().await.status_rule = Some(behavior);
    }

    /// Set the behavior for `chart_data` calls.
    pub async fn set_history_behavior(&self, behavior: MockBehavior<Vec<RaisedObservation>>) {
        self.state.lock().await.history_rule = Some(behavior);
    }

    /// Number of `status` calls received so far.
    pub async fn status_calls(&self) -> usize {
        self.state.lock().await.status_calls
    }

    /// Number of `chart_data` calls received so far.
    pub async fn history_calls(&self) -> usize {
        self.state.lock().await.history_calls
    }

    /// Clear all configured behaviors and call counters.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        *guard = InternalState::default();
    }
}

/// A connector that defers all behavior to an external controller.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn SaleConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn SaleConnector>, controller)
    }
}

async fn play<T>(behavior: Option<MockBehavior<T>>, capability: &'static str) -> Result<T, ChartError> {
    match behavior {
        Some(MockBehavior::Return(v)) => Ok(v),
        Some(MockBehavior::Fail(e)) => Err(e),
        Some(MockBehavior::Hang) => std::future::pending().await,
        None => Err(ChartError::unsupported(capability)),
    }
}

impl SaleConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_status_provider(&self) -> Option<&dyn StatusProvider> {
        Some(self as &dyn StatusProvider)
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        Some(self as &dyn HistoryProvider)
    }
}

#[async_trait]
impl StatusProvider for DynamicMockConnector {
    async fn status(&self) -> Result<SaleStatus, ChartError> {
        // Snapshot the rule so the lock is not held across the await below.
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.status_calls += 1;
            guard.status_rule.clone()
        };
        play(behavior, "status").await
    }
}

#[async_trait]
impl HistoryProvider for DynamicMockConnector {
    async fn chart_data(&self) -> Result<Vec<RaisedObservation>, ChartError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.history_calls += 1;
            guard.history_rule.clone()
        };
        play(behavior, "chart-data").await
    }
}
