use std::sync::Arc;

use futures::{Stream, StreamExt};
use salechart_core::RefreshHandle;
use tokio::sync::oneshot;

use crate::SaleChart;
use crate::chart::jitter::next_poll_delay;

/// Event that asks the chart to refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// The auction became ready; also issued once when a refresher starts.
    Ready,
    /// A new block was observed.
    Block(u64),
    /// The polling timer fired.
    Poll,
}

impl SaleChart {
    /// Spawn a background task that refreshes the chart on every trigger.
    ///
    /// Behavior:
    /// - Refreshes once immediately (as `Trigger::Ready`), then once per item
    ///   of `triggers`.
    /// - When polling is configured, also refreshes after `interval_ms` (plus
    ///   jitter) without any trigger. The timer restarts after every refresh.
    /// - Failed refreshes are logged and do not stop the task.
    /// - The task ends when `triggers` is exhausted and polling is off, or
    ///   when the returned handle is stopped or dropped.
    #[must_use = "dropping the handle stops the refresher"]
    pub fn spawn_refresher<S>(self: &Arc<Self>, triggers: S) -> RefreshHandle
    where
        S: Stream<Item = Trigger> + Send + 'static,
    {
        let chart = Arc::clone(self);
        let poll = self.cfg.poll;
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let join = tokio::spawn(async move {
            let mut triggers = Box::pin(triggers);
            let mut triggers_open = true;

            chart.refresh_on(Trigger::Ready).await;
            loop {
                let delay = next_poll_delay(poll);
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => return,
                    next = triggers.next(), if triggers_open => match next {
                        Some(trigger) => chart.refresh_on(trigger).await,
                        None => {
                            triggers_open = false;
                            if delay.is_none() {
                                return;
                            }
                        }
                    },
                    () = tokio::time::sleep(delay.unwrap_or_default()), if delay.is_some() => {
                        chart.refresh_on(Trigger::Poll).await;
                    }
                }
            }
        });

        RefreshHandle::new(join, stop_tx)
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "salechart::refresher::refresh_on", skip(self))
    )]
    async fn refresh_on(&self, trigger: Trigger) {
        // Failures keep the last view; the next trigger retries.
        #[cfg(feature = "tracing")]
        match self.refresh().await {
            Ok(outcome) => tracing::debug!(?trigger, ?outcome, "refresh finished"),
            Err(e) => tracing::warn!(?trigger, error = %e, "refresh failed"),
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = trigger;
            let _ = self.refresh().await;
        }
    }
}
