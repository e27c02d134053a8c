use tokio::sync::Mutex;

use salechart_core::Amount;

/// Remembers the total accounted amount of the last published dataset.
///
/// `changed` never records anything; callers `commit` only once the dataset
/// for that total has been published, so a failed build is retried.
pub struct ChangeGate {
    last: Mutex<Option<Amount>>,
}

impl ChangeGate {
    pub fn new() -> Self {
        Self {
            last: Mutex::new(None),
        }
    }

    /// True when `total` differs from the committed value or nothing was committed yet.
    pub async fn changed(&self, total: Amount) -> bool {
        let guard = self.last.lock().await;
        *guard != Some(total)
    }

    pub async fn commit(&self, total: Amount) {
        *self.last.lock().await = Some(total);
    }

    /// Forget the committed value so the next status always rebuilds.
    pub async fn reset(&self) {
        *self.last.lock().await = None;
    }
}
