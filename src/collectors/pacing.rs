use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Gate awaited before every outbound request.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn wait(&self);

    /// Called once the request has completed, successfully or not.
    async fn done(&self) {}
}

/// Waits `interval` after the previous request before letting the next one
/// go. The gap is measured from the moment the previous request completed
/// (as reported by `done`), or from when it started if `done` was never
/// called. The first request goes out immediately; no jitter and no backoff.
pub struct FixedInterval {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl FixedInterval {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Pacer for FixedInterval {
    async fn wait(&self) {
        let mut last = self.last.lock().await;
        if let Some(prev) = *last {
            let ready_at = prev + self.interval;
            if Instant::now() < ready_at {
                tracing::debug!("Pacing: sleeping until next request slot");
                tokio::time::sleep_until(ready_at).await;
            }
        }
        *last = Some(Instant::now());
    }

    async fn done(&self) {
        *self.last.lock().await = Some(Instant::now());
    }
}
