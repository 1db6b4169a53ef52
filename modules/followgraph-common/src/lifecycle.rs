use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::Closed;

/// How often an in-progress wait re-checks the shutdown flag.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Shared open/closed flag observed by every blocking operation.
///
/// Clones share the same underlying flag. The transition is one-way:
/// once `close()` is called the lifecycle stays closed, and every
/// subsequent `guard()` or `sleep()` unwinds with [`Closed`].
#[derive(Clone, Default)]
pub struct Lifecycle {
    closed: Arc<AtomicBool>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip OPEN → CLOSED. Idempotent.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Relaxed);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Relaxed)
    }

    /// Bail out with the closed signal if shutdown has been requested.
    pub fn guard(&self) -> Result<(), Closed> {
        if self.is_closed() {
            Err(Closed)
        } else {
            Ok(())
        }
    }

    /// Sleep for `duration`, re-checking the flag every [`POLL_INTERVAL`].
    ///
    /// If the lifecycle closes mid-wait the sleep unwinds with [`Closed`]
    /// within one polling interval instead of running to completion.
    pub async fn sleep(&self, duration: Duration) -> Result<(), Closed> {
        let deadline = Instant::now() + duration;
        loop {
            self.guard()?;
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            let step = POLL_INTERVAL.min(deadline - now);
            tokio::time::sleep(step).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_is_one_way_and_idempotent() {
        let lifecycle = Lifecycle::new();
        assert!(!lifecycle.is_closed());
        assert!(lifecycle.guard().is_ok());

        lifecycle.close();
        lifecycle.close();
        assert!(lifecycle.is_closed());
        assert_eq!(lifecycle.guard(), Err(Closed));
    }

    #[test]
    fn clones_share_the_flag() {
        let lifecycle = Lifecycle::new();
        let handle = lifecycle.clone();
        handle.close();
        assert!(lifecycle.is_closed());
    }

    #[tokio::test]
    async fn sleep_completes_when_open() {
        let lifecycle = Lifecycle::new();
        let started = std::time::Instant::now();
        lifecycle
            .sleep(Duration::from_millis(150))
            .await
            .expect("open lifecycle should sleep to completion");
        assert!(started.elapsed() >= Duration::from_millis(150));
    }

    #[tokio::test]
    async fn sleep_unwinds_within_one_poll_interval_of_close() {
        let lifecycle = Lifecycle::new();
        let handle = lifecycle.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            handle.close();
        });

        let started = std::time::Instant::now();
        let result = lifecycle.sleep(Duration::from_secs(30)).await;
        assert_eq!(result, Err(Closed));
        // 50ms until the flip plus at most one 100ms poll tick, with slack.
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn sleep_on_closed_lifecycle_returns_immediately() {
        let lifecycle = Lifecycle::new();
        lifecycle.close();
        assert_eq!(lifecycle.sleep(Duration::from_secs(30)).await, Err(Closed));
    }
}
