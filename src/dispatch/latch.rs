//! One-shot readiness latch for the startup handshake.
//!
//! The dispatch loop creates its wake endpoint on its own task; submissions
//! arriving before that endpoint exists must wait. [`ReadyLatch`] is that
//! wait: opened exactly once by the loop, observed by any number of
//! submitters. It is a distinct primitive from the admission gate even though
//! both could be built from a semaphore.

use tokio::sync::watch;

use crate::error::SubmitError;

/// One-shot latch: starts closed, opens once, stays open.
pub(crate) struct ReadyLatch {
    tx: watch::Sender<bool>,
    rx: watch::Receiver<bool>,
}

impl ReadyLatch {
    /// Creates a closed latch.
    pub(crate) fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self { tx, rx }
    }

    /// Opens the latch, waking every current and future waiter.
    pub(crate) fn open(&self) {
        let _ = self.tx.send(true);
    }

    /// Waits until the latch is open.
    ///
    /// Returns immediately once open. Fails only if the latch is dropped
    /// while still closed, which means the dispatch loop never came up.
    pub(crate) async fn wait(&self) -> Result<(), SubmitError> {
        let mut rx = self.rx.clone();
        rx.wait_for(|ready| *ready)
            .await
            .map(|_| ())
            .map_err(|_| SubmitError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_wait_blocks_until_open() {
        let latch = Arc::new(ReadyLatch::new());
        let waiter = {
            let latch = Arc::clone(&latch);
            tokio::spawn(async move { latch.wait().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished(), "waiter must block while closed");

        latch.open();
        timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake after open")
            .expect("waiter task should not panic")
            .expect("wait should succeed");
    }

    #[tokio::test]
    async fn test_wait_after_open_returns_immediately() {
        let latch = ReadyLatch::new();
        latch.open();
        timeout(Duration::from_millis(100), latch.wait())
            .await
            .expect("open latch must not block")
            .expect("wait should succeed");
    }

    #[tokio::test]
    async fn test_open_wakes_multiple_waiters() {
        let latch = Arc::new(ReadyLatch::new());
        let mut waiters = Vec::new();
        for _ in 0..4 {
            let latch = Arc::clone(&latch);
            waiters.push(tokio::spawn(async move { latch.wait().await }));
        }
        latch.open();
        for w in waiters {
            timeout(Duration::from_secs(1), w)
                .await
                .expect("every waiter should wake")
                .expect("waiter task should not panic")
                .expect("wait should succeed");
        }
    }
}
