//! Subscriber trait for observing runtime events.

use async_trait::async_trait;

use crate::events::Event;

/// Observer hook for runtime events.
///
/// Handlers run sequentially on the listener task; keep them fast or hand
/// work off to your own task.
#[async_trait]
pub trait Subscriber: Send + Sync {
    /// Handles one event.
    async fn handle(&self, event: &Event);
}
