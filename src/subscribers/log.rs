//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! [queued] job=warm-cache
//! [dispatched] job=warm-cache
//! [starting] job=warm-cache
//! [failed] job=warm-cache err="connection refused"
//! [stopped] job=warm-cache
//! [shutdown-requested]
//! [drained-within-grace]
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscriber;

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Not intended for production use -
/// implement a custom [`Subscriber`] for structured logging or metrics
/// collection.
pub struct LogWriter;

#[async_trait]
impl Subscriber for LogWriter {
    async fn handle(&self, e: &Event) {
        match e.kind {
            EventKind::JobQueued => {
                println!("[queued] job={:?}", e.job);
            }
            EventKind::JobDispatched => {
                println!("[dispatched] job={:?}", e.job);
            }
            EventKind::JobStarting => {
                println!("[starting] job={:?}", e.job);
            }
            EventKind::JobStopped => {
                println!("[stopped] job={:?}", e.job);
            }
            EventKind::JobFailed => {
                println!("[failed] job={:?} err={:?}", e.job, e.reason);
            }
            EventKind::JobPanicked => {
                println!("[panicked] job={:?} err={:?}", e.job, e.reason);
            }
            EventKind::ShutdownRequested => {
                println!("[shutdown-requested]");
            }
            EventKind::DrainedWithin => {
                println!("[drained-within-grace]");
            }
            EventKind::GraceExceeded => {
                println!("[grace-exceeded]");
            }
        }
    }
}
