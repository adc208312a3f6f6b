//! # Runtime events emitted by the dispatcher.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Queue events**: a job entered the store or was handed to the pool
//! - **Lifecycle events**: job execution flow (starting, stopped, failed, panicked)
//! - **Shutdown events**: drain progress during teardown
//!
//! The [`Event`] struct carries metadata such as timestamps, the job name and
//! a failure reason.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.
//!
//! ## Example
//! ```rust
//! use taskgate::{Event, EventKind};
//!
//! let ev = Event::now(EventKind::JobFailed)
//!     .with_job("warm-cache")
//!     .with_reason("connection refused");
//!
//! assert_eq!(ev.kind, EventKind::JobFailed);
//! assert_eq!(ev.job.as_deref(), Some("warm-cache"));
//! assert_eq!(ev.reason.as_deref(), Some("connection refused"));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Queue events ===
    /// Job was appended to the pending store.
    ///
    /// Sets:
    /// - `job`: job name
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    JobQueued,

    /// Job was removed from the store and handed to the worker pool.
    ///
    /// Published before the dispatch loop blocks on the admission gate, so
    /// the job may still sit in the pool's internal queue waiting for a free
    /// worker.
    ///
    /// Sets:
    /// - `job`: job name
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    JobDispatched,

    // === Job lifecycle events ===
    /// A worker began executing the job body.
    ///
    /// Sets:
    /// - `job`: job name
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    JobStarting,

    /// Job finished successfully **or** exited early on cancellation.
    ///
    /// Sets:
    /// - `job`: job name
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    JobStopped,

    /// Job returned an error. Never retried.
    ///
    /// Sets:
    /// - `job`: job name
    /// - `reason`: failure message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    JobFailed,

    /// Job panicked; the panic was contained at the task boundary and the
    /// worker survived.
    ///
    /// Sets:
    /// - `job`: job name
    /// - `reason`: panic info
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    JobPanicked,

    // === Shutdown events ===
    /// Shutdown requested; no further submissions are accepted.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ShutdownRequested,

    /// All in-flight jobs drained within the configured grace period.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    DrainedWithin,

    /// Grace period exceeded; workers were force-terminated.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    GraceExceeded,
}

/// Runtime event with metadata.
///
/// Create with [`Event::now`], then attach metadata with the `with_*`
/// builders.
#[derive(Debug, Clone)]
pub struct Event {
    /// Event classification.
    pub kind: EventKind,
    /// Job name, when the event concerns a specific job.
    pub job: Option<String>,
    /// Failure or panic message, when applicable.
    pub reason: Option<String>,
    /// Wall-clock timestamp at creation.
    pub at: SystemTime,
    /// Globally monotonic sequence number.
    pub seq: u64,
}

impl Event {
    /// Creates an event stamped with the current time and the next global
    /// sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            kind,
            job: None,
            reason: None,
            at: SystemTime::now(),
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
        }
    }

    /// Attaches a job name.
    pub fn with_job(mut self, job: impl Into<String>) -> Self {
        self.job = Some(job.into());
        self
    }

    /// Attaches a failure or panic reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::now(EventKind::JobQueued);
        let b = Event::now(EventKind::JobQueued);
        let c = Event::now(EventKind::JobStopped);
        assert!(a.seq < b.seq, "seq must increase: {} vs {}", a.seq, b.seq);
        assert!(b.seq < c.seq, "seq must increase: {} vs {}", b.seq, c.seq);
    }

    #[test]
    fn test_builders_attach_metadata() {
        let ev = Event::now(EventKind::JobPanicked)
            .with_job("refill")
            .with_reason("index out of bounds");
        assert_eq!(ev.job.as_deref(), Some("refill"));
        assert_eq!(ev.reason.as_deref(), Some("index out of bounds"));
    }
}
