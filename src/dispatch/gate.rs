//! # Counting admission gate.
//!
//! [`AdmissionGate`] bounds how many jobs may execute at once. It is sized to
//! the worker count and used in counting style: the dispatch loop acquires a
//! slot after handing each job to the pool, and the pool releases the slot
//! when the job finishes, successfully or not.
//!
//! Without the gate, a burst of submissions would be pulled from the store
//! and pile into the pool before any job finishes, so `NewestFirst` would
//! degenerate toward arrival order. Blocking the loop while all slots are
//! taken lets pending jobs accumulate in the store, where the ordering
//! policy can still choose among them.
//!
//! ## Rules
//! - `acquire()` blocks while no slot is free.
//! - Every dispatched job pairs with exactly one `release()`.
//! - A closed gate fails `acquire()`; the loop treats that as shutdown.

use tokio::sync::{AcquireError, Semaphore};

/// Counting gate limiting concurrently-executing jobs.
pub(crate) struct AdmissionGate {
    sem: Semaphore,
}

impl AdmissionGate {
    /// Creates a gate with `capacity` free slots.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            sem: Semaphore::new(capacity),
        }
    }

    /// Currently free slots.
    #[allow(dead_code)]
    pub(crate) fn available(&self) -> usize {
        self.sem.available_permits()
    }

    /// Takes one slot, waiting until one is free.
    ///
    /// Fails only when the gate has been closed for shutdown.
    pub(crate) async fn acquire(&self) -> Result<(), AcquireError> {
        self.sem.acquire().await.map(|permit| permit.forget())
    }

    /// Returns one slot.
    pub(crate) fn release(&self) {
        self.sem.add_permits(1);
    }

    /// Closes the gate, failing current and future `acquire` calls.
    pub(crate) fn close(&self) {
        self.sem.close();
    }
}
