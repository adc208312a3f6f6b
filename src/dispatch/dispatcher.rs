//! # Dispatcher: public facade over store, gate, pool and loop.
//!
//! [`Dispatcher`] owns every runtime component and exposes the one operation
//! the outside world calls: [`submit`](Dispatcher::submit). Submission
//! appends the job to the pending store and wakes the dispatch loop; the
//! job's admission slot is returned when it finishes (success, error or
//! panic), by cleanup that runs in the pool regardless of outcome.
//!
//! ## High-level architecture
//! ```text
//! callers (any thread) ──► submit(job)
//!                            ├─ wait readiness latch   (startup handshake only)
//!                            ├─ JobQueue::push(job)    (under mutex)
//!                            ├─ publish JobQueued
//!                            └─ wake ──► DispatchLoop ──► WorkerPool (N workers)
//!                                             │                │
//!                                             └── gate.acquire ◄── gate.release
//!                                                (blocks)         (job finished)
//! ```
//!
//! ## Ordering semantics
//! `OldestFirst` gives strict FIFO fairness. `NewestFirst` gives LIFO: a
//! burst of N+1 submissions while all N workers are busy runs the newest
//! pending job next once a slot frees. Earlier jobs are deferred, never
//! dropped, and can starve under sustained load.
//!
//! Completion order is unconstrained; only removal order follows the policy.

use std::sync::Arc;

use tokio::sync::{broadcast, Mutex, OnceCell, RwLock};
use tokio_util::sync::CancellationToken;

use crate::config::DispatcherConfig;
use crate::dispatch::{AdmissionGate, DispatcherBuilder, ReadyLatch, WakeSender, WorkerPool};
use crate::error::{RuntimeError, SubmitError};
use crate::events::{Bus, Event, EventKind};
use crate::jobs::JobRef;
use crate::queue::{JobQueue, OrderPolicy};

/// Process-wide shared instance (see [`Dispatcher::shared`]).
static SHARED: OnceCell<Arc<Dispatcher>> = OnceCell::const_new();

/// Bounded-concurrency job dispatcher.
///
/// Create with [`Dispatcher::new`] or [`Dispatcher::builder`]; both spawn the
/// dispatch loop and worker pool, so they must run inside a Tokio runtime.
///
/// ## Example
/// ```no_run
/// use taskgate::{Dispatcher, JobFn, JobError, OrderPolicy};
/// use tokio_util::sync::CancellationToken;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let dispatcher = Dispatcher::new(2, OrderPolicy::NewestFirst);
///
///     dispatcher
///         .submit(JobFn::arc("warm-cache", |_ctx: CancellationToken| async {
///             // do work...
///             Ok::<_, JobError>(())
///         }))
///         .await?;
///
///     dispatcher.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct Dispatcher {
    /// Runtime configuration, fixed at construction.
    pub cfg: DispatcherConfig,
    bus: Bus,
    store: Arc<Mutex<JobQueue>>,
    latch: Arc<ReadyLatch>,
    wake_slot: Arc<RwLock<Option<WakeSender>>>,
    pool: Arc<WorkerPool>,
    gate: Arc<AdmissionGate>,
    token: CancellationToken,
}

impl Dispatcher {
    /// Creates a dispatcher with `workers` pool workers and the given pickup
    /// policy; everything else uses [`DispatcherConfig::default`].
    pub fn new(workers: usize, policy: OrderPolicy) -> Arc<Self> {
        let cfg = DispatcherConfig {
            workers,
            policy,
            ..DispatcherConfig::default()
        };
        DispatcherBuilder::new(cfg).build()
    }

    /// Returns a builder for full configuration and subscribers.
    pub fn builder(cfg: DispatcherConfig) -> DispatcherBuilder {
        DispatcherBuilder::new(cfg)
    }

    /// Returns the process-wide shared dispatcher, creating it with default
    /// configuration on first use.
    pub async fn shared() -> Arc<Dispatcher> {
        Self::shared_with(DispatcherConfig::default()).await
    }

    /// Returns the process-wide shared dispatcher, creating it with `cfg` on
    /// first use.
    ///
    /// The first caller's configuration wins for the lifetime of the
    /// process; later calls ignore `cfg` and return the existing instance.
    pub async fn shared_with(cfg: DispatcherConfig) -> Arc<Dispatcher> {
        SHARED
            .get_or_init(|| async move { DispatcherBuilder::new(cfg).build() })
            .await
            .clone()
    }

    pub(crate) fn new_internal(
        cfg: DispatcherConfig,
        bus: Bus,
        store: Arc<Mutex<JobQueue>>,
        latch: Arc<ReadyLatch>,
        wake_slot: Arc<RwLock<Option<WakeSender>>>,
        pool: Arc<WorkerPool>,
        gate: Arc<AdmissionGate>,
        token: CancellationToken,
    ) -> Self {
        Self {
            cfg,
            bus,
            store,
            latch,
            wake_slot,
            pool,
            gate,
            token,
        }
    }

    /// Queues a job for eventual execution on some pool worker.
    ///
    /// No handle or future is returned to observe completion; a job that
    /// needs to deliver a result must do so by side effect inside its own
    /// body. Safe to call from any number of tasks concurrently.
    ///
    /// May wait only during the startup handshake, before the dispatch loop
    /// has published its wake endpoint; afterwards this is append + signal.
    ///
    /// ## Errors
    /// [`SubmitError::Closed`] after [`shutdown`](Self::shutdown), or when
    /// the dispatch loop is gone.
    pub async fn submit(&self, job: JobRef) -> Result<(), SubmitError> {
        if self.token.is_cancelled() {
            return Err(SubmitError::Closed);
        }
        self.latch.wait().await?;

        {
            self.store.lock().await.push(Arc::clone(&job));
        }
        self.bus
            .publish(Event::now(EventKind::JobQueued).with_job(job.name()));

        let wake = self.wake_slot.read().await;
        match wake.as_ref() {
            Some(tx) => tx.send(()).map_err(|_| SubmitError::Closed),
            None => Err(SubmitError::Closed),
        }
    }

    /// Number of jobs waiting in the store (dispatched jobs excluded).
    pub async fn pending(&self) -> usize {
        self.store.lock().await.len()
    }

    /// Creates an independent receiver of runtime events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Stops the dispatcher: no new admissions, in-flight jobs drained.
    ///
    /// Pending jobs still in the store are dropped. Workers finish their
    /// current job and exit; if they do not finish within
    /// [`DispatcherConfig::grace`], they are force-terminated and
    /// [`RuntimeError::GraceExceeded`] is returned.
    ///
    /// Idempotent: later calls return `Ok(())`.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.bus.publish(Event::now(EventKind::ShutdownRequested));
        self.token.cancel();
        self.gate.close();

        if self.pool.drain(self.cfg.grace).await {
            self.bus.publish(Event::now(EventKind::DrainedWithin));
            Ok(())
        } else {
            self.bus.publish(Event::now(EventKind::GraceExceeded));
            let pending = self.store.lock().await.len();
            Err(RuntimeError::GraceExceeded {
                grace: self.cfg.grace,
                pending,
            })
        }
    }
}
