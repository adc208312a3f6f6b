//! # DispatchLoop: the single coordinator task.
//!
//! Moves jobs from the pending store into the worker pool, one per wake
//! signal, respecting the admission gate.
//!
//! ## Architecture
//! ```text
//! submit() ── append ──► JobQueue        (under one mutex)
//!    │
//!    └────── wake(()) ──► mpsc ──► DispatchLoop
//!                                     │
//!                                     ├─► take(policy) from JobQueue
//!                                     │     └─ None → back to waiting
//!                                     ├─► WorkerPool::execute(job)
//!                                     ├─► publish JobDispatched
//!                                     └─► AdmissionGate::acquire()   (blocks
//!                                         while all slots are taken)
//! ```
//!
//! ## Startup handshake
//! The loop creates its wake endpoint on its own task, publishes the sender
//! into a shared slot, then opens the readiness latch. A submission arriving
//! before the latch opens waits on it; afterwards the sender is guaranteed
//! present.
//!
//! ## Rules
//! - One wake message per submission; wakes are counted, never coalesced. A
//!   coalescing primitive would strand jobs behind a gate-blocked loop.
//! - An empty store on wake is a normal outcome: do nothing, wait again.
//! - Blocking on the gate *after* dispatching is what turns "many jobs
//!   submitted quickly" into "bounded concurrent execution": while all slots
//!   are taken, submissions pile up in the store where the ordering policy
//!   still applies.
//! - The loop exits at its two blocking points when the runtime token is
//!   cancelled, or when the gate is closed. Neither is swallowed; the loop
//!   never proceeds with one fewer slot-wait.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex, RwLock};
use tokio_util::sync::CancellationToken;

use crate::dispatch::{AdmissionGate, ReadyLatch, WorkerPool};
use crate::events::{Bus, Event, EventKind};
use crate::queue::{JobQueue, OrderPolicy};

/// Sender half of the wake channel, published by the loop during startup.
pub(crate) type WakeSender = mpsc::UnboundedSender<()>;

/// Single coordinator pulling jobs from the store into the pool.
pub(crate) struct DispatchLoop {
    store: Arc<Mutex<JobQueue>>,
    policy: OrderPolicy,
    gate: Arc<AdmissionGate>,
    pool: Arc<WorkerPool>,
    bus: Bus,
    latch: Arc<ReadyLatch>,
    wake_slot: Arc<RwLock<Option<WakeSender>>>,
}

impl DispatchLoop {
    /// Creates the loop (call [`run`](Self::run) to start it).
    pub(crate) fn new(
        store: Arc<Mutex<JobQueue>>,
        policy: OrderPolicy,
        gate: Arc<AdmissionGate>,
        pool: Arc<WorkerPool>,
        bus: Bus,
        latch: Arc<ReadyLatch>,
        wake_slot: Arc<RwLock<Option<WakeSender>>>,
    ) -> Self {
        Self {
            store,
            policy,
            gate,
            pool,
            bus,
            latch,
            wake_slot,
        }
    }

    /// Starts the loop on its own task.
    pub(crate) fn run(self, token: CancellationToken) {
        tokio::spawn(async move {
            if let Err(e) = self.run_inner(token).await {
                eprintln!("[taskgate] dispatch loop error: {e:?}");
            }
        });
    }

    async fn run_inner(self, token: CancellationToken) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<()>();
        {
            let mut slot = self.wake_slot.write().await;
            if slot.is_some() {
                anyhow::bail!("dispatch loop already running");
            }
            *slot = Some(tx);
        }
        self.latch.open();

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                wake = rx.recv() => {
                    if wake.is_none() {
                        break;
                    }
                    let job = { self.store.lock().await.take(self.policy) };
                    let Some(job) = job else {
                        continue;
                    };
                    if self.pool.execute(Arc::clone(&job)).is_err() {
                        break;
                    }
                    self.bus
                        .publish(Event::now(EventKind::JobDispatched).with_job(job.name()));

                    tokio::select! {
                        _ = token.cancelled() => break,
                        res = self.gate.acquire() => {
                            if res.is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
