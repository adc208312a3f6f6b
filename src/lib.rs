//! # taskgate
//!
//! **Taskgate** is a bounded-concurrency job dispatcher for Rust.
//!
//! Callers submit opaque units of work; a fixed-size pool of workers executes
//! them, never more than the configured count at once; the order in which
//! pending work is picked up is configurable: oldest-first (FIFO) or
//! newest-first (LIFO). The crate exists to throttle concurrent background
//! work (cache population, prefetch) while letting callers bias scheduling
//! toward the most recently submitted job when freshness matters more than
//! fairness.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   caller #1  │   │   caller #2  │   │   caller #N  │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            └────────── submit(job) ──────────────┘
//!                              ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Dispatcher (facade)                                              │
//! │  - ReadyLatch (startup handshake: block until the loop is up)     │
//! │  - JobQueue (pending store, insertion order, one mutex)           │
//! │  - Bus (broadcast events)                                         │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                 wake (one per submission, counted)
//!                                ▼
//!                     ┌─────────────────────┐
//!                     │    DispatchLoop     │  one coordinator task
//!                     │  take(policy)       │  OldestFirst / NewestFirst
//!                     │  pool.execute(job)  │
//!                     │  gate.acquire()  ◄──┼── blocks while all slots taken
//!                     └──────────┬──────────┘
//!                                ▼
//!             ┌──────────────────────────────────────┐
//!             │  WorkerPool (N workers, one queue)   │
//!             │  worker1    worker2    ...  workerN  │
//!             └───────┬──────────┬────────────┬──────┘
//!                     ▼          ▼            ▼
//!                  job.run()  job.run()    job.run()
//!                     └── on finish: gate.release() ──► loop continues
//! ```
//!
//! ### Lifecycle
//! ```text
//! submit(job)
//!   ├─► wait ReadyLatch            (only before the loop published its endpoint)
//!   ├─► JobQueue::push(job)        (tail append, unbounded)
//!   ├─► publish JobQueued
//!   └─► wake DispatchLoop
//!
//! DispatchLoop, per wake:
//!   ├─► take(policy) from JobQueue ── empty → wait again (normal outcome)
//!   ├─► WorkerPool::execute(job), publish JobDispatched
//!   └─► AdmissionGate::acquire()   ── blocks until a running job finishes
//!
//! Worker, per job:
//!   ├─► publish JobStarting
//!   ├─► run body on an inner task  (panic contained at the task boundary)
//!   ├─► gate.release()             (always: success, error or panic)
//!   └─► publish JobStopped / JobFailed / JobPanicked
//! ```
//!
//! While every worker is busy, the dispatch loop is parked on the gate and
//! submissions pile up in the store; that is what makes `NewestFirst`
//! meaningful under bursts instead of degenerating to arrival order.
//!
//! ## Features
//! | Area              | Description                                               | Key types / traits                     |
//! |-------------------|-----------------------------------------------------------|----------------------------------------|
//! | **Dispatch**      | Submit jobs, bounded concurrent execution.                | [`Dispatcher`], [`DispatcherBuilder`]  |
//! | **Scheduling**    | FIFO or LIFO pickup of pending jobs.                      | [`OrderPolicy`]                        |
//! | **Jobs**          | Define jobs as functions or trait impls.                  | [`Job`], [`JobFn`], [`JobRef`]         |
//! | **Subscriber API**| Hook into job lifecycle events (logging, metrics).        | [`Subscriber`]                         |
//! | **Errors**        | Typed errors for submission, jobs, and the runtime.       | [`SubmitError`], [`JobError`], [`RuntimeError`] |
//! | **Configuration** | Centralize runtime settings.                              | [`DispatcherConfig`]                   |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use taskgate::{Dispatcher, DispatcherConfig, JobError, JobFn, OrderPolicy};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut cfg = DispatcherConfig::default();
//!     cfg.workers = 2;
//!     cfg.policy = OrderPolicy::NewestFirst;
//!
//!     let dispatcher = Dispatcher::builder(cfg).build();
//!
//!     for url in ["a", "b", "c"] {
//!         let target = Arc::new(url.to_string());
//!         dispatcher
//!             .submit(JobFn::arc("prefetch", move |_ctx: CancellationToken| {
//!                 let target = Arc::clone(&target);
//!                 async move {
//!                     // fetch and cache `target`...
//!                     let _ = target;
//!                     Ok::<_, JobError>(())
//!                 }
//!             }))
//!             .await?;
//!     }
//!
//!     dispatcher.shutdown().await?;
//!     Ok(())
//! }
//! ```

mod config;
mod dispatch;
mod error;
mod events;
mod jobs;
mod queue;
mod subscribers;

// ---- Public re-exports ----

pub use config::DispatcherConfig;
pub use dispatch::{Dispatcher, DispatcherBuilder};
pub use error::{JobError, RuntimeError, SubmitError};
pub use events::{Bus, Event, EventKind};
pub use jobs::{Job, JobFn, JobRef};
pub use queue::OrderPolicy;
pub use subscribers::Subscriber;

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
