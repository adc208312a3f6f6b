//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to runtime events emitted by the dispatch loop, the
//! worker pool and the dispatcher facade.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Dispatcher` (queued, shutdown), `DispatchLoop`
//!   (dispatched), `WorkerPool` (starting/stopped/failed/panicked).
//! - **Consumers**: the subscriber listener spawned by `DispatcherBuilder`,
//!   plus any receiver obtained via [`Dispatcher::subscribe`](crate::Dispatcher::subscribe).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
