//! # Event subscribers for the taskgate runtime.
//!
//! This module provides the [`Subscriber`] trait for handling runtime events
//! broadcast through the [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   DispatchLoop / WorkerPool ── publish(Event) ──► Bus
//!                                                    │
//!                                                    ├──► listener (spawned by the builder)
//!                                                    │         └──► Subscriber::handle(&Event)
//!                                                    │                  ├─► LogWriter
//!                                                    │                  └─► custom ...
//!                                                    └──► Dispatcher::subscribe() receivers
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use taskgate::{Subscriber, Event, EventKind};
//! use async_trait::async_trait;
//!
//! struct FailureCounter;
//!
//! #[async_trait]
//! impl Subscriber for FailureCounter {
//!     async fn handle(&self, event: &Event) {
//!         if event.kind == EventKind::JobFailed {
//!             // increment failure counter
//!         }
//!     }
//! }
//! ```

mod subscriber;

pub use subscriber::Subscriber;

#[cfg(feature = "logging")]
mod log;
#[cfg(feature = "logging")]
pub use log::LogWriter;
