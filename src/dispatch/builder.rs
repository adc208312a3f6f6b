//! Builder wiring the dispatcher's components together.

use std::sync::Arc;

use tokio::sync::{broadcast, Mutex, RwLock};
use tokio_util::sync::CancellationToken;

use crate::config::DispatcherConfig;
use crate::dispatch::{AdmissionGate, DispatchLoop, Dispatcher, ReadyLatch, WorkerPool};
use crate::events::Bus;
use crate::queue::JobQueue;
use crate::subscribers::Subscriber;

/// Builder for constructing a [`Dispatcher`] with optional subscribers.
pub struct DispatcherBuilder {
    cfg: DispatcherConfig,
    subscribers: Vec<Arc<dyn Subscriber>>,
}

impl DispatcherBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: DispatcherConfig) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive runtime events (queueing, lifecycle, shutdown)
    /// through a dedicated listener task.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscriber>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the dispatcher and starts its runtime components.
    ///
    /// Must be called from within a Tokio runtime: this spawns the dispatch
    /// loop, the worker pool and (when subscribers are set) the listener.
    pub fn build(self) -> Arc<Dispatcher> {
        let cfg = self.cfg;
        let bus = Bus::new(cfg.bus_capacity_clamped());
        let token = CancellationToken::new();

        let gate = Arc::new(AdmissionGate::new(cfg.workers_clamped()));
        let pool = Arc::new(WorkerPool::new(
            cfg.workers_clamped(),
            Arc::clone(&gate),
            bus.clone(),
            token.clone(),
        ));
        let store = Arc::new(Mutex::new(JobQueue::new()));
        let latch = Arc::new(ReadyLatch::new());
        let wake_slot = Arc::new(RwLock::new(None));

        if !self.subscribers.is_empty() {
            spawn_subscriber_listener(&bus, self.subscribers);
        }

        DispatchLoop::new(
            Arc::clone(&store),
            cfg.policy,
            Arc::clone(&gate),
            Arc::clone(&pool),
            bus.clone(),
            Arc::clone(&latch),
            Arc::clone(&wake_slot),
        )
        .run(token.clone());

        Arc::new(Dispatcher::new_internal(
            cfg, bus, store, latch, wake_slot, pool, gate, token,
        ))
    }
}

/// Subscribes to the bus and forwards events to the subscribers in order.
///
/// The listener owns only a receiver, so it exits with `Closed` once every
/// bus sender is gone. Lagged receivers skip missed items and keep going.
fn spawn_subscriber_listener(bus: &Bus, subs: Vec<Arc<dyn Subscriber>>) {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(ev) => {
                    for sub in &subs {
                        sub.handle(&ev).await;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
            }
        }
    });
}
