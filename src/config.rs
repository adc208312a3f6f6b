//! # Global dispatcher configuration.
//!
//! Provides [`DispatcherConfig`], the centralized settings for a dispatcher
//! instance. The worker count and pickup policy are fixed for the
//! dispatcher's lifetime once it is built.
//!
//! ## Sentinel values
//! - `workers = 0` → clamped to 1 (the pool always has at least one worker)
//! - `bus_capacity` → clamped to a minimum of 1 by the bus

use std::time::Duration;

use crate::queue::OrderPolicy;

/// Configuration for a [`Dispatcher`](crate::Dispatcher).
///
/// Defines:
/// - **Concurrency**: number of pool workers (= admission gate capacity)
/// - **Scheduling**: which pending job is picked up next
/// - **Event system**: bus capacity for event delivery
/// - **Shutdown behavior**: grace period for draining in-flight jobs
///
/// All fields are public for flexibility. Prefer the clamp accessors over
/// reading fields raw when a lower bound matters.
#[derive(Clone, Debug)]
pub struct DispatcherConfig {
    /// Number of worker tasks executing jobs concurrently.
    ///
    /// Also sizes the admission gate: at most `workers` jobs run
    /// simultaneously, regardless of how fast submissions arrive.
    pub workers: usize,

    /// Pickup order for pending jobs.
    ///
    /// See [`OrderPolicy`] for the trade-off between fairness and freshness.
    pub policy: OrderPolicy,

    /// Capacity of the event bus broadcast ring buffer.
    ///
    /// Slow subscribers that lag behind more than `bus_capacity` events will
    /// observe `Lagged` and skip older items. Minimum value is 1 (enforced by
    /// the bus).
    pub bus_capacity: usize,

    /// Maximum time [`shutdown`](crate::Dispatcher::shutdown) waits for
    /// in-flight jobs to finish before force-terminating workers.
    pub grace: Duration,
}

impl DispatcherConfig {
    /// Returns the worker count clamped to a minimum of 1.
    #[inline]
    pub fn workers_clamped(&self) -> usize {
        self.workers.max(1)
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for DispatcherConfig {
    /// Default configuration:
    ///
    /// - `workers = 3`
    /// - `policy = OrderPolicy::NewestFirst`
    /// - `bus_capacity = 1024`
    /// - `grace = 60s`
    fn default() -> Self {
        Self {
            workers: 3,
            policy: OrderPolicy::default(),
            bus_capacity: 1024,
            grace: Duration::from_secs(60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = DispatcherConfig::default();
        assert_eq!(cfg.workers, 3);
        assert_eq!(cfg.policy, OrderPolicy::NewestFirst);
        assert_eq!(cfg.bus_capacity, 1024);
    }

    #[test]
    fn test_workers_clamped_to_one() {
        let cfg = DispatcherConfig {
            workers: 0,
            ..DispatcherConfig::default()
        };
        assert_eq!(cfg.workers_clamped(), 1);
    }

    #[test]
    fn test_bus_capacity_clamped_to_one() {
        let cfg = DispatcherConfig {
            bus_capacity: 0,
            ..DispatcherConfig::default()
        };
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
