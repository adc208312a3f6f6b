//! # Pickup order for pending jobs.
//!
//! [`OrderPolicy`] determines which pending job the dispatch loop removes
//! next. It is fixed at dispatcher construction and applies to every removal
//! for the dispatcher's lifetime.
//!
//! ## Variants
//! - `OldestFirst`: strict FIFO fairness.
//! - `NewestFirst`: LIFO; the most recent submission runs as soon as a slot
//!   frees, ahead of older pending jobs.
//!
//! ## Invariants
//! - Removal order is strict with respect to the queue contents at the moment
//!   of each removal.
//! - Under `NewestFirst`, older pending jobs are deferred, never dropped; no
//!   aging or promotion exists, so they can starve under sustained load.

/// Policy controlling which pending job is picked up next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderPolicy {
    /// Take the oldest pending job (FIFO).
    ///
    /// Use when:
    /// - All submissions are equally important
    /// - Fairness matters more than freshness
    /// - Example: sequential batch processing
    OldestFirst,

    /// Take the newest pending job (LIFO).
    ///
    /// Use when:
    /// - The latest request is the most likely to still be relevant
    /// - Example: user-driven prefetch, cache population
    NewestFirst,
}

impl Default for OrderPolicy {
    /// Returns [`OrderPolicy::NewestFirst`].
    fn default() -> Self {
        OrderPolicy::NewestFirst
    }
}
