//! # Job abstraction.
//!
//! This module defines the [`Job`] trait, the unit of work the dispatcher
//! executes. A job receives a [`CancellationToken`] that is triggered only
//! when the dispatcher shuts down; there is no per-job cancellation, and a
//! job cannot be withdrawn once submitted.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::JobError;

/// # Asynchronous unit of work.
///
/// A `Job` has a stable [`name`](Job::name) and an async [`run`](Job::run)
/// method. The name exists for observability (events, logs); scheduling is
/// purely positional and never inspects it.
///
/// Long-running bodies *may* check `ctx.is_cancelled()` to exit early during
/// dispatcher shutdown and return [`JobError::Canceled`], which is recorded
/// as a graceful stop.
///
/// # Example
/// ```
/// use tokio_util::sync::CancellationToken;
/// use async_trait::async_trait;
/// use taskgate::{Job, JobError};
///
/// struct WarmCache;
///
/// #[async_trait]
/// impl Job for WarmCache {
///     fn name(&self) -> &str { "warm-cache" }
///
///     async fn run(&self, ctx: CancellationToken) -> Result<(), JobError> {
///         if ctx.is_cancelled() {
///             return Err(JobError::Canceled);
///         }
///         // do work...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Job: Send + Sync + 'static {
    /// Returns a stable, human-readable job name.
    fn name(&self) -> &str;

    /// Executes the job until completion.
    ///
    /// The dispatcher does not catch the error or retry; the outcome is
    /// published as an event and the admission slot is released either way.
    async fn run(&self, ctx: CancellationToken) -> Result<(), JobError>;
}
