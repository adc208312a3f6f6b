//! Error types used by the taskgate runtime and jobs.
//!
//! This module defines three error enums:
//!
//! - [`RuntimeError`] — errors raised by the dispatch machinery itself.
//! - [`JobError`] — errors raised by individual job executions.
//! - [`SubmitError`] — errors returned when a submission cannot be accepted.
//!
//! All types provide helper methods (`as_label`, `as_message`) for
//! logging/metrics.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by the taskgate runtime.
///
/// These represent failures in the dispatch machinery itself, such as a
/// shutdown drain exceeding its grace period.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Shutdown grace period was exceeded; workers were force-terminated.
    #[error("shutdown grace {grace:?} exceeded; {pending} job(s) left pending; forcing termination")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Number of jobs still pending in the store when the grace expired.
        pending: usize,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use taskgate::RuntimeError;
    /// use std::time::Duration;
    ///
    /// let err = RuntimeError::GraceExceeded { grace: Duration::from_secs(5), pending: 0 };
    /// assert_eq!(err.as_label(), "runtime_grace_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::GraceExceeded { grace, pending } => {
                format!("grace exceeded after {grace:?}; pending jobs={pending}")
            }
        }
    }
}

/// # Errors produced by job execution.
///
/// The dispatcher never retries a failed job and never reports the failure to
/// the submitter; it records the outcome as an event and releases the
/// admission slot regardless.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum JobError {
    /// Job execution failed.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Job observed dispatcher shutdown and exited early.
    ///
    /// Treated as a graceful stop, not a failure.
    #[error("context cancelled")]
    Canceled,
}

impl JobError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use taskgate::JobError;
    ///
    /// let err = JobError::Fail { error: "boom".into() };
    /// assert_eq!(err.as_label(), "job_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            JobError::Fail { .. } => "job_failed",
            JobError::Canceled => "job_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            JobError::Fail { error } => format!("error: {error}"),
            JobError::Canceled => "context cancelled".to_string(),
        }
    }
}

/// Error returned by [`Dispatcher::submit`](crate::Dispatcher::submit).
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// Dispatcher is shut down or its dispatch loop is gone.
    #[error("dispatcher closed")]
    Closed,
}

impl SubmitError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            SubmitError::Closed => "submit_closed",
        }
    }
}
