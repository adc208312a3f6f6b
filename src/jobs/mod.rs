//! # Job abstractions.
//!
//! This module provides the core job-related types:
//! - [`Job`] - trait for implementing async cancel-aware units of work
//! - [`JobFn`] - function-backed job implementation
//! - [`JobRef`] - shared reference to a job (`Arc<dyn Job>`)

mod job;
mod job_fn;

pub use job::Job;
pub use job_fn::{JobFn, JobRef};
