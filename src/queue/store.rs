//! In-memory store of pending jobs.
//!
//! [`JobQueue`] keeps jobs in insertion order and removes from the end chosen
//! by the active [`OrderPolicy`]. An empty queue yields `None` on removal,
//! which is a normal outcome, not an error.

use std::collections::VecDeque;

use crate::jobs::JobRef;
use crate::queue::OrderPolicy;

/// Ordered, unbounded store of pending jobs.
///
/// Not synchronized; callers must hold exclusive access for every operation.
pub(crate) struct JobQueue {
    jobs: VecDeque<JobRef>,
}

impl JobQueue {
    /// Creates an empty queue.
    pub(crate) fn new() -> Self {
        Self {
            jobs: VecDeque::new(),
        }
    }

    /// Appends a job at the tail. Unbounded; never applies backpressure.
    pub(crate) fn push(&mut self, job: JobRef) {
        self.jobs.push_back(job);
    }

    /// Removes and returns the next job per `policy`, or `None` when empty.
    pub(crate) fn take(&mut self, policy: OrderPolicy) -> Option<JobRef> {
        match policy {
            OrderPolicy::OldestFirst => self.jobs.pop_front(),
            OrderPolicy::NewestFirst => self.jobs.pop_back(),
        }
    }

    /// Number of pending jobs.
    pub(crate) fn len(&self) -> usize {
        self.jobs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JobError;
    use crate::jobs::JobFn;
    use tokio_util::sync::CancellationToken;

    fn job(name: &'static str) -> JobRef {
        JobFn::arc(name, |_ctx: CancellationToken| async {
            Ok::<_, JobError>(())
        })
    }

    fn names(queue: &mut JobQueue, policy: OrderPolicy) -> Vec<String> {
        let mut out = Vec::new();
        while let Some(j) = queue.take(policy) {
            out.push(j.name().to_string());
        }
        out
    }

    #[test]
    fn test_oldest_first_removes_in_submission_order() {
        let mut q = JobQueue::new();
        for n in ["t1", "t2", "t3", "t4"] {
            q.push(job(n));
        }
        assert_eq!(names(&mut q, OrderPolicy::OldestFirst), ["t1", "t2", "t3", "t4"]);
    }

    #[test]
    fn test_newest_first_removes_in_reverse_order() {
        let mut q = JobQueue::new();
        for n in ["t1", "t2", "t3", "t4"] {
            q.push(job(n));
        }
        assert_eq!(names(&mut q, OrderPolicy::NewestFirst), ["t4", "t3", "t2", "t1"]);
    }

    #[test]
    fn test_empty_take_is_none_not_an_error() {
        let mut q = JobQueue::new();
        assert!(q.take(OrderPolicy::OldestFirst).is_none());
        assert!(q.take(OrderPolicy::NewestFirst).is_none());
        assert_eq!(q.len(), 0);
    }

    #[test]
    fn test_interleaved_push_and_take() {
        let mut q = JobQueue::new();
        q.push(job("a"));
        q.push(job("b"));
        assert_eq!(q.take(OrderPolicy::NewestFirst).unwrap().name(), "b");
        q.push(job("c"));
        assert_eq!(q.take(OrderPolicy::NewestFirst).unwrap().name(), "c");
        assert_eq!(q.take(OrderPolicy::NewestFirst).unwrap().name(), "a");
        assert_eq!(q.len(), 0);
    }
}
