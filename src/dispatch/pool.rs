//! # Fixed-size worker pool.
//!
//! [`WorkerPool`] spawns N long-lived worker tasks over one shared internal
//! channel. `execute()` hands a job to the next free worker; while all are
//! busy, jobs wait in the channel. This internal queuing is a fallback, not
//! the ordering mechanism: ordering is decided in the store before a job
//! ever reaches the pool.
//!
//! ## Rules
//! - At most N job bodies run concurrently, by construction.
//! - Every dequeued job releases one admission-gate slot when it finishes,
//!   whatever the outcome (success, error, or panic).
//! - A panicking job is contained at an inner task boundary; the worker
//!   survives and publishes [`EventKind::JobPanicked`].
//! - Workers exit between jobs when the runtime token is cancelled; the
//!   current job is always run to completion.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::dispatch::AdmissionGate;
use crate::error::JobError;
use crate::events::{Bus, Event, EventKind};
use crate::jobs::JobRef;

/// Fixed set of worker tasks executing job bodies concurrently.
pub(crate) struct WorkerPool {
    tx: mpsc::UnboundedSender<JobRef>,
    workers: Mutex<Option<JoinSet<()>>>,
}

impl WorkerPool {
    /// Spawns `size` workers sharing one internal queue.
    pub(crate) fn new(
        size: usize,
        gate: Arc<AdmissionGate>,
        bus: Bus,
        token: CancellationToken,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<JobRef>();
        let rx = Arc::new(Mutex::new(rx));

        let mut set = JoinSet::new();
        for _ in 0..size {
            set.spawn(worker_loop(
                Arc::clone(&rx),
                Arc::clone(&gate),
                bus.clone(),
                token.clone(),
            ));
        }

        Self {
            tx,
            workers: Mutex::new(Some(set)),
        }
    }

    /// Hands a job to the next free worker; queues internally if all are busy.
    pub(crate) fn execute(&self, job: JobRef) -> Result<(), mpsc::error::SendError<JobRef>> {
        self.tx.send(job)
    }

    /// Waits up to `grace` for all workers to finish.
    ///
    /// Returns `true` when every worker exited in time. On timeout the
    /// remaining workers are aborted and `false` is returned. Workers only
    /// exit once the runtime token is cancelled, so cancel first.
    pub(crate) async fn drain(&self, grace: Duration) -> bool {
        let set = self.workers.lock().await.take();
        let Some(mut set) = set else {
            return true;
        };

        let all_joined = async {
            while set.join_next().await.is_some() {}
        };
        match tokio::time::timeout(grace, all_joined).await {
            Ok(()) => true,
            Err(_) => {
                set.abort_all();
                false
            }
        }
    }
}

/// One worker: pull next job, run it, repeat until cancelled or closed.
async fn worker_loop(
    rx: Arc<Mutex<mpsc::UnboundedReceiver<JobRef>>>,
    gate: Arc<AdmissionGate>,
    bus: Bus,
    token: CancellationToken,
) {
    loop {
        let job = tokio::select! {
            _ = token.cancelled() => break,
            job = next_job(&rx) => match job {
                Some(job) => job,
                None => break,
            },
        };
        run_one(job, &gate, &bus, &token).await;
    }
}

/// Locks the shared receiver and pulls the next job.
async fn next_job(rx: &Mutex<mpsc::UnboundedReceiver<JobRef>>) -> Option<JobRef> {
    rx.lock().await.recv().await
}

/// Runs one job body to completion and releases its admission slot.
///
/// The body runs on an inner task so a panic is caught via
/// [`JoinError::is_panic`](tokio::task::JoinError::is_panic) instead of
/// unwinding through the worker. `Canceled` counts as a graceful stop and
/// publishes `JobStopped`, not `JobFailed`.
async fn run_one(job: JobRef, gate: &AdmissionGate, bus: &Bus, token: &CancellationToken) {
    let name = job.name().to_string();
    bus.publish(Event::now(EventKind::JobStarting).with_job(&name));

    let ctx = token.child_token();
    let body = {
        let job = Arc::clone(&job);
        tokio::spawn(async move { job.run(ctx).await })
    };
    let res = body.await;
    gate.release();

    match res {
        Ok(Ok(())) | Ok(Err(JobError::Canceled)) => {
            bus.publish(Event::now(EventKind::JobStopped).with_job(&name));
        }
        Ok(Err(e)) => {
            bus.publish(
                Event::now(EventKind::JobFailed)
                    .with_job(&name)
                    .with_reason(e.to_string()),
            );
        }
        Err(join_err) if join_err.is_panic() => {
            bus.publish(
                Event::now(EventKind::JobPanicked)
                    .with_job(&name)
                    .with_reason(join_err.to_string()),
            );
        }
        Err(_aborted) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::timeout;
    use tokio_util::sync::CancellationToken;

    use crate::jobs::JobFn;

    fn pool(size: usize, gate: &Arc<AdmissionGate>, bus: &Bus) -> (WorkerPool, CancellationToken) {
        let token = CancellationToken::new();
        let pool = WorkerPool::new(size, Arc::clone(gate), bus.clone(), token.clone());
        (pool, token)
    }

    async fn wait_for_kind(rx: &mut tokio::sync::broadcast::Receiver<Event>, kind: EventKind) -> Event {
        loop {
            let ev = timeout(Duration::from_secs(5), rx.recv())
                .await
                .expect("timed out waiting for event")
                .expect("bus closed while waiting");
            if ev.kind == kind {
                return ev;
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_job_completion_releases_gate_slot() {
        let gate = Arc::new(AdmissionGate::new(1));
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let (pool, token) = pool(1, &gate, &bus);

        gate.acquire().await.unwrap();
        assert_eq!(gate.available(), 0);

        pool.execute(JobFn::arc("ok", |_ctx: CancellationToken| async {
            Ok::<_, JobError>(())
        }))
        .unwrap();

        wait_for_kind(&mut rx, EventKind::JobStopped).await;
        assert_eq!(gate.available(), 1, "slot must return after completion");

        token.cancel();
        assert!(pool.drain(Duration::from_secs(1)).await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_failing_job_still_releases_gate_slot() {
        let gate = Arc::new(AdmissionGate::new(1));
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let (pool, token) = pool(1, &gate, &bus);

        gate.acquire().await.unwrap();
        pool.execute(JobFn::arc("boom", |_ctx: CancellationToken| async {
            Err::<(), _>(JobError::Fail { error: "boom".into() })
        }))
        .unwrap();

        let ev = wait_for_kind(&mut rx, EventKind::JobFailed).await;
        assert_eq!(ev.job.as_deref(), Some("boom"));
        assert_eq!(gate.available(), 1, "slot must return after a failure");

        token.cancel();
        assert!(pool.drain(Duration::from_secs(1)).await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    #[allow(unreachable_code)]
    async fn test_panicking_job_is_contained_and_worker_survives() {
        let gate = Arc::new(AdmissionGate::new(1));
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let (pool, token) = pool(1, &gate, &bus);

        pool.execute(JobFn::arc("panics", |_ctx: CancellationToken| async {
            panic!("deliberate test panic");
            Ok::<_, JobError>(())
        }))
        .unwrap();
        pool.execute(JobFn::arc("after", |_ctx: CancellationToken| async {
            Ok::<_, JobError>(())
        }))
        .unwrap();

        let ev = wait_for_kind(&mut rx, EventKind::JobPanicked).await;
        assert_eq!(ev.job.as_deref(), Some("panics"));

        // The same single worker must still be able to run the next job.
        let ev = wait_for_kind(&mut rx, EventKind::JobStopped).await;
        assert_eq!(ev.job.as_deref(), Some("after"));

        token.cancel();
        assert!(pool.drain(Duration::from_secs(1)).await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrency_never_exceeds_pool_size() {
        let gate = Arc::new(AdmissionGate::new(2));
        let bus = Bus::new(256);
        let mut rx = bus.subscribe();
        let (pool, token) = pool(2, &gate, &bus);

        let current = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        for _ in 0..6 {
            let current = Arc::clone(&current);
            let peak = Arc::clone(&peak);
            pool.execute(JobFn::arc("load", move |_ctx: CancellationToken| {
                let current = Arc::clone(&current);
                let peak = Arc::clone(&peak);
                async move {
                    let now = current.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(25)).await;
                    current.fetch_sub(1, Ordering::SeqCst);
                    Ok::<_, JobError>(())
                }
            }))
            .unwrap();
        }

        for _ in 0..6 {
            wait_for_kind(&mut rx, EventKind::JobStopped).await;
        }
        assert!(
            peak.load(Ordering::SeqCst) <= 2,
            "at most 2 jobs may run at once, saw {}",
            peak.load(Ordering::SeqCst)
        );

        token.cancel();
        assert!(pool.drain(Duration::from_secs(1)).await);
    }
}
