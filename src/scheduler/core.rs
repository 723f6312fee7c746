//! Scheduler implementation

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::{Mutex, oneshot};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::error::SchedulerError;

use super::config::SchedulerConfig;
use super::queue::{BoxedJob, JobHandle, QueueState, SchedulerStats};

/// Internal state protected by mutex
struct Inner {
    /// FIFO queue of jobs not yet admitted
    queue: VecDeque<BoxedJob>,

    /// Jobs admitted and not yet completed (a job waiting out the start
    /// spacing already counts)
    active: usize,

    /// Committed start time of the most recently admitted job
    last_start: Option<Instant>,

    /// Statistics
    stats: SchedulerStats,
}

impl Inner {
    fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            active: 0,
            last_start: None,
            stats: SchedulerStats::default(),
        }
    }
}

/// The RequestScheduler gates arbitrary asynchronous operations behind a
/// concurrency ceiling and a minimum spacing between consecutive starts,
/// draining submissions in FIFO order.
///
/// Outcomes pass through verbatim: the scheduler never retries, wraps, or
/// suppresses what an operation produces, and a failing operation never
/// blocks the jobs queued behind it.
pub struct RequestScheduler {
    config: SchedulerConfig,
    inner: Arc<Mutex<Inner>>,
}

impl RequestScheduler {
    /// Create a new scheduler with the given configuration
    ///
    /// Fails with [`SchedulerError::InvalidConcurrency`] if the
    /// configuration could never admit a job.
    pub fn new(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        debug!(?config, "RequestScheduler::new: called");
        config.validate()?;
        Ok(Self {
            config,
            inner: Arc::new(Mutex::new(Inner::new())),
        })
    }

    /// Create a scheduler with the default configuration (5 concurrent
    /// operations, 300ms start spacing)
    pub fn with_defaults() -> Self {
        debug!("RequestScheduler::with_defaults: called");
        Self {
            config: SchedulerConfig::default(),
            inner: Arc::new(Mutex::new(Inner::new())),
        }
    }

    /// The configuration this scheduler was constructed with
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Submit an operation for scheduled execution
    ///
    /// Returns immediately with a handle to the operation's eventual
    /// outcome; the operation itself is deferred until the concurrency
    /// ceiling and the start spacing allow it to begin. Exactly one
    /// admission check runs per submission.
    pub async fn submit<T, F, Fut>(&self, operation: F) -> JobHandle<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        debug!("RequestScheduler::submit: called");
        let (tx, rx) = oneshot::channel();

        let job: BoxedJob = Box::new(move || {
            async move {
                let outcome = operation().await;
                // The caller may have dropped its handle; the outcome is
                // theirs to discard.
                let _ = tx.send(outcome);
            }
            .boxed()
        });

        {
            let mut inner = self.inner.lock().await;
            inner.queue.push_back(job);
            inner.stats.total_submitted += 1;
            inner.stats.peak_queue_depth = inner.stats.peak_queue_depth.max(inner.queue.len());
        }

        Self::run_next(&self.inner, &self.config).await;

        JobHandle::new(rx)
    }

    /// Discard every job still waiting in the queue
    ///
    /// Jobs already admitted are unaffected, and the scheduler remains
    /// usable for later submissions. The handle of a discarded job resolves
    /// with [`SchedulerError::Cleared`].
    pub async fn clear(&self) {
        debug!("RequestScheduler::clear: called");
        let mut inner = self.inner.lock().await;
        let dropped = inner.queue.len();
        inner.queue.clear();
        inner.stats.total_cleared += dropped as u64;
        drop(inner);

        if dropped > 0 {
            info!(dropped, "cleared pending queue");
        }
    }

    /// Get the current queue occupancy
    pub async fn queue_state(&self) -> QueueState {
        debug!("RequestScheduler::queue_state: called");
        let inner = self.inner.lock().await;

        QueueState {
            active: inner.active,
            queued: inner.queue.len(),
            stats: inner.stats.clone(),
        }
    }

    /// Get the scheduler statistics
    pub async fn stats(&self) -> SchedulerStats {
        debug!("RequestScheduler::stats: called");
        let inner = self.inner.lock().await;
        inner.stats.clone()
    }

    /// Admit at most one queued job, if capacity allows
    ///
    /// Runs exactly once per submission and once per completion; with an
    /// empty queue or a full set of slots it is a no-op. The start slot is
    /// computed and committed under the same lock acquisition, so no other
    /// admission can interleave between the two and any two consecutive
    /// starts stay at least `min_interval` apart.
    fn run_next(inner: &Arc<Mutex<Inner>>, config: &SchedulerConfig) -> BoxFuture<'static, ()> {
        let inner = Arc::clone(inner);
        let config = config.clone();

        async move {
            let mut guard = inner.lock().await;

            if guard.active >= config.max_concurrent {
                debug!(active = guard.active, "RequestScheduler::run_next: at capacity");
                return;
            }
            let Some(job) = guard.queue.pop_front() else {
                debug!("RequestScheduler::run_next: queue empty");
                return;
            };

            guard.active += 1;
            guard.stats.peak_concurrent = guard.stats.peak_concurrent.max(guard.active);

            let now = Instant::now();
            let start_at = match guard.last_start {
                Some(last) => now.max(last + config.min_interval()),
                None => now,
            };
            guard.last_start = Some(start_at);

            debug!(
                active = guard.active,
                queued = guard.queue.len(),
                ?start_at,
                "RequestScheduler::run_next: admitted"
            );
            drop(guard);

            let runner_inner = Arc::clone(&inner);
            tokio::spawn(async move {
                tokio::time::sleep_until(start_at).await;

                // The operation runs in its own task so a panic inside it
                // cannot skip the slot bookkeeping below.
                if let Err(err) = tokio::spawn(job()).await {
                    warn!(%err, "job aborted before settling");
                }

                let mut guard = runner_inner.lock().await;
                guard.active -= 1;
                guard.stats.total_completed += 1;
                drop(guard);

                Self::run_next(&runner_inner, &config).await;
            });
        }
        .boxed()
    }
}
