//! Queue types for the scheduler

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use tokio::sync::oneshot;

use crate::error::SchedulerError;

/// A queued job: owns the caller's operation and the channel that delivers
/// its outcome. Invoking it runs the operation to completion and forwards
/// whatever it produced.
pub(crate) type BoxedJob = Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send>;

/// Pending outcome of a submitted operation
///
/// Resolves with whatever the operation produced once it has been admitted
/// and has run, or with [`SchedulerError::Cleared`] if the job never
/// delivered an outcome: discarded by
/// [`clear`](super::RequestScheduler::clear) before it started, or the
/// operation panicked instead of settling.
#[derive(Debug)]
pub struct JobHandle<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> JobHandle<T> {
    pub(crate) fn new(rx: oneshot::Receiver<T>) -> Self {
        Self { rx }
    }
}

impl<T> Future for JobHandle<T> {
    type Output = Result<T, SchedulerError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        Pin::new(&mut this.rx)
            .poll(cx)
            .map(|outcome| outcome.map_err(|_| SchedulerError::Cleared))
    }
}

/// Diagnostic counters for a scheduler instance
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SchedulerStats {
    pub total_submitted: u64,
    pub total_completed: u64,
    pub total_cleared: u64,
    pub peak_queue_depth: usize,
    pub peak_concurrent: usize,
}

/// Snapshot of scheduler occupancy
#[derive(Debug, Clone)]
pub struct QueueState {
    /// Jobs admitted and not yet completed (includes jobs waiting out the
    /// start spacing)
    pub active: usize,

    /// Jobs still waiting in the FIFO queue
    pub queued: usize,

    /// Counters accumulated over the scheduler's lifetime
    pub stats: SchedulerStats,
}
