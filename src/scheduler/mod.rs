//! Scheduler for outbound API requests
//!
//! Gates arbitrary asynchronous operations behind a concurrency ceiling and
//! a minimum spacing between starts, draining a FIFO queue in a single
//! component.

mod config;
mod core;
mod queue;

pub use config::SchedulerConfig;
pub use core::RequestScheduler;
pub use queue::{JobHandle, QueueState, SchedulerStats};
