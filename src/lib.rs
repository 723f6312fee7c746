//! reqsched - Request scheduling gate for API clients
//!
//! reqsched throttles the asynchronous operations an API client fires at a
//! backend. Every outbound call is submitted as a job; the scheduler admits
//! at most `max_concurrent` jobs at a time and keeps at least
//! `min_interval` between any two job starts, draining submissions in FIFO
//! order.
//!
//! # Core Concepts
//!
//! - **Opaque Jobs**: a job is any async closure; the scheduler knows
//!   nothing about what it does
//! - **Verbatim Outcomes**: whatever a job produces is forwarded unchanged,
//!   never retried, wrapped, or suppressed
//! - **FIFO Admission**: jobs start in submission order, with no priorities
//!   and no reordering
//! - **Per-Instance State**: each scheduler owns its queue and counters;
//!   independent instances never interfere
//!
//! # Modules
//!
//! - [`scheduler`] - The [`RequestScheduler`] and its configuration
//! - [`error`] - Typed scheduler errors

pub mod error;
pub mod scheduler;

pub use error::SchedulerError;
pub use scheduler::{JobHandle, QueueState, RequestScheduler, SchedulerConfig, SchedulerStats};
