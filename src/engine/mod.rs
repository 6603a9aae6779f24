// src/engine/mod.rs

//! Asynchronous conversion engine.
//!
//! This module ties together:
//! - [`queue`]: the bounded job queue (non-blocking enqueue, shared dequeue)
//! - [`pool`]: the fixed worker pool draining it
//! - [`store`]: completed results keyed by job id
//! - [`backend`]: what a worker actually runs for a job
//! - [`service`]: the object owning all of the above, handed to the HTTP layer

pub mod backend;
pub mod job;
pub mod pool;
pub mod queue;
pub mod service;
pub mod store;

pub use backend::{ConversionBackend, ConversionFuture, TranslatorBackend};
pub use job::{ConversionResult, TranslationJob};
pub use pool::WorkerPool;
pub use queue::{job_queue, EnqueueError, JobReceiver, JobSender};
pub use service::{ConversionService, ServiceOptions};
pub use store::{JobLookup, ResultStore};
