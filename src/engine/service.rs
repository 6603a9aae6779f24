// src/engine/service.rs

//! The conversion service: one bounded queue, one result store, one worker
//! pool, constructed once at startup and shared by every request handler.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use super::backend::ConversionBackend;
use super::job::{ConversionResult, TranslationJob};
use super::pool::WorkerPool;
use super::queue::{job_queue, EnqueueError, JobSender};
use super::store::{JobLookup, ResultStore};
use crate::errors::{Gha2ArgoError, Result};
use crate::types::JobId;

/// Sizing for the queue and pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOptions {
    /// Number of workers (`M`).
    pub workers: usize,
    /// Maximum number of pending jobs (`C`).
    pub queue_capacity: usize,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            workers: 5,
            queue_capacity: 100,
        }
    }
}

pub struct ConversionService {
    /// `None` once the service is shutting down.
    sender: Mutex<Option<JobSender>>,
    store: Arc<ResultStore>,
    pool: tokio::sync::Mutex<Option<WorkerPool>>,
    workers: usize,
    queue_capacity: usize,
}

impl std::fmt::Debug for ConversionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionService")
            .field("workers", &self.workers)
            .field("queue_capacity", &self.queue_capacity)
            .finish_non_exhaustive()
    }
}

impl ConversionService {
    /// Build the queue and store and spawn the worker pool.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(options: ServiceOptions, backend: Arc<dyn ConversionBackend>) -> Self {
        let (sender, receiver) = job_queue(options.queue_capacity);
        let store = Arc::new(ResultStore::new());
        let pool = WorkerPool::start(options.workers, receiver, Arc::clone(&store), backend);

        info!(
            workers = pool.size(),
            queue_capacity = sender.capacity(),
            "conversion service started"
        );

        Self {
            workers: pool.size(),
            queue_capacity: sender.capacity(),
            sender: Mutex::new(Some(sender)),
            store,
            pool: tokio::sync::Mutex::new(Some(pool)),
        }
    }

    /// Submit and wait for this job's result.
    ///
    /// Fails fast with [`Gha2ArgoError::QueueFull`] without creating a job
    /// when the queue has no room.
    pub async fn submit_sync(&self, payload: Vec<u8>) -> Result<ConversionResult> {
        let id = JobId::generate();
        let (job, completion) = TranslationJob::with_completion(id.clone(), payload);
        self.enqueue(job)?;
        debug!(job_id = %id, mode = "sync", "job queued; waiting for result");

        await_completion(&id, completion).await
    }

    /// Submit and return the job id immediately; poll with [`Self::poll`].
    pub fn submit_async(&self, payload: Vec<u8>) -> Result<JobId> {
        let id = JobId::generate();

        // Marker goes in first so a fast worker can never be overwritten.
        self.store.mark_processing(&id);
        if let Err(e) = self.enqueue(TranslationJob::new(id.clone(), payload)) {
            self.store.forget(&id);
            return Err(e);
        }

        debug!(job_id = %id, mode = "async", "job queued");
        Ok(id)
    }

    pub fn poll(&self, id: &JobId) -> JobLookup {
        self.store.lookup(id)
    }

    /// Completed result for `id`; `None` while processing or if never issued.
    pub fn get(&self, id: &JobId) -> Option<ConversionResult> {
        self.store.get(id)
    }

    /// Jobs waiting in the queue (not counting ones being processed).
    pub fn queued(&self) -> usize {
        self.sender.lock().as_ref().map(JobSender::len).unwrap_or(0)
    }

    /// Async jobs accepted but not yet completed.
    pub fn processing(&self) -> usize {
        self.store.processing_count()
    }

    /// Async results currently held by the store.
    pub fn completed(&self) -> usize {
        self.store.completed_count()
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    /// Close the queue, let workers drain what is left, and wait for them.
    pub async fn shutdown(&self) {
        if self.sender.lock().take().is_some() {
            info!("job queue closed; draining workers");
        }
        if let Some(pool) = self.pool.lock().await.take() {
            pool.join().await;
        }
    }

    fn enqueue(&self, job: TranslationJob) -> Result<()> {
        let guard = self.sender.lock();
        let Some(sender) = guard.as_ref() else {
            return Err(Gha2ArgoError::QueueClosed);
        };

        match sender.try_enqueue(job) {
            Ok(()) => Ok(()),
            Err(EnqueueError::Full(job)) => {
                warn!(job_id = %job.id, capacity = sender.capacity(), "queue full; rejecting job");
                Err(Gha2ArgoError::QueueFull)
            }
            Err(EnqueueError::Closed(_)) => Err(Gha2ArgoError::QueueClosed),
        }
    }
}

/// Wait on a synchronous job's private channel. A dropped sender means the
/// job was lost inside the pool, not that the service is shutting down.
async fn await_completion(
    id: &JobId,
    completion: oneshot::Receiver<ConversionResult>,
) -> Result<ConversionResult> {
    completion
        .await
        .map_err(|_| Gha2ArgoError::JobAbandoned(id.to_string()))
}
