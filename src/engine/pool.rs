// src/engine/pool.rs

//! Fixed-size worker pool draining the job queue.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::backend::ConversionBackend;
use super::job::{ConversionResult, TranslationJob};
use super::queue::JobReceiver;
use super::store::ResultStore;
use crate::types::{JobFailure, JobId};

/// `M` independent workers, started once.
///
/// Each worker loops: dequeue one job, run the backend, deliver the
/// result, repeat. A failed conversion is a result like any other; it never
/// stops the worker.
#[derive(Debug)]
pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `workers` (at least 1) Tokio tasks sharing `receiver`.
    pub fn start(
        workers: usize,
        receiver: JobReceiver,
        store: Arc<ResultStore>,
        backend: Arc<dyn ConversionBackend>,
    ) -> Self {
        let handles = (1..=workers.max(1))
            .map(|worker| {
                let receiver = receiver.clone();
                let store = Arc::clone(&store);
                let backend = Arc::clone(&backend);
                tokio::spawn(worker_loop(worker, receiver, store, backend))
            })
            .collect::<Vec<_>>();

        info!(workers = handles.len(), "worker pool started");
        Self { handles }
    }

    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Wait for every worker to exit (after the queue is closed and drained).
    pub async fn join(self) {
        for handle in self.handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "worker task ended abnormally");
            }
        }
        info!("worker pool stopped");
    }
}

async fn worker_loop(
    worker: usize,
    receiver: JobReceiver,
    store: Arc<ResultStore>,
    backend: Arc<dyn ConversionBackend>,
) {
    debug!(worker, "worker started");

    while let Some(job) = receiver.dequeue().await {
        process_job(worker, job, &store, &backend).await;
    }

    debug!(worker, "job queue closed; worker exiting");
}

async fn process_job(
    worker: usize,
    mut job: TranslationJob,
    store: &ResultStore,
    backend: &Arc<dyn ConversionBackend>,
) {
    debug!(worker, job_id = %job.id, sync = job.is_synchronous(), "processing job");

    let outcome = run_isolated(backend, job.id.clone(), std::mem::take(&mut job.payload)).await;
    match &outcome {
        Ok(_) => info!(worker, job_id = %job.id, "job completed"),
        Err(failure) => warn!(
            worker,
            job_id = %job.id,
            kind = %failure.kind,
            error = %failure,
            "job failed"
        ),
    }

    let result = ConversionResult {
        job_id: job.id.clone(),
        outcome,
    };

    match job.take_completion() {
        Some(completion) => {
            if completion.send(result).is_err() {
                debug!(worker, job_id = %job.id, "synchronous caller went away; result dropped");
            }
        }
        None => {
            store.put(result);
        }
    }
}

/// Run one conversion on its own task so a panicking backend fails the job
/// instead of taking the worker down with it.
async fn run_isolated(
    backend: &Arc<dyn ConversionBackend>,
    id: JobId,
    payload: Vec<u8>,
) -> Result<String, JobFailure> {
    let backend = Arc::clone(backend);
    let task = tokio::spawn(async move { backend.convert(&id, &payload).await });

    match task.await {
        Ok(outcome) => outcome,
        Err(e) => Err(JobFailure::build(format!("conversion aborted: {e}"))),
    }
}
