// src/engine/queue.rs

//! Bounded FIFO job queue shared by all producers and workers.
//!
//! - Producers call [`JobSender::try_enqueue`], which never waits: it either
//!   accepts the job or hands it back as [`EnqueueError::Full`].
//! - Workers share one [`JobReceiver`] and block in
//!   [`JobReceiver::dequeue`] until a job arrives, or get `None` once the
//!   sender is gone and the buffer is drained.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

use super::job::TranslationJob;

/// Why a job could not be enqueued. The job is handed back untouched.
#[derive(Debug)]
pub enum EnqueueError {
    Full(TranslationJob),
    Closed(TranslationJob),
}

/// Create a queue holding at most `capacity` pending jobs.
///
/// `capacity` is clamped to at least 1.
pub fn job_queue(capacity: usize) -> (JobSender, JobReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        JobSender { tx },
        JobReceiver {
            rx: Arc::new(Mutex::new(rx)),
        },
    )
}

/// Producer side. Not `Clone`; dropping it closes the queue.
#[derive(Debug)]
pub struct JobSender {
    tx: mpsc::Sender<TranslationJob>,
}

impl JobSender {
    pub fn try_enqueue(&self, job: TranslationJob) -> Result<(), EnqueueError> {
        self.tx.try_send(job).map_err(|e| match e {
            mpsc::error::TrySendError::Full(job) => EnqueueError::Full(job),
            mpsc::error::TrySendError::Closed(job) => EnqueueError::Closed(job),
        })
    }

    /// Jobs currently waiting in the buffer.
    pub fn len(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.tx.max_capacity()
    }
}

/// Consumer side, cloned into every worker.
#[derive(Debug, Clone)]
pub struct JobReceiver {
    rx: Arc<Mutex<mpsc::Receiver<TranslationJob>>>,
}

impl JobReceiver {
    /// Wait for the next job. Only one worker waits on the channel at a
    /// time; the others queue up on the lock.
    pub async fn dequeue(&self) -> Option<TranslationJob> {
        let mut rx = self.rx.lock().await;
        rx.recv().await
    }
}
