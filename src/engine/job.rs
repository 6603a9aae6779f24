// src/engine/job.rs

use tokio::sync::oneshot;

use crate::types::{JobFailure, JobId};

/// A unit of work travelling through the queue.
///
/// Synchronous submissions carry a private completion channel; the worker
/// answers on it instead of writing to the result store.
#[derive(Debug)]
pub struct TranslationJob {
    pub id: JobId,
    pub payload: Vec<u8>,
    completion: Option<oneshot::Sender<ConversionResult>>,
}

impl TranslationJob {
    /// Job whose result is stored for later polling.
    pub fn new(id: JobId, payload: Vec<u8>) -> Self {
        Self {
            id,
            payload,
            completion: None,
        }
    }

    /// Job whose result is delivered on the returned receiver.
    pub fn with_completion(
        id: JobId,
        payload: Vec<u8>,
    ) -> (Self, oneshot::Receiver<ConversionResult>) {
        let (tx, rx) = oneshot::channel();
        let job = Self {
            id,
            payload,
            completion: Some(tx),
        };
        (job, rx)
    }

    pub fn is_synchronous(&self) -> bool {
        self.completion.is_some()
    }

    pub(crate) fn take_completion(&mut self) -> Option<oneshot::Sender<ConversionResult>> {
        self.completion.take()
    }
}

/// Terminal outcome of one job. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub job_id: JobId,
    /// Serialized Argo YAML, or the failure that ended the job.
    pub outcome: Result<String, JobFailure>,
}

impl ConversionResult {
    pub fn output(&self) -> Option<&str> {
        self.outcome.as_deref().ok()
    }

    pub fn error(&self) -> Option<&JobFailure> {
        self.outcome.as_ref().err()
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}
