// src/engine/store.rs

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::warn;

use super::job::ConversionResult;
use crate::types::JobId;

#[derive(Debug, Clone)]
enum Entry {
    /// Accepted and queued, no result yet.
    Processing,
    Completed(ConversionResult),
}

/// What a poll for a job id finds.
#[derive(Debug, Clone, PartialEq)]
pub enum JobLookup {
    Completed(ConversionResult),
    Processing,
    Unknown,
}

/// Concurrent map of job id -> terminal result.
///
/// Each id is completed at most once; results are kept for the lifetime of
/// the process.
#[derive(Debug, Default)]
pub struct ResultStore {
    entries: RwLock<HashMap<JobId, Entry>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `id` was accepted and is in flight.
    pub fn mark_processing(&self, id: &JobId) {
        self.entries
            .write()
            .entry(id.clone())
            .or_insert(Entry::Processing);
    }

    /// Drop an in-flight marker for a job that never made it into the queue.
    pub fn forget(&self, id: &JobId) {
        let mut entries = self.entries.write();
        if matches!(entries.get(id), Some(Entry::Processing)) {
            entries.remove(id);
        }
    }

    /// Store the terminal result. Returns `false` (and keeps the first
    /// result) if the id was already completed.
    pub fn put(&self, result: ConversionResult) -> bool {
        let mut entries = self.entries.write();
        if let Some(Entry::Completed(_)) = entries.get(&result.job_id) {
            warn!(job_id = %result.job_id, "result already stored; ignoring second write");
            return false;
        }
        entries.insert(result.job_id.clone(), Entry::Completed(result));
        true
    }

    /// Completed result for `id`, or `None` while processing or unknown.
    pub fn get(&self, id: &JobId) -> Option<ConversionResult> {
        match self.entries.read().get(id) {
            Some(Entry::Completed(result)) => Some(result.clone()),
            _ => None,
        }
    }

    pub fn lookup(&self, id: &JobId) -> JobLookup {
        match self.entries.read().get(id) {
            Some(Entry::Completed(result)) => JobLookup::Completed(result.clone()),
            Some(Entry::Processing) => JobLookup::Processing,
            None => JobLookup::Unknown,
        }
    }

    /// Ids accepted but not yet completed.
    pub fn processing_count(&self) -> usize {
        self.entries
            .read()
            .values()
            .filter(|e| matches!(e, Entry::Processing))
            .count()
    }

    pub fn completed_count(&self) -> usize {
        self.entries
            .read()
            .values()
            .filter(|e| matches!(e, Entry::Completed(_)))
            .count()
    }
}
