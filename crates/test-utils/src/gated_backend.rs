use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{Notify, Semaphore};
use gha2argo::engine::{ConversionBackend, ConversionFuture};
use gha2argo::types::{JobFailure, JobId};

/// A fake backend that:
/// - counts how many conversions have started
/// - blocks every conversion until the gate is opened
/// - then echoes the payload back, fails it when it starts with `fail`, or
///   panics when it starts with `panic`.
pub struct GatedBackend {
    gate: Arc<Semaphore>,
    started: Arc<AtomicUsize>,
    started_changed: Arc<Notify>,
}

/// Test-side controls for a [`GatedBackend`].
#[derive(Clone)]
pub struct GateHandle {
    gate: Arc<Semaphore>,
    started: Arc<AtomicUsize>,
    started_changed: Arc<Notify>,
}

impl GatedBackend {
    pub fn new() -> (Self, GateHandle) {
        let gate = Arc::new(Semaphore::new(0));
        let started = Arc::new(AtomicUsize::new(0));
        let started_changed = Arc::new(Notify::new());

        let handle = GateHandle {
            gate: Arc::clone(&gate),
            started: Arc::clone(&started),
            started_changed: Arc::clone(&started_changed),
        };

        (
            Self {
                gate,
                started,
                started_changed,
            },
            handle,
        )
    }
}

impl ConversionBackend for GatedBackend {
    fn convert<'a>(&'a self, _job_id: &'a JobId, payload: &'a [u8]) -> ConversionFuture<'a> {
        Box::pin(async move {
            self.started.fetch_add(1, Ordering::SeqCst);
            self.started_changed.notify_waiters();

            // Permit is returned on drop, so an open gate stays open.
            let _permit = self
                .gate
                .acquire()
                .await
                .map_err(|e| JobFailure::build(e.to_string()))?;

            let text = String::from_utf8_lossy(payload).into_owned();
            if text.starts_with("panic") {
                panic!("backend blew up on {text}");
            }
            if text.starts_with("fail") {
                Err(JobFailure::build(format!("refused: {text}")))
            } else {
                Ok(format!("echo: {text}"))
            }
        })
    }
}

impl GateHandle {
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Wait until at least `n` conversions have started.
    pub async fn wait_started(&self, n: usize) {
        loop {
            let notified = self.started_changed.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.started() >= n {
                return;
            }
            notified.await;
        }
    }

    /// Let every current and future conversion through.
    pub fn open(&self) {
        self.gate.add_permits(Semaphore::MAX_PERMITS / 2);
    }
}
