// src/engine/backend.rs

//! Pluggable conversion backend.
//!
//! Workers talk to a `ConversionBackend` instead of calling the translator
//! directly. Production uses [`TranslatorBackend`]; tests swap in backends
//! that stall or fail on demand.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::errors::Result;
use crate::source::{WorkflowParser, YamlWorkflowParser};
use crate::translate::{TargetDocument, Translator};
use crate::types::{JobFailure, JobId};

pub type ConversionFuture<'a> =
    Pin<Box<dyn Future<Output = std::result::Result<String, JobFailure>> + Send + 'a>>;

/// Trait abstracting how a job payload becomes Argo YAML.
pub trait ConversionBackend: Send + Sync + 'static {
    fn convert<'a>(&'a self, job_id: &'a JobId, payload: &'a [u8]) -> ConversionFuture<'a>;
}

/// Parse -> translate -> serialize.
#[derive(Clone)]
pub struct TranslatorBackend {
    parser: Arc<dyn WorkflowParser>,
    translator: Translator,
}

impl TranslatorBackend {
    /// Backend using the built-in YAML parser.
    pub fn new(translator: Translator) -> Self {
        Self::with_parser(Arc::new(YamlWorkflowParser), translator)
    }

    pub fn with_parser(parser: Arc<dyn WorkflowParser>, translator: Translator) -> Self {
        Self { parser, translator }
    }

    /// Parse and translate without serializing.
    pub fn translate_source(&self, payload: &[u8]) -> Result<TargetDocument> {
        let model = self.parser.parse(payload)?;
        self.translator.translate(&model)
    }
}

impl ConversionBackend for TranslatorBackend {
    fn convert<'a>(&'a self, job_id: &'a JobId, payload: &'a [u8]) -> ConversionFuture<'a> {
        let backend = self.clone();
        let payload = payload.to_vec();

        Box::pin(async move {
            // CPU-bound; keep it off the async workers that also serve HTTP.
            let yaml = tokio::task::spawn_blocking(move || -> Result<String> {
                backend.translate_source(&payload)?.to_yaml()
            })
            .await
            .map_err(|e| {
                JobFailure::build(format!("translation of job {job_id} did not finish: {e}"))
            })??;
            Ok(yaml)
        })
    }
}
