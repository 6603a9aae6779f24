// src/sink.rs

//! Destinations for finished Argo documents.
//!
//! The HTTP service hands YAML back to the caller, so sinks are only used by
//! the one-shot `--convert` mode. A real cluster client would be one more
//! `DocumentSink` implementation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::errors::{Gha2ArgoError, Result};
use crate::translate::TargetDocument;

/// Where a submitted document ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitHandle {
    pub location: String,
}

pub trait DocumentSink: Send + Sync {
    fn submit(&self, doc: &TargetDocument) -> Result<SubmitHandle>;
}

/// Writes the YAML document to any writer (stdout by default).
pub struct WriterSink<W: Write + Send> {
    label: String,
    writer: Mutex<W>,
}

impl WriterSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new("stdout", std::io::stdout())
    }
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(label: impl Into<String>, writer: W) -> Self {
        Self {
            label: label.into(),
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> DocumentSink for WriterSink<W> {
    fn submit(&self, doc: &TargetDocument) -> Result<SubmitHandle> {
        let yaml = doc.to_yaml()?;
        let mut writer = self.writer.lock();
        writer.write_all(yaml.as_bytes())?;
        writer.flush()?;
        Ok(SubmitHandle {
            location: self.label.clone(),
        })
    }
}

/// Writes each document to `<dir>/<generateName><suffix>.yaml`, mimicking
/// the name the cluster would assign.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DocumentSink for DirectorySink {
    fn submit(&self, doc: &TargetDocument) -> Result<SubmitHandle> {
        let yaml = doc.to_yaml()?;

        fs::create_dir_all(&self.dir).map_err(|e| {
            Gha2ArgoError::Submit(format!("cannot create {}: {e}", self.dir.display()))
        })?;

        let suffix = Uuid::new_v4().simple().to_string();
        let file_name = format!("{}{}.yaml", doc.metadata.generate_name, &suffix[..8]);
        let path = self.dir.join(file_name);

        fs::write(&path, yaml)
            .map_err(|e| Gha2ArgoError::Submit(format!("cannot write {}: {e}", path.display())))?;

        info!(path = %path.display(), "wrote Argo workflow");

        Ok(SubmitHandle {
            location: path.display().to_string(),
        })
    }
}
