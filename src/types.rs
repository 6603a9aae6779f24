use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// Identifier handed out for every accepted translation job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Generate a fresh random (v4) id.
    pub fn generate() -> Self {
        JobId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        JobId(s.to_string())
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        JobId(s)
    }
}

/// Which stage of a conversion failed.
///
/// - `Parse`: the source workflow could not be read into a model.
/// - `Build`: the model could not be turned into a target document
///   (dependency cycle when rejected, or serialization failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    Parse,
    Build,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Parse => f.write_str("parse"),
            FailureKind::Build => f.write_str("build"),
        }
    }
}

/// Terminal failure stored for a job.
///
/// Cloneable so that the same outcome can be delivered to a waiting
/// synchronous caller or kept in the result store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct JobFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl JobFailure {
    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Parse,
            message: message.into(),
        }
    }

    pub fn build(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Build,
            message: message.into(),
        }
    }
}

impl From<crate::errors::Gha2ArgoError> for JobFailure {
    fn from(err: crate::errors::Gha2ArgoError) -> Self {
        use crate::errors::Gha2ArgoError;
        match err {
            Gha2ArgoError::Parse(msg) => JobFailure::parse(msg),
            other => JobFailure::build(other.to_string()),
        }
    }
}
