// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Gha2ArgoError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("failed to parse workflow: {0}")]
    Parse(String),

    #[error("failed to build Argo workflow: {0}")]
    Build(String),

    #[error("failed to submit document: {0}")]
    Submit(String),

    #[error("Cycle detected in job dependencies: {0}")]
    DependencyCycle(String),

    #[error("Server busy, queue is full")]
    QueueFull,

    #[error("job queue is closed")]
    QueueClosed,

    #[error("job {0} ended without producing a result")]
    JobAbandoned(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Gha2ArgoError>;
