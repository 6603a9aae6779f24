// src/source/model.rs

use std::collections::{BTreeMap, BTreeSet};

/// Normalized workflow as produced by a [`WorkflowParser`](super::WorkflowParser).
///
/// Jobs are keyed by their id in a `BTreeMap`, so iteration order is stable
/// and translation output is reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowModel {
    /// Workflow `name:`; empty when the document has none.
    pub name: String,
    /// All jobs from `jobs.<id>`.
    pub jobs: BTreeMap<String, JobSpec>,
}

/// A single `jobs.<id>` entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobSpec {
    /// Steps in declaration order.
    pub steps: Vec<StepSpec>,
    /// Job ids listed in `needs:`.
    pub needs: BTreeSet<String>,
    /// Run-environment labels from `runs-on:`, in declaration order.
    pub runs_on: Vec<String>,
}

impl JobSpec {
    /// First `runs-on` label, which decides the container image.
    pub fn primary_runner(&self) -> Option<&str> {
        self.runs_on.first().map(String::as_str)
    }
}

/// One entry of a job's `steps:` list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepSpec {
    pub name: Option<String>,
    /// `None` when the step has neither `run` nor `uses`; such steps are
    /// skipped by the translator.
    pub action: Option<StepAction>,
}

/// What a step does.
#[derive(Debug, Clone, PartialEq)]
pub enum StepAction {
    /// `run:` shell script.
    Run(String),
    /// `uses:` reference to a reusable action, with its `with:` inputs.
    Uses {
        reference: String,
        with: BTreeMap<String, serde_yaml::Value>,
    },
}
