#![allow(dead_code)]

use std::collections::BTreeMap;

use gha2argo::source::{JobSpec, StepAction, StepSpec, WorkflowModel};

/// Builder for `WorkflowModel` to simplify test setup.
pub struct WorkflowBuilder {
    model: WorkflowModel,
}

impl WorkflowBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            model: WorkflowModel {
                name: name.to_string(),
                jobs: BTreeMap::new(),
            },
        }
    }

    pub fn with_job(mut self, id: &str, job: JobSpec) -> Self {
        self.model.jobs.insert(id.to_string(), job);
        self
    }

    pub fn build(self) -> WorkflowModel {
        self.model
    }
}

/// Builder for `JobSpec`.
pub struct JobBuilder {
    job: JobSpec,
}

impl JobBuilder {
    pub fn new(runs_on: &str) -> Self {
        Self {
            job: JobSpec {
                steps: vec![],
                needs: Default::default(),
                runs_on: vec![runs_on.to_string()],
            },
        }
    }

    /// Job without any `runs-on` label.
    pub fn anywhere() -> Self {
        Self {
            job: JobSpec::default(),
        }
    }

    pub fn needs(mut self, dep: &str) -> Self {
        self.job.needs.insert(dep.to_string());
        self
    }

    pub fn run(mut self, name: &str, script: &str) -> Self {
        self.job.steps.push(StepSpec {
            name: Some(name.to_string()),
            action: Some(StepAction::Run(script.to_string())),
        });
        self
    }

    pub fn unnamed_run(mut self, script: &str) -> Self {
        self.job.steps.push(StepSpec {
            name: None,
            action: Some(StepAction::Run(script.to_string())),
        });
        self
    }

    pub fn uses(mut self, name: &str, reference: &str, with: &[(&str, &str)]) -> Self {
        let with = with
            .iter()
            .map(|(k, v)| (k.to_string(), serde_yaml::Value::String(v.to_string())))
            .collect();
        self.job.steps.push(StepSpec {
            name: Some(name.to_string()),
            action: Some(StepAction::Uses {
                reference: reference.to_string(),
                with,
            }),
        });
        self
    }

    /// Step with neither `run` nor `uses`.
    pub fn empty_step(mut self, name: &str) -> Self {
        self.job.steps.push(StepSpec {
            name: Some(name.to_string()),
            action: None,
        });
        self
    }

    pub fn build(self) -> JobSpec {
        self.job
    }
}
