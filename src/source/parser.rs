// src/source/parser.rs

//! GitHub Actions YAML parser.
//!
//! Only the parts of the grammar the translator needs are modelled. Triggers,
//! `env`, `if`, `strategy` and friends are accepted and ignored.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use tracing::debug;

use crate::errors::{Gha2ArgoError, Result};
use crate::source::model::{JobSpec, StepAction, StepSpec, WorkflowModel};

/// Turns raw source bytes into a [`WorkflowModel`].
///
/// Production code uses [`YamlWorkflowParser`]; anything that can produce the
/// normalized model can be plugged into the translator backend instead.
pub trait WorkflowParser: Send + Sync {
    fn parse(&self, source: &[u8]) -> Result<WorkflowModel>;
}

/// `serde_yaml`-backed parser for `.github/workflows/*.yml` documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlWorkflowParser;

impl WorkflowParser for YamlWorkflowParser {
    fn parse(&self, source: &[u8]) -> Result<WorkflowModel> {
        let raw: RawWorkflow = serde_yaml::from_slice(source)
            .map_err(|e| Gha2ArgoError::Parse(e.to_string()))?;

        if raw.jobs.is_empty() {
            return Err(Gha2ArgoError::Parse(
                "workflow must define at least one job under `jobs:`".to_string(),
            ));
        }

        let model = raw.into_model();
        debug!(workflow = %model.name, jobs = model.jobs.len(), "parsed source workflow");
        Ok(model)
    }
}

#[derive(Debug, Deserialize)]
struct RawWorkflow {
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    jobs: BTreeMap<String, RawJob>,
}

#[derive(Debug, Deserialize)]
struct RawJob {
    #[serde(rename = "runs-on", default)]
    runs_on: Option<RunsOn>,

    #[serde(default)]
    needs: Option<OneOrMany>,

    #[serde(default)]
    steps: Vec<RawStep>,
}

/// `needs: build` or `needs: [build, test]`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

/// Runner specification.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RunsOn {
    Label(String),
    Labels(Vec<String>),
    /// `runs-on: { group: ..., labels: ... }`; only the labels matter here.
    Group {
        #[serde(default)]
        labels: Option<OneOrMany>,
    },
}

impl RunsOn {
    fn into_labels(self) -> Vec<String> {
        match self {
            RunsOn::Label(label) => vec![label],
            RunsOn::Labels(labels) => labels,
            RunsOn::Group { labels } => labels.map(OneOrMany::into_vec).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawStep {
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    uses: Option<String>,

    #[serde(default)]
    run: Option<String>,

    #[serde(default, rename = "with")]
    with: BTreeMap<String, serde_yaml::Value>,
}

impl RawWorkflow {
    fn into_model(self) -> WorkflowModel {
        let jobs = self
            .jobs
            .into_iter()
            .map(|(id, job)| (id, job.into_spec()))
            .collect();

        WorkflowModel {
            name: self.name.unwrap_or_default(),
            jobs,
        }
    }
}

impl RawJob {
    fn into_spec(self) -> JobSpec {
        JobSpec {
            steps: self.steps.into_iter().map(RawStep::into_spec).collect(),
            needs: self
                .needs
                .map(OneOrMany::into_vec)
                .unwrap_or_default()
                .into_iter()
                .collect::<BTreeSet<_>>(),
            runs_on: self.runs_on.map(RunsOn::into_labels).unwrap_or_default(),
        }
    }
}

impl RawStep {
    fn into_spec(self) -> StepSpec {
        let run = self.run.filter(|s| !s.is_empty());
        let uses = self.uses.filter(|s| !s.is_empty());

        // `run` wins if a (malformed) step carries both.
        let action = match (run, uses) {
            (Some(script), _) => Some(StepAction::Run(script)),
            (None, Some(reference)) => Some(StepAction::Uses {
                reference,
                with: self.with,
            }),
            (None, None) => None,
        };

        StepSpec {
            name: self.name,
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<WorkflowModel> {
        YamlWorkflowParser.parse(yaml.as_bytes())
    }

    #[test]
    fn parses_jobs_needs_and_steps() -> Result<()> {
        let yaml = r#"
name: CI
on: [push, pull_request]
jobs:
  test:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v3
      - name: Setup Go
        uses: actions/setup-go@v3
        with:
          go-version: '1.19'
      - name: Run tests
        run: go test ./...
  build:
    needs: test
    runs-on: [self-hosted, linux]
    steps:
      - name: Build
        run: go build -o app ./cmd
"#;

        let wf = parse(yaml)?;
        assert_eq!(wf.name, "CI");
        assert_eq!(wf.jobs.len(), 2);

        let test = &wf.jobs["test"];
        assert_eq!(test.runs_on, vec!["ubuntu-latest".to_string()]);
        assert!(test.needs.is_empty());
        assert_eq!(test.steps.len(), 3);
        match &test.steps[1].action {
            Some(StepAction::Uses { reference, with }) => {
                assert_eq!(reference, "actions/setup-go@v3");
                assert_eq!(
                    with.get("go-version"),
                    Some(&serde_yaml::Value::String("1.19".into()))
                );
            }
            other => panic!("expected uses step, got {other:?}"),
        }
        assert_eq!(
            test.steps[2].action,
            Some(StepAction::Run("go test ./...".to_string()))
        );

        let build = &wf.jobs["build"];
        assert_eq!(build.needs.iter().collect::<Vec<_>>(), vec!["test"]);
        assert_eq!(build.primary_runner(), Some("self-hosted"));
        Ok(())
    }

    #[test]
    fn step_without_run_or_uses_has_no_action() -> Result<()> {
        let yaml = r#"
jobs:
  only:
    runs-on: ubuntu-latest
    steps:
      - name: nothing to do
"#;
        let wf = parse(yaml)?;
        assert_eq!(wf.name, "");
        assert_eq!(wf.jobs["only"].steps[0].action, None);
        Ok(())
    }

    #[test]
    fn runs_on_group_uses_labels() -> Result<()> {
        let yaml = r#"
name: grouped
jobs:
  a:
    runs-on:
      group: large-runners
      labels: ubuntu-20.04
    steps: []
"#;
        let wf = parse(yaml)?;
        assert_eq!(wf.jobs["a"].runs_on, vec!["ubuntu-20.04".to_string()]);
        Ok(())
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = parse("jobs: [not, a, mapping").unwrap_err();
        assert!(matches!(err, Gha2ArgoError::Parse(_)));
    }

    #[test]
    fn workflow_without_jobs_is_rejected() {
        let err = parse("name: empty\non: push\n").unwrap_err();
        match err {
            Gha2ArgoError::Parse(msg) => assert!(msg.contains("at least one job")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
