// src/translate/translator.rs

//! Core GitHub Actions -> Argo translation.
//!
//! Every GHA job becomes a `steps` template whose entries point at one
//! `script` template per step. A single-job workflow uses that job template
//! as the entrypoint; otherwise a synthetic DAG template wires the jobs
//! together through their `needs` edges.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, info, warn};

use crate::dag::JobGraph;
use crate::errors::{Gha2ArgoError, Result};
use crate::source::{JobSpec, StepAction, StepSpec, WorkflowModel};
use crate::translate::document::{
    DagTask, DagTemplate, ScriptTemplate, StepRef, StepsTemplate, TargetDocument, Template,
    TemplateBody,
};
use crate::translate::image::image_for_runner;
use crate::translate::sanitize::sanitize;

/// Name of the DAG template synthesized for multi-job workflows.
pub const SYNTHETIC_DAG_NAME: &str = "main-dag";

/// Default cap written to `spec.parallelism`.
pub const DEFAULT_PARALLELISM: u32 = 50;

/// Command prefix for translated `run` steps.
pub const RUN_COMMAND: [&str; 2] = ["bash", "-c"];

/// Command prefix for `uses` placeholders.
pub const PLACEHOLDER_COMMAND: [&str; 2] = ["sh", "-c"];

const BANNER: &str = "****************************************************************";

/// Knobs for the translator, filled from `[translate]` in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslateOptions {
    pub parallelism: u32,
    /// Fail the translation instead of passing a cyclic `needs` graph
    /// through to Argo.
    pub reject_cycles: bool,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            parallelism: DEFAULT_PARALLELISM,
            reject_cycles: false,
        }
    }
}

/// Stateless translator; cheap to clone and share between workers.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    options: TranslateOptions,
}

impl Translator {
    pub fn new(options: TranslateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> TranslateOptions {
        self.options
    }

    /// Build the Argo document for `model`.
    pub fn translate(&self, model: &WorkflowModel) -> Result<TargetDocument> {
        if model.jobs.is_empty() {
            return Err(Gha2ArgoError::Build(
                "workflow has no jobs to translate".to_string(),
            ));
        }

        let graph = JobGraph::from_model(model)?;
        self.check_graph(&graph)?;

        let generate_name = format!("{}-", sanitize(&model.name));
        let mut doc = TargetDocument::new(generate_name, String::new(), self.options.parallelism);

        let mut job_names = Vec::with_capacity(model.jobs.len());
        let mut emitted: HashSet<String> = HashSet::new();
        for (id, job) in model.jobs.iter() {
            let job_name = sanitize(id);
            let (job_template, scripts) = build_job_templates(&job_name, job);

            debug!(
                job = %id,
                template = %job_name,
                scripts = scripts.len(),
                "built job templates"
            );

            push_unique(&mut doc, &mut emitted, job_template)?;
            for script in scripts {
                push_unique(&mut doc, &mut emitted, script)?;
            }
            job_names.push(job_name);
        }

        doc.spec.entrypoint = match job_names.as_slice() {
            [single] => single.clone(),
            names => {
                if names.iter().any(|n| n == SYNTHETIC_DAG_NAME) {
                    return Err(Gha2ArgoError::Build(format!(
                        "job template name '{SYNTHETIC_DAG_NAME}' is reserved for the generated DAG"
                    )));
                }
                push_unique(&mut doc, &mut emitted, build_dag_template(&graph))?;
                SYNTHETIC_DAG_NAME.to_string()
            }
        };

        info!(
            workflow = %model.name,
            jobs = graph.len(),
            roots = ?graph.roots(),
            templates = doc.spec.templates.len(),
            entrypoint = %doc.spec.entrypoint,
            "translated workflow"
        );

        Ok(doc)
    }

    fn check_graph(&self, graph: &JobGraph) -> Result<()> {
        for (job, dep) in graph.unknown_dependencies() {
            warn!(job, dependency = dep, "job needs an unknown job; passing edge through");
        }

        if let Some(node) = graph.find_cycle() {
            let job = graph.source_id_of(&node).unwrap_or(node.as_str()).to_string();
            if self.options.reject_cycles {
                return Err(Gha2ArgoError::DependencyCycle(format!(
                    "cycle detected in job dependencies involving job '{job}'"
                )));
            }
            warn!(job = %job, "dependency cycle passed through; Argo will reject this DAG");
        }

        Ok(())
    }
}

/// Build the `steps` template for a job plus one `script` template per
/// non-empty step.
fn build_job_templates(job_name: &str, job: &JobSpec) -> (Template, Vec<Template>) {
    let image = image_for_runner(job.primary_runner());
    let mut used_names: HashSet<String> = HashSet::new();
    let mut refs = Vec::with_capacity(job.steps.len());
    let mut scripts = Vec::with_capacity(job.steps.len());

    for (index, step) in job.steps.iter().enumerate() {
        let Some(action) = &step.action else {
            debug!(job = job_name, index, "skipping step without `run` or `uses`");
            continue;
        };

        let step_name = step_name(step, index, &used_names);
        used_names.insert(step_name.clone());
        let template_name = format!("{job_name}-{step_name}");

        refs.push(StepRef {
            name: step_name,
            template: template_name.clone(),
        });
        scripts.push(Template {
            name: template_name,
            body: TemplateBody::Script(script_for(action, image)),
        });
    }

    let job_template = Template {
        name: job_name.to_string(),
        body: TemplateBody::Steps(StepsTemplate(refs)),
    };

    (job_template, scripts)
}

/// Append `template`, failing if its name is already in the document.
/// Argo rejects workflows with two templates of the same name.
fn push_unique(
    doc: &mut TargetDocument,
    emitted: &mut HashSet<String>,
    template: Template,
) -> Result<()> {
    if !emitted.insert(template.name.clone()) {
        return Err(Gha2ArgoError::Build(format!(
            "template name '{}' is produced more than once; rename a job or step",
            template.name
        )));
    }
    doc.spec.templates.push(template);
    Ok(())
}

/// Sanitized step name, or `step-<index>` when the step is unnamed or its
/// name is already taken within the job. A taken fallback gets a numeric
/// suffix until it is free.
fn step_name(step: &StepSpec, index: usize, used: &HashSet<String>) -> String {
    if let Some(name) = step.name.as_deref().filter(|n| !n.trim().is_empty()) {
        let name = sanitize(name);
        if !used.contains(&name) {
            return name;
        }
    }

    let fallback = format!("step-{index}");
    if !used.contains(&fallback) {
        return fallback;
    }
    (2..)
        .map(|n| format!("{fallback}-{n}"))
        .find(|candidate| !used.contains(candidate))
        .unwrap_or(fallback)
}

fn script_for(action: &StepAction, image: &str) -> ScriptTemplate {
    match action {
        StepAction::Run(script) => ScriptTemplate {
            image: image.to_string(),
            command: RUN_COMMAND.iter().map(|s| s.to_string()).collect(),
            source: script.clone(),
        },
        StepAction::Uses { reference, with } => ScriptTemplate {
            image: image.to_string(),
            command: PLACEHOLDER_COMMAND.iter().map(|s| s.to_string()).collect(),
            source: placeholder_source(reference, with),
        },
    }
}

/// Script that documents an untranslated action and fails the step, so the
/// gap is visible when the workflow runs.
fn placeholder_source(reference: &str, with: &BTreeMap<String, serde_yaml::Value>) -> String {
    let mut lines = vec![
        format!("echo {}", shell_quote(BANNER)),
        format!(
            "echo {}",
            shell_quote(&format!("MANUAL MIGRATION REQUIRED: GitHub Action {reference}"))
        ),
    ];

    if !with.is_empty() {
        let params = with
            .iter()
            .map(|(k, v)| format!("{k}={}", render_value(v)))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!(
            "echo {}",
            shell_quote(&format!("Parameters (with): {params}"))
        ));
    }

    lines.push(format!("echo {}", shell_quote(BANNER)));
    lines.push("exit 1".to_string());
    lines.join("\n") + "\n"
}

fn render_value(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Null => String::new(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        other => serde_json::to_string(other).unwrap_or_else(|_| format!("{other:?}")),
    }
}

/// Single-quote for POSIX sh.
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

fn build_dag_template(graph: &JobGraph) -> Template {
    let tasks = graph
        .jobs()
        .map(|name| DagTask {
            name: name.to_string(),
            template: name.to_string(),
            dependencies: graph.dependencies_of(name).cloned().unwrap_or_default(),
        })
        .collect();

    Template {
        name: SYNTHETIC_DAG_NAME.to_string(),
        body: TemplateBody::Dag(DagTemplate { tasks }),
    }
}
