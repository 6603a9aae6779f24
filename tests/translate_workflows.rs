// tests/translate_workflows.rs

mod common;
use crate::common::builders::{JobBuilder, WorkflowBuilder};
use crate::common::{init_tracing, TEST_BUILD_WORKFLOW};

use std::collections::BTreeSet;

use gha2argo::engine::TranslatorBackend;
use gha2argo::errors::{Gha2ArgoError, Result};
use gha2argo::translate::{
    DagTask, TargetDocument, TemplateBody, TranslateOptions, Translator, SYNTHETIC_DAG_NAME,
};

fn backend() -> TranslatorBackend {
    TranslatorBackend::new(Translator::default())
}

fn dag_tasks(doc: &TargetDocument) -> Vec<DagTask> {
    match doc.template(SYNTHETIC_DAG_NAME).map(|t| &t.body) {
        Some(TemplateBody::Dag(dag)) => dag.tasks.clone(),
        other => panic!("expected DAG template, got {other:?}"),
    }
}

#[test]
fn test_and_build_jobs_become_a_dag() -> Result<()> {
    init_tracing();

    let doc = backend().translate_source(TEST_BUILD_WORKFLOW.as_bytes())?;

    assert_eq!(doc.metadata.generate_name, "ci-pipeline-");
    assert_eq!(doc.entrypoint(), SYNTHETIC_DAG_NAME);
    assert_eq!(doc.spec.parallelism, 50);

    let names: Vec<_> = doc.templates().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "build",
            "build-build",
            "test",
            "test-checkout",
            "test-run-tests",
            SYNTHETIC_DAG_NAME,
        ]
    );

    let tasks = dag_tasks(&doc);
    let build = tasks.iter().find(|t| t.name == "build").expect("build task");
    let test = tasks.iter().find(|t| t.name == "test").expect("test task");
    assert_eq!(build.dependencies, BTreeSet::from(["test".to_string()]));
    assert!(test.dependencies.is_empty());

    let checkout = doc
        .scripts()
        .find(|(name, _)| *name == "test-checkout")
        .map(|(_, s)| s.clone())
        .expect("checkout placeholder");
    assert_eq!(checkout.command, vec!["sh", "-c"]);
    assert!(checkout.source.contains("actions/checkout@v4"));
    assert!(checkout.source.trim_end().ends_with("exit 1"));

    let build_script = doc
        .scripts()
        .find(|(name, _)| *name == "build-build")
        .map(|(_, s)| s.clone())
        .expect("build script");
    assert_eq!(build_script.image, "ubuntu:22.04");
    assert_eq!(build_script.source, "make build\necho done\n");

    Ok(())
}

#[test]
fn translation_is_deterministic() -> Result<()> {
    let first = backend().translate_source(TEST_BUILD_WORKFLOW.as_bytes())?.to_yaml()?;
    let second = backend().translate_source(TEST_BUILD_WORKFLOW.as_bytes())?.to_yaml()?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn serialized_yaml_has_argo_shape() -> Result<()> {
    let yaml = backend().translate_source(TEST_BUILD_WORKFLOW.as_bytes())?.to_yaml()?;
    let value: serde_yaml::Value = serde_yaml::from_str(&yaml).expect("valid yaml");

    assert_eq!(value["apiVersion"].as_str(), Some("argoproj.io/v1alpha1"));
    assert_eq!(value["kind"].as_str(), Some("Workflow"));
    assert_eq!(value["spec"]["entrypoint"].as_str(), Some("main-dag"));

    let test_steps = value["spec"]["templates"]
        .as_sequence()
        .and_then(|ts| ts.iter().find(|t| t["name"].as_str() == Some("test")))
        .map(|t| t["steps"].clone())
        .expect("test steps template");
    assert_eq!(test_steps[0][0]["name"].as_str(), Some("checkout"));
    assert_eq!(test_steps[1][0]["template"].as_str(), Some("test-run-tests"));
    Ok(())
}

#[test]
fn unknown_needs_pass_through() -> Result<()> {
    init_tracing();

    let wf = WorkflowBuilder::new("deploy")
        .with_job("ship", JobBuilder::new("ubuntu-latest").needs("Approve").run("go", "./ship.sh").build())
        .with_job("lint", JobBuilder::anywhere().run("lint", "make lint").build())
        .build();

    let doc = Translator::default().translate(&wf)?;
    let tasks = dag_tasks(&doc);
    let ship = tasks.iter().find(|t| t.name == "ship").expect("ship task");
    assert_eq!(ship.dependencies, BTreeSet::from(["approve".to_string()]));

    let lint_image = doc
        .scripts()
        .find(|(name, _)| *name == "lint-lint")
        .map(|(_, s)| s.image.clone());
    assert_eq!(lint_image.as_deref(), Some("alpine:latest"));
    Ok(())
}

#[test]
fn cycles_pass_through_unless_rejected() -> Result<()> {
    let wf = WorkflowBuilder::new("loop")
        .with_job("a", JobBuilder::anywhere().needs("b").run("x", "true").build())
        .with_job("b", JobBuilder::anywhere().needs("a").run("y", "true").build())
        .build();

    let doc = Translator::default().translate(&wf)?;
    assert_eq!(dag_tasks(&doc).len(), 2);

    let strict = Translator::new(TranslateOptions {
        reject_cycles: true,
        ..TranslateOptions::default()
    });
    match strict.translate(&wf) {
        Err(Gha2ArgoError::DependencyCycle(msg)) => assert!(msg.contains("cycle")),
        other => panic!("expected DependencyCycle, got {other:?}"),
    }
    Ok(())
}

#[test]
fn uses_parameters_are_listed_in_placeholder() -> Result<()> {
    let wf = WorkflowBuilder::new("setup")
        .with_job(
            "tools",
            JobBuilder::new("ubuntu-20.04")
                .uses("Setup Node", "actions/setup-node@v4", &[("node-version", "20"), ("cache", "npm")])
                .empty_step("nothing")
                .unnamed_run("node --version")
                .build(),
        )
        .build();

    let doc = Translator::default().translate(&wf)?;
    assert_eq!(doc.entrypoint(), "tools");

    let scripts: Vec<_> = doc.scripts().map(|(n, s)| (n.to_string(), s.clone())).collect();
    assert_eq!(scripts.len(), 2);
    assert_eq!(scripts[0].0, "tools-setup-node");
    assert_eq!(scripts[1].0, "tools-step-2");
    assert_eq!(scripts[0].1.image, "ubuntu:20.04");
    assert!(scripts[0].1.source.contains("Parameters (with): cache=npm, node-version=20"));
    Ok(())
}

#[test]
fn malformed_and_jobless_sources_fail_to_parse() {
    match backend().translate_source(b"jobs: [unterminated") {
        Err(Gha2ArgoError::Parse(_)) => {}
        other => panic!("expected Parse error, got {other:?}"),
    }
    match backend().translate_source(b"name: empty\non: push\n") {
        Err(Gha2ArgoError::Parse(msg)) => assert!(msg.contains("at least one job")),
        other => panic!("expected Parse error, got {other:?}"),
    }
}

#[test]
fn template_names_are_unique_or_rejected() -> Result<()> {
    let source = b"name: ci\njobs:\n  build:\n    steps:\n      - name: step-1\n        run: a\n      - run: b\n";
    let doc = backend().translate_source(source)?;

    let names: Vec<_> = doc.templates().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["build", "build-step-1", "build-step-1-2"]);

    let clash = b"jobs:\n  build:\n    steps:\n      - name: test\n        run: a\n  build-test:\n    steps:\n      - run: b\n";
    match backend().translate_source(clash) {
        Err(Gha2ArgoError::Build(msg)) => assert!(msg.contains("build-test")),
        other => panic!("expected Build error, got {other:?}"),
    }
    Ok(())
}
