// src/translate/document.rs

//! Serializable Argo `Workflow` document.
//!
//! Only the subset of the Argo schema the translator emits is modelled:
//!
//! ```yaml
//! apiVersion: argoproj.io/v1alpha1
//! kind: Workflow
//! metadata:
//!   generateName: ci-
//! spec:
//!   entrypoint: main-dag
//!   parallelism: 50
//!   templates:
//!     - name: build
//!       steps:
//!         - - name: compile
//!             template: build-compile
//!     - name: build-compile
//!       script:
//!         image: ubuntu:22.04
//!         command: [bash, -c]
//!         source: cargo build
//!     - name: main-dag
//!       dag:
//!         tasks:
//!           - name: build
//!             template: build
//!             dependencies: [test]
//! ```

use std::collections::BTreeSet;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::errors::{Gha2ArgoError, Result};

pub const API_VERSION: &str = "argoproj.io/v1alpha1";
pub const KIND: &str = "Workflow";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetDocument {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: WorkflowSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub generate_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowSpec {
    pub entrypoint: String,
    /// Cap on simultaneously running pods for the whole workflow.
    pub parallelism: u32,
    pub templates: Vec<Template>,
}

/// A named template; the body decides which Argo template kind it is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub name: String,
    #[serde(flatten)]
    pub body: TemplateBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateBody {
    Script(ScriptTemplate),
    Steps(StepsTemplate),
    Dag(DagTemplate),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptTemplate {
    pub image: String,
    pub command: Vec<String>,
    pub source: String,
}

/// Sequential step references. Argo expects a list of parallel groups, so
/// each reference is emitted as its own single-element group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StepsTemplate(#[serde(serialize_with = "serialize_sequential")] pub Vec<StepRef>);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRef {
    pub name: String,
    pub template: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DagTemplate {
    pub tasks: Vec<DagTask>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DagTask {
    pub name: String,
    pub template: String,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub dependencies: BTreeSet<String>,
}

fn serialize_sequential<S: Serializer>(refs: &[StepRef], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(refs.len()))?;
    for step in refs {
        seq.serialize_element(&[step])?;
    }
    seq.end()
}

impl TargetDocument {
    /// Empty document shell with a `generateName` prefix.
    pub fn new(generate_name: String, entrypoint: String, parallelism: u32) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ObjectMeta { generate_name },
            spec: WorkflowSpec {
                entrypoint,
                parallelism,
                templates: Vec::new(),
            },
        }
    }

    pub fn entrypoint(&self) -> &str {
        &self.spec.entrypoint
    }

    pub fn templates(&self) -> &[Template] {
        &self.spec.templates
    }

    /// Look up a template by name.
    pub fn template(&self, name: &str) -> Option<&Template> {
        self.spec.templates.iter().find(|t| t.name == name)
    }

    /// All script templates, in document order.
    pub fn scripts(&self) -> impl Iterator<Item = (&str, &ScriptTemplate)> {
        self.spec.templates.iter().filter_map(|t| match &t.body {
            TemplateBody::Script(s) => Some((t.name.as_str(), s)),
            _ => None,
        })
    }

    /// Serialize as a YAML manifest.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Gha2ArgoError::Build(e.to_string()))
    }
}
