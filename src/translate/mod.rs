// src/translate/mod.rs

//! GitHub Actions -> Argo Workflows translation.
//!
//! - [`sanitize`] normalizes free text into DNS-1123 label-safe names.
//! - [`image`] maps `runs-on` labels to container images.
//! - [`document`] is the serializable Argo `Workflow` document.
//! - [`translator`] builds that document from a [`WorkflowModel`](crate::source::WorkflowModel).

pub mod document;
pub mod image;
pub mod sanitize;
pub mod translator;

pub use document::{
    DagTask, DagTemplate, ScriptTemplate, StepRef, StepsTemplate, TargetDocument, Template,
    TemplateBody,
};
pub use image::{image_for_runner, map_image, DEFAULT_IMAGE};
pub use sanitize::sanitize;
pub use translator::{TranslateOptions, Translator, SYNTHETIC_DAG_NAME};
