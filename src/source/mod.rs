// src/source/mod.rs

//! Source side of the conversion: the GitHub Actions workflow.
//!
//! - [`model`] is the normalized, parser-independent workflow model that the
//!   translator consumes.
//! - [`parser`] turns raw YAML bytes into that model. The translator never
//!   depends on the concrete parser, only on the [`WorkflowParser`] trait.

pub mod model;
pub mod parser;

pub use model::{JobSpec, StepAction, StepSpec, WorkflowModel};
pub use parser::{WorkflowParser, YamlWorkflowParser};
