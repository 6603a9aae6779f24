// src/dag/mod.rs

//! Job dependency graph.
//!
//! - [`graph`] holds the sanitized job names and their `needs` edges, and
//!   answers the structural questions the translator asks before building
//!   the Argo DAG template (roots, dangling references, cycles).

pub mod graph;

pub use graph::JobGraph;
