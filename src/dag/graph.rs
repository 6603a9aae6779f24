// src/dag/graph.rs

use std::collections::{BTreeMap, BTreeSet};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::errors::{Gha2ArgoError, Result};
use crate::source::WorkflowModel;
use crate::translate::sanitize;

/// Internal node structure: the original job id plus its sanitized deps.
#[derive(Debug, Clone)]
struct JobNode {
    source_id: String,
    deps: BTreeSet<String>,
}

/// In-memory job graph keyed by *sanitized* job name.
///
/// Edges are not validated for acyclicity on construction; callers decide
/// what to do with [`JobGraph::find_cycle`].
#[derive(Debug, Clone)]
pub struct JobGraph {
    nodes: BTreeMap<String, JobNode>,
}

impl JobGraph {
    /// Build the graph from a workflow model.
    ///
    /// Fails if two distinct job ids sanitize to the same template name,
    /// since the Argo document could not tell them apart.
    pub fn from_model(model: &WorkflowModel) -> Result<Self> {
        let mut nodes: BTreeMap<String, JobNode> = BTreeMap::new();

        for (id, job) in model.jobs.iter() {
            let name = sanitize(id);
            if let Some(existing) = nodes.get(&name) {
                return Err(Gha2ArgoError::Build(format!(
                    "jobs '{}' and '{}' both map to template name '{}'",
                    existing.source_id, id, name
                )));
            }

            let deps = job.needs.iter().map(|n| sanitize(n)).collect();
            nodes.insert(
                name,
                JobNode {
                    source_id: id.clone(),
                    deps,
                },
            );
        }

        Ok(Self { nodes })
    }

    /// Sanitized job names, in stable (sorted) order.
    pub fn jobs(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Original job id a template name was built from.
    pub fn source_id_of(&self, name: &str) -> Option<&str> {
        self.nodes.get(name).map(|n| n.source_id.as_str())
    }

    /// Immediate (sanitized) dependencies of a job.
    pub fn dependencies_of(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.nodes.get(name).map(|n| &n.deps)
    }

    /// Jobs without any `needs`.
    pub fn roots(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.deps.is_empty())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// `(job, dependency)` pairs where the dependency names no job in the
    /// workflow.
    pub fn unknown_dependencies(&self) -> Vec<(&str, &str)> {
        self.nodes
            .iter()
            .flat_map(|(name, node)| {
                node.deps
                    .iter()
                    .filter(|dep| !self.nodes.contains_key(dep.as_str()))
                    .map(move |dep| (name.as_str(), dep.as_str()))
            })
            .collect()
    }

    /// Returns the name of a job that sits on a dependency cycle, if any.
    ///
    /// Edge direction: dep -> job. For `b.needs = [a]` we add `a -> b`.
    pub fn find_cycle(&self) -> Option<String> {
        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

        for name in self.nodes.keys() {
            graph.add_node(name.as_str());
        }

        for (name, node) in self.nodes.iter() {
            for dep in node.deps.iter() {
                if self.nodes.contains_key(dep) {
                    graph.add_edge(dep.as_str(), name.as_str(), ());
                }
            }
        }

        match toposort(&graph, None) {
            Ok(_order) => None,
            Err(cycle) => Some(cycle.node_id().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::JobSpec;

    fn model(jobs: &[(&str, &[&str])]) -> WorkflowModel {
        let mut wf = WorkflowModel {
            name: "wf".to_string(),
            ..Default::default()
        };
        for (id, needs) in jobs {
            wf.jobs.insert(
                id.to_string(),
                JobSpec {
                    needs: needs.iter().map(|s| s.to_string()).collect(),
                    ..Default::default()
                },
            );
        }
        wf
    }

    #[test]
    fn dependencies_are_sanitized() -> Result<()> {
        let graph = JobGraph::from_model(&model(&[("Unit_Tests", &[]), ("Build", &["Unit_Tests"])]))?;

        let names: Vec<_> = graph.jobs().collect();
        assert_eq!(names, vec!["build", "unit-tests"]);
        let deps: Vec<_> = graph
            .dependencies_of("build")
            .map(|d| d.iter().cloned().collect())
            .unwrap_or_default();
        assert_eq!(deps, vec!["unit-tests".to_string()]);
        assert_eq!(graph.roots(), vec!["unit-tests"]);
        assert_eq!(graph.source_id_of("build"), Some("Build"));
        Ok(())
    }

    #[test]
    fn colliding_job_names_are_rejected() {
        let err = JobGraph::from_model(&model(&[("Build", &[]), ("build", &[])])).unwrap_err();
        match err {
            Gha2ArgoError::Build(msg) => assert!(msg.contains("'build'")),
            other => panic!("expected build error, got {other:?}"),
        }
    }

    #[test]
    fn detects_cycles_and_unknown_dependencies() -> Result<()> {
        let acyclic = JobGraph::from_model(&model(&[("a", &[]), ("b", &["a", "ghost"])]))?;
        assert_eq!(acyclic.find_cycle(), None);
        assert_eq!(acyclic.unknown_dependencies(), vec![("b", "ghost")]);

        let cyclic = JobGraph::from_model(&model(&[("a", &["b"]), ("b", &["a"])]))?;
        let node = cyclic.find_cycle().expect("cycle expected");
        assert!(node == "a" || node == "b");
        Ok(())
    }
}
