//! Build pipeline from declarations to an emitted plan.
//!
//! Single pass, synchronous, fail-fast: validate references, derive the
//! dependency graph, order it, resolve attributes in that order, emit.
//! Any error aborts the build with no partial plan.

use crate::emit::{emit, Plan};
use crate::graph::DependencyGraph;
use crate::registry::Registry;
use crate::resolve::Resolver;
use crate::validate::Validator;
use stackforge_core::{BuildResult, LogicalName};

/// Output of a successful build
#[derive(Debug, Clone)]
pub struct BuildOutput {
    /// The emitted plan
    pub plan: Plan,
    /// Non-fatal findings
    pub warnings: Vec<BuildWarning>,
}

/// Non-fatal build finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// A resource that references nothing and is referenced by nothing
    IsolatedResource {
        /// The isolated resource
        name: LogicalName,
    },
}

impl std::fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IsolatedResource { name } => {
                write!(f, "resource {name} is isolated: nothing references it and it references nothing")
            }
        }
    }
}

/// Compiler for turning a populated registry into a plan
#[derive(Debug, Clone, Copy, Default)]
pub struct Compiler;

impl Compiler {
    /// Create a new compiler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build a plan from a populated registry
    ///
    /// # Errors
    ///
    /// Returns the first [`stackforge_core::BuildError`] encountered:
    /// an unresolved reference, or a dependency cycle.
    pub fn build(&self, registry: &Registry) -> BuildResult<BuildOutput> {
        tracing::debug!(resources = registry.len(), "starting plan build");

        Validator::new(registry).check()?;

        let graph = DependencyGraph::derive(registry);
        tracing::debug!(edges = graph.edge_count(), "dependency graph derived");

        let order = graph.topological_order()?;

        let mut resolver = Resolver::new(registry);
        for name in &order {
            resolver.resolve(name)?;
        }

        let plan = emit(&order, registry, &resolver, &graph);
        let warnings = self.collect_warnings(registry, &graph);
        tracing::info!(
            resources = plan.len(),
            warnings = warnings.len(),
            "plan build complete"
        );

        Ok(BuildOutput { plan, warnings })
    }

    /// Flag resources with no edges in either direction
    ///
    /// Skipped for single-resource stacks, where isolation is the norm.
    fn collect_warnings(&self, registry: &Registry, graph: &DependencyGraph) -> Vec<BuildWarning> {
        if registry.len() < 2 {
            return Vec::new();
        }

        registry
            .names()
            .filter(|name| {
                graph.dependencies_of(name).is_empty() && graph.dependents_of(name).is_empty()
            })
            .map(|name| BuildWarning::IsolatedResource { name: name.clone() })
            .collect()
    }
}
